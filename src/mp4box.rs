//! Sample entry header, the `SampleEntry` trait, and parse results.
use std::fmt::{self, Display};
use std::io;

use crate::serialize::{FromBytes, ReadBytes, ToBytes, WriteBytes};
use crate::types::FourCC;

/// Size of the header that every sample entry starts with:
/// size (4), type (4), reserved (6), data reference index (2).
pub const SAMPLE_ENTRY_HEADER_SIZE: u64 = 16;

/// Gets implemented for every sample entry.
pub trait SampleEntry: ToBytes {
    /// The header fields (type and data reference index).
    fn header(&self) -> &SampleEntryHeader;

    /// Total serialized size, including the header.
    fn size(&self) -> u64;

    /// The "fourcc" name of this entry.
    fn fourcc(&self) -> FourCC {
        self.header().fourcc
    }

    /// Index into the data reference box.
    fn data_reference_index(&self) -> u16 {
        self.header().data_reference_index
    }
}

/// The header shared by all sample entries.
///
/// `size` is whatever was read from the stream, or the computed size for
/// entries that were built. When writing, the caller supplies the size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleEntryHeader {
    pub size:                 u32,
    pub fourcc:               FourCC,
    pub data_reference_index: u16,
}

impl SampleEntryHeader {
    pub fn new(fourcc: FourCC, data_reference_index: u16) -> SampleEntryHeader {
        SampleEntryHeader {
            size: 0,
            fourcc,
            data_reference_index,
        }
    }

    /// Read the header from the stream.
    pub fn read(stream: &mut impl ReadBytes) -> io::Result<SampleEntryHeader> {
        let size = u32::from_bytes(stream)?;
        let fourcc = FourCC::from_bytes(stream)?;
        stream.skip(6)?;
        let data_reference_index = u16::from_bytes(stream)?;
        log::trace!("SampleEntryHeader::read: {} size {}", fourcc, size);
        Ok(SampleEntryHeader {
            size,
            fourcc,
            data_reference_index,
        })
    }

    /// Write the header, with `size` as the total size of the entry.
    pub fn write(&self, stream: &mut impl WriteBytes, size: u64) -> io::Result<()> {
        if size > u32::MAX as u64 {
            return Err(ioerr!(InvalidInput, "{}: size {} does not fit in 32 bits", self.fourcc, size));
        }
        (size as u32).to_bytes(stream)?;
        self.fourcc.to_bytes(stream)?;
        stream.skip(6)?;
        self.data_reference_index.to_bytes(stream)
    }
}

/// Non-fatal problems found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// Version not 0 or 1. The entry was read with the version 0 layout.
    UnsupportedVersion(u16),
    /// The header size is larger than what was read, the rest was skipped.
    TrailingData { fourcc: FourCC, skipped: u64 },
    /// The header size is smaller than what was read.
    SizeMismatch { fourcc: FourCC, declared: u32, read: u64 },
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseWarning::UnsupportedVersion(v) => write!(f, "unsupported version ({})", v),
            ParseWarning::TrailingData { fourcc, skipped } => {
                write!(f, "{}: skipped {} bytes of trailing data", fourcc, skipped)
            },
            ParseWarning::SizeMismatch { fourcc, declared, read } => {
                write!(f, "{}: header size {} but read {} bytes", fourcc, declared, read)
            },
        }
    }
}

/// Result of a successful parse: the value, plus any warnings.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub value:    T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Parsed<T> {
    pub fn new(value: T) -> Parsed<T> {
        Parsed {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Drop the warnings.
    pub fn into_inner(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::CountBytes;

    #[test]
    fn header_layout() {
        let hdr = SampleEntryHeader::new(FourCC::new("twos"), 1);
        let mut out = Vec::new();
        hdr.write(&mut out, 52).unwrap();
        assert_eq!(
            out,
            [0, 0, 0, 52, b't', b'w', b'o', b's', 0, 0, 0, 0, 0, 0, 0, 1]
        );

        let mut rdr = &out[..];
        let hdr2 = SampleEntryHeader::read(&mut rdr).unwrap();
        assert_eq!(hdr2.size, 52);
        assert_eq!(hdr2.fourcc, FourCC::new("twos"));
        assert_eq!(hdr2.data_reference_index, 1);
        assert!(rdr.is_empty());
        assert_eq!(
            format!("{:?}", hdr2),
            "SampleEntryHeader { size: 52, fourcc: \"twos\", data_reference_index: 1 }"
        );
    }

    #[test]
    fn header_size() {
        let hdr = SampleEntryHeader::new(FourCC::new("raw "), 7);
        let mut cnt = CountBytes::new();
        hdr.write(&mut cnt, 0).unwrap();
        assert_eq!(cnt.size(), SAMPLE_ENTRY_HEADER_SIZE);
        assert!(hdr.write(&mut cnt, 1 << 32).is_err());
    }

    #[test]
    fn truncated_header() {
        let data = [0u8, 0, 0, 36, b'r', b'a', b'w', b' ', 0, 0];
        let mut rdr = &data[..];
        let err = SampleEntryHeader::read(&mut rdr).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn warning_text() {
        let w = ParseWarning::UnsupportedVersion(2);
        assert_eq!(w.to_string(), "unsupported version (2)");
        let w = ParseWarning::TrailingData { fourcc: FourCC::new("twos"), skipped: 12 };
        assert_eq!(w.to_string(), "twos: skipped 12 bytes of trailing data");
    }
}
