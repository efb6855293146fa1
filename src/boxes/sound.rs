//
// QuickTime File Format Specification
// Sound Sample Descriptions (version 0 and version 1)
//

use std::fmt::{self, Display};
use std::io;

use serde::{Serialize, Serializer};

use crate::mp4box::{ParseWarning, Parsed, SampleEntry, SampleEntryHeader, SAMPLE_ENTRY_HEADER_SIZE};
use crate::serialize::{FromBytes, ReadBytes, ToBytes, WriteBytes};
use crate::types::{FixedFloat16_16, FourCC};

/// Size of version, revision .. sample_rate.
const COMMON_FIELDS_SIZE: u64 = 20;
/// Size of the four extra u32 fields in a version 1 description.
const V1_FIELDS_SIZE: u64 = 16;

/// The extra fields of a version 1 sound description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SoundDescriptionV1 {
    /// Uncompressed frames per compressed frame. 1 for uncompressed audio.
    pub samples_per_packet: u32,
    /// Bytes in a sample for a single channel.
    pub bytes_per_packet:   u32,
    /// Bytes per frame (bytes_per_packet * channels for uncompressed audio).
    pub bytes_per_frame:    u32,
    /// 1 for 8-bit audio, 2 for everything else.
    pub bytes_per_sample:   u32,
}

impl FromBytes for SoundDescriptionV1 {
    fn from_bytes<R: ReadBytes>(stream: &mut R) -> io::Result<SoundDescriptionV1> {
        Ok(SoundDescriptionV1 {
            samples_per_packet: u32::from_bytes(stream)?,
            bytes_per_packet:   u32::from_bytes(stream)?,
            bytes_per_frame:    u32::from_bytes(stream)?,
            bytes_per_sample:   u32::from_bytes(stream)?,
        })
    }
    fn min_size() -> usize {
        V1_FIELDS_SIZE as usize
    }
}

impl ToBytes for SoundDescriptionV1 {
    fn to_bytes<W: WriteBytes>(&self, stream: &mut W) -> io::Result<()> {
        self.samples_per_packet.to_bytes(stream)?;
        self.bytes_per_packet.to_bytes(stream)?;
        self.bytes_per_frame.to_bytes(stream)?;
        self.bytes_per_sample.to_bytes(stream)
    }
}

/// Version of the sound description, and the fields that depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundVersion {
    V0,
    V1(SoundDescriptionV1),
    /// Any other version. Laid out like version 0.
    Unknown(u16),
}

impl SoundVersion {
    fn from_version(version: u16) -> SoundVersion {
        match version {
            0 => SoundVersion::V0,
            1 => SoundVersion::V1(SoundDescriptionV1::default()),
            v => SoundVersion::Unknown(v),
        }
    }

    pub fn number(&self) -> u16 {
        match *self {
            SoundVersion::V0 => 0,
            SoundVersion::V1(_) => 1,
            SoundVersion::Unknown(v) => v,
        }
    }

    /// The version 1 fields, if present.
    pub fn v1(&self) -> Option<&SoundDescriptionV1> {
        match self {
            SoundVersion::V1(v1) => Some(v1),
            _ => None,
        }
    }
}

/// Uncompressed sound sample entry ("raw " / "twos").
///
/// Either read from a stream, or built with [`SoundSampleEntry::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct SoundSampleEntry {
    pub header:         SampleEntryHeader,
    pub version:        SoundVersion,
    pub revision:       u16,
    pub vendor:         FourCC,
    // (mono = 1 ; stereo = 2)
    pub channel_count:  u16,
    // 8 or 16
    pub sample_size:    u16,
    // 0, or -2 for some version 1 descriptions.
    pub compression_id: i16,
    pub packet_size:    u16,
    pub sample_rate:    FixedFloat16_16,
}

impl SoundSampleEntry {
    /// Build a version 1 description for uncompressed audio.
    ///
    /// 8 bits per sample gives a "raw " entry, 16 bits a "twos" entry.
    /// Any other sample size is an `InvalidInput` error.
    pub fn new(
        data_reference_index: u16,
        channel_count: u16,
        sample_size: u16,
        sample_rate: f64,
    ) -> io::Result<SoundSampleEntry> {
        let fourcc = fourcc_for_sample_size(sample_size)?;
        let bytes_per_packet = (sample_size / 8) as u32;
        let v1 = SoundDescriptionV1 {
            samples_per_packet: 1,
            bytes_per_packet,
            bytes_per_frame: bytes_per_packet * channel_count as u32,
            bytes_per_sample: bytes_per_packet,
        };
        let mut entry = SoundSampleEntry {
            header: SampleEntryHeader::new(fourcc, data_reference_index),
            version: SoundVersion::V1(v1),
            revision: 0,
            vendor: FourCC::default(),
            channel_count,
            sample_size,
            compression_id: 0,
            packet_size: 0,
            sample_rate: FixedFloat16_16::from(sample_rate),
        };
        // Same size as a read-back copy will carry.
        entry.header.size = entry.size() as u32;
        Ok(entry)
    }

    /// Read a sound sample entry, including its header.
    ///
    /// An unsupported version is not an error: the entry is read with
    /// the version 0 layout and a warning is returned along with it.
    pub fn read<R: ReadBytes>(stream: &mut R) -> io::Result<Parsed<SoundSampleEntry>> {
        let header = SampleEntryHeader::read(stream)?;
        let version = u16::from_bytes(stream)?;

        let mut unsupported = None;
        if version > 1 {
            log::warn!("SoundSampleEntry({}): unsupported version ({})", header.fourcc, version);
            unsupported = Some(ParseWarning::UnsupportedVersion(version));
        }

        let revision = u16::from_bytes(stream)?;
        let vendor = FourCC::from_bytes(stream)?;
        let channel_count = u16::from_bytes(stream)?;
        let sample_size = u16::from_bytes(stream)?;
        let compression_id = i16::from_bytes(stream)?;
        let packet_size = u16::from_bytes(stream)?;
        let sample_rate = FixedFloat16_16::from_bytes(stream)?;

        let version = match SoundVersion::from_version(version) {
            SoundVersion::V1(_) => SoundVersion::V1(SoundDescriptionV1::from_bytes(stream)?),
            other => other,
        };

        let mut parsed = Parsed::new(SoundSampleEntry {
            header,
            version,
            revision,
            vendor,
            channel_count,
            sample_size,
            compression_id,
            packet_size,
            sample_rate,
        });
        if let Some(warning) = unsupported {
            parsed.warn(warning);
        }

        // Skip whatever is left of the box (extension atoms, unknown
        // version fields) so that the stream is at the next entry.
        let read = parsed.value.size();
        let declared = header.size as u64;
        if declared > read {
            let skipped = declared - read;
            log::debug!("SoundSampleEntry({}): skipping {} trailing bytes", header.fourcc, skipped);
            stream.skip(skipped)?;
            parsed.warn(ParseWarning::TrailingData { fourcc: header.fourcc, skipped });
        } else if declared < read {
            log::warn!(
                "SoundSampleEntry({}): header size {} smaller than entry ({})",
                header.fourcc,
                declared,
                read
            );
            parsed.warn(ParseWarning::SizeMismatch { fourcc: header.fourcc, declared: header.size, read });
        }

        Ok(parsed)
    }

    pub fn version(&self) -> u16 {
        self.version.number()
    }

    pub fn samples_per_packet(&self) -> Option<u32> {
        self.version.v1().map(|v| v.samples_per_packet)
    }

    pub fn bytes_per_packet(&self) -> Option<u32> {
        self.version.v1().map(|v| v.bytes_per_packet)
    }

    pub fn bytes_per_frame(&self) -> Option<u32> {
        self.version.v1().map(|v| v.bytes_per_frame)
    }

    pub fn bytes_per_sample(&self) -> Option<u32> {
        self.version.v1().map(|v| v.bytes_per_sample)
    }

    /// Return description of codec.
    pub fn codec_name(&self) -> &'static str {
        match &self.header.fourcc.bytes() {
            b"raw " => "8-bit offset-binary PCM",
            b"twos" => "16-bit big-endian PCM",
            b"sowt" => "16-bit little-endian PCM",
            _ => "PCM",
        }
    }
}

fn fourcc_for_sample_size(sample_size: u16) -> io::Result<FourCC> {
    match sample_size {
        8 => Ok(FourCC::new("raw ")),
        16 => Ok(FourCC::new("twos")),
        n => Err(ioerr!(InvalidInput, "bits per sample ({}) must be either 8 or 16", n)),
    }
}

impl SampleEntry for SoundSampleEntry {
    fn header(&self) -> &SampleEntryHeader {
        &self.header
    }

    fn size(&self) -> u64 {
        match self.version {
            SoundVersion::V1(_) => SAMPLE_ENTRY_HEADER_SIZE + COMMON_FIELDS_SIZE + V1_FIELDS_SIZE,
            _ => SAMPLE_ENTRY_HEADER_SIZE + COMMON_FIELDS_SIZE,
        }
    }
}

// Warnings are logged, then dropped.
impl FromBytes for SoundSampleEntry {
    fn from_bytes<R: ReadBytes>(stream: &mut R) -> io::Result<SoundSampleEntry> {
        Ok(SoundSampleEntry::read(stream)?.into_inner())
    }
    fn min_size() -> usize {
        (SAMPLE_ENTRY_HEADER_SIZE + COMMON_FIELDS_SIZE) as usize
    }
}

impl ToBytes for SoundSampleEntry {
    fn to_bytes<W: WriteBytes>(&self, stream: &mut W) -> io::Result<()> {
        self.header.write(stream, self.size())?;

        self.version().to_bytes(stream)?;
        self.revision.to_bytes(stream)?;
        self.vendor.to_bytes(stream)?;
        self.channel_count.to_bytes(stream)?;
        self.sample_size.to_bytes(stream)?;
        self.compression_id.to_bytes(stream)?;
        self.packet_size.to_bytes(stream)?;
        self.sample_rate.to_bytes(stream)?;

        if let SoundVersion::V1(ref v1) = self.version {
            v1.to_bytes(stream)?;
        }
        Ok(())
    }
}

// Shows "n/a" for the version 1 fields if they are not present.
struct NotApplicable(Option<u32>);

impl Display for NotApplicable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "n/a"),
        }
    }
}

impl Display for SoundSampleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SoundSampleEntry[ type=\"{}\", data_reference={}, version={}, revision={}, \
             vendor=\"{}\", channel_count={}, sample_size={}, compression_id={}, \
             packet_size={}, sample_rate={}, samples_per_packet={}, bytes_per_packet={}, \
             bytes_per_frame={}, bytes_per_sample={} ]",
            self.header.fourcc,
            self.header.data_reference_index,
            self.version(),
            self.revision,
            self.vendor,
            self.channel_count,
            self.sample_size,
            self.compression_id,
            self.packet_size,
            self.sample_rate,
            NotApplicable(self.samples_per_packet()),
            NotApplicable(self.bytes_per_packet()),
            NotApplicable(self.bytes_per_frame()),
            NotApplicable(self.bytes_per_sample()),
        )
    }
}

// Flat view for JSON output; absent version 1 fields become null.
#[derive(Serialize)]
struct SoundSampleEntryInfo<'a> {
    fourcc:               FourCC,
    codec:                &'a str,
    data_reference_index: u16,
    size:                 u64,
    version:              u16,
    revision:             u16,
    vendor:               FourCC,
    channel_count:        u16,
    sample_size:          u16,
    compression_id:       i16,
    packet_size:          u16,
    sample_rate:          FixedFloat16_16,
    samples_per_packet:   Option<u32>,
    bytes_per_packet:     Option<u32>,
    bytes_per_frame:      Option<u32>,
    bytes_per_sample:     Option<u32>,
}

impl Serialize for SoundSampleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SoundSampleEntryInfo {
            fourcc: self.header.fourcc,
            codec: self.codec_name(),
            data_reference_index: self.header.data_reference_index,
            size: self.size(),
            version: self.version(),
            revision: self.revision,
            vendor: self.vendor,
            channel_count: self.channel_count,
            sample_size: self.sample_size,
            compression_id: self.compression_id,
            packet_size: self.packet_size,
            sample_rate: self.sample_rate,
            samples_per_packet: self.samples_per_packet(),
            bytes_per_packet: self.bytes_per_packet(),
            bytes_per_frame: self.bytes_per_frame(),
            bytes_per_sample: self.bytes_per_sample(),
        }
        .serialize(serializer)
    }
}
