//! Byte cursors on top of std streams, and a byte counter.
//!
use std::io::{self, Read, Write};

use crate::serialize::{ReadBytes, WriteBytes};

/// Adapter that lets any `std::io::Read` be used as a `ReadBytes` cursor.
///
/// The stream is borrowed, not owned; closing it is up to the caller.
pub struct IoReader<R> {
    inner: R,
    buf:   Vec<u8>,
    pos:   u64,
}

impl<R: Read> IoReader<R> {
    pub fn new(inner: R) -> IoReader<R> {
        IoReader {
            inner,
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ReadBytes for IoReader<R> {
    fn read(&mut self, amount: u64) -> io::Result<&[u8]> {
        self.buf.resize(amount as usize, 0);
        self.inner.read_exact(&mut self.buf[..]).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                ioerr!(UnexpectedEof, "short read at offset {}: wanted {} bytes", self.pos, amount)
            } else {
                e
            }
        })?;
        self.pos += amount;
        Ok(&self.buf[..])
    }

    fn skip(&mut self, amount: u64) -> io::Result<()> {
        let n = io::copy(&mut (&mut self.inner).take(amount), &mut io::sink())?;
        self.pos += n;
        if n < amount {
            return Err(ioerr!(UnexpectedEof, "tried to skip past eof at offset {}", self.pos));
        }
        Ok(())
    }
}

/// Adapter that lets any `std::io::Write` be used as a `WriteBytes` cursor.
pub struct IoWriter<W> {
    inner: W,
    pos:   u64,
}

impl<W: Write> IoWriter<W> {
    pub fn new(inner: W) -> IoWriter<W> {
        IoWriter { inner, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> WriteBytes for IoWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)?;
        self.pos += data.len() as u64;
        Ok(())
    }

    fn skip(&mut self, amount: u64) -> io::Result<()> {
        let n = io::copy(&mut io::repeat(0).take(amount), &mut self.inner)?;
        self.pos += n;
        Ok(())
    }
}

/// Count bytes, don't actually write.
#[derive(Debug, Default)]
pub struct CountBytes {
    pos: u64,
}

impl CountBytes {
    pub fn new() -> CountBytes {
        CountBytes { pos: 0 }
    }

    pub fn size(&self) -> u64 {
        self.pos
    }
}

impl WriteBytes for CountBytes {
    fn write(&mut self, newdata: &[u8]) -> io::Result<()> {
        self.pos += newdata.len() as u64;
        Ok(())
    }

    fn skip(&mut self, amount: u64) -> io::Result<()> {
        self.pos += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::{FromBytes, ToBytes};

    #[test]
    fn io_reader() {
        let data = vec![0u8, 1, 0xff, 0xff, 0xff, 0xff, 9];
        let mut rdr = IoReader::new(&data[..]);
        assert_eq!(u16::from_bytes(&mut rdr).unwrap(), 1);
        assert_eq!(u32::from_bytes(&mut rdr).unwrap(), u32::MAX);
        assert_eq!(rdr.pos(), 6);
        let err = u16::from_bytes(&mut rdr).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn io_reader_skip() {
        let data = [1u8, 2, 3, 4];
        let mut rdr = IoReader::new(&data[..]);
        ReadBytes::skip(&mut rdr, 3).unwrap();
        assert_eq!(u8::from_bytes(&mut rdr).unwrap(), 4);
        assert!(ReadBytes::skip(&mut rdr, 1).is_err());
    }

    #[test]
    fn io_writer() {
        let mut wr = IoWriter::new(Vec::new());
        0x0102u16.to_bytes(&mut wr).unwrap();
        WriteBytes::skip(&mut wr, 3).unwrap();
        assert_eq!(wr.pos(), 5);
        assert_eq!(wr.into_inner(), vec![1, 2, 0, 0, 0]);
    }

    #[test]
    fn count_bytes() {
        let mut cnt = CountBytes::new();
        7u32.to_bytes(&mut cnt).unwrap();
        WriteBytes::skip(&mut cnt, 6).unwrap();
        assert_eq!(cnt.size(), 10);
    }
}
