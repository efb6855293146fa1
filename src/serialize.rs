//! Basic serializer / deserializer.
//!
//! The ReadBytes/WriteBytes cursor traits and the FromBytes/ToBytes
//! traits are defined here.
//!
//! It also contains the FromBytes/ToBytes implementations for the
//! primitive types u8/u16/i16/u32.
//!
use std::convert::TryInto;
use std::io;

use auto_impl::auto_impl;

/// Byte reader in a stream.
#[auto_impl(&mut)]
pub trait ReadBytes {
    /// Read an exact number of bytes, return a reference to the buffer.
    fn read(&mut self, amount: u64) -> io::Result<&[u8]>;
    /// Skip some bytes in the input.
    fn skip(&mut self, amount: u64) -> io::Result<()>;
}

/// Byte writer in a stream.
#[auto_impl(&mut)]
pub trait WriteBytes {
    /// Write an exact number of bytes.
    fn write(&mut self, data: &[u8]) -> io::Result<()>;
    /// Zero-fill some bytes in the output.
    fn skip(&mut self, amount: u64) -> io::Result<()>;
}

/// Implementation of ReadBytes on a byte slice.
impl<'a> ReadBytes for &'a [u8] {
    fn read(&mut self, amount: u64) -> io::Result<&[u8]> {
        if amount > (*self).len() as u64 {
            return Err(ioerr!(
                UnexpectedEof,
                "short read: wanted {} bytes, {} left",
                amount,
                self.len()
            ));
        }
        let this: &'a [u8] = *self;
        let (res, rest) = this.split_at(amount as usize);
        (*self) = rest;
        Ok(res)
    }

    fn skip(&mut self, amount: u64) -> io::Result<()> {
        if amount > (*self).len() as u64 {
            return Err(ioerr!(
                UnexpectedEof,
                "tried to skip {} bytes, {} left",
                amount,
                self.len()
            ));
        }
        (*self) = &self[amount as usize..];
        Ok(())
    }
}

/// Implementation of WriteBytes on a byte slice.
impl WriteBytes for &mut [u8] {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        if (*self).len() < data.len() {
            return Err(ioerr!(WriteZero, "output buffer too small"));
        }
        let nself = std::mem::take(self);
        let (head, tail) = nself.split_at_mut(data.len());
        head.copy_from_slice(data);
        *self = tail;
        Ok(())
    }
    fn skip(&mut self, amount: u64) -> io::Result<()> {
        if amount > (*self).len() as u64 {
            return Err(ioerr!(WriteZero, "output buffer too small"));
        }
        let nself = std::mem::take(self);
        let (head, tail) = nself.split_at_mut(amount as usize);
        head.iter_mut().for_each(|b| *b = 0);
        *self = tail;
        Ok(())
    }
}

/// Implementation of WriteBytes on a growable buffer.
impl WriteBytes for Vec<u8> {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }
    fn skip(&mut self, amount: u64) -> io::Result<()> {
        self.resize(self.len() + amount as usize, 0);
        Ok(())
    }
}

/// Trait to deserialize a type.
pub trait FromBytes {
    fn from_bytes<R: ReadBytes>(bytes: &mut R) -> io::Result<Self>
    where
        Self: Sized;
    fn min_size() -> usize;
}

/// Trait to serialize a type.
pub trait ToBytes {
    fn to_bytes<W: WriteBytes>(&self, bytes: &mut W) -> io::Result<()>;
}

// Convenience macro to implement FromBytes/ToBytes for integer types.
macro_rules! def_from_to_bytes {
    ($type:ident) => {
        impl FromBytes for $type {
            fn from_bytes<R: ReadBytes>(bytes: &mut R) -> io::Result<Self> {
                let sz = std::mem::size_of::<$type>();
                let data = bytes.read(sz as u64)?;
                let data = data.try_into().map_err(|_| ioerr!(UnexpectedEof))?;
                Ok($type::from_be_bytes(data))
            }
            fn min_size() -> usize {
                std::mem::size_of::<$type>()
            }
        }
        impl ToBytes for $type {
            fn to_bytes<W: WriteBytes>(&self, bytes: &mut W) -> io::Result<()> {
                bytes.write(&self.to_be_bytes()[..])
            }
        }
    };
}

// Define FromBytes/ToBytes for the integer types.
def_from_to_bytes!(u8);
def_from_to_bytes!(u16);
def_from_to_bytes!(i16);
def_from_to_bytes!(u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_big_endian() {
        let data = [0x12u8, 0x34, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xfe];
        let mut rdr = &data[..];
        assert_eq!(u16::from_bytes(&mut rdr).unwrap(), 0x1234);
        // top bit is data, not sign.
        assert_eq!(u32::from_bytes(&mut rdr).unwrap(), 0xfffffffe);
        assert_eq!(i16::from_bytes(&mut rdr).unwrap(), -2);
        assert!(rdr.is_empty());
    }

    #[test]
    fn short_read_is_eof() {
        let data = [0x01u8, 0x02, 0x03];
        let mut rdr = &data[..];
        let err = u32::from_bytes(&mut rdr).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let mut rdr = &data[..1];
        let err = u16::from_bytes(&mut rdr).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn write_and_zero_fill() {
        let mut out = Vec::new();
        0xabcdu16.to_bytes(&mut out).unwrap();
        WriteBytes::skip(&mut out, 6).unwrap();
        (-2i16).to_bytes(&mut out).unwrap();
        assert_eq!(out, [0xab, 0xcd, 0, 0, 0, 0, 0, 0, 0xff, 0xfe]);
    }

    #[test]
    fn write_into_fixed_slice() {
        let mut buf = [0xffu8; 6];
        {
            let mut wr = &mut buf[..];
            7u16.to_bytes(&mut wr).unwrap();
            WriteBytes::skip(&mut wr, 2).unwrap();
            assert!(9u32.to_bytes(&mut wr).is_err());
        }
        assert_eq!(buf, [0, 7, 0, 0, 0xff, 0xff]);
    }
}
