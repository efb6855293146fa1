//! Common types used in sample entries.
//!
//! `FourCC` is the four-character tag used for box types and vendor
//! codes, `FixedFloat16_16` is the 16.16 fixed-point number used for
//! the sample rate.
//!
use std::fmt::{self, Debug, Display};
use std::io;

use serde::{Serialize, Serializer};

use crate::serialize::{FromBytes, ReadBytes, ToBytes, WriteBytes};

// Convenience macro to implement FromBytes/ToBytes for newtypes wrapping u* types.
macro_rules! def_from_to_bytes_newtype {
    ($newtype:ident, $type:ident) => {
        impl FromBytes for $newtype {
            fn from_bytes<R: ReadBytes>(bytes: &mut R) -> io::Result<Self> {
                let res = $type::from_bytes(bytes)?;
                Ok($newtype(res))
            }
            fn min_size() -> usize {
                $type::min_size()
            }
        }
        impl ToBytes for $newtype {
            fn to_bytes<W: WriteBytes>(&self, bytes: &mut W) -> io::Result<()> {
                self.0.to_bytes(bytes)
            }
        }
    };
}

/// FourCC is the 4-byte name of any atom. Usually this is four bytes
/// of ASCII characters, but it could be anything.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FourCC(pub u32);
def_from_to_bytes_newtype!(FourCC, u32);

impl FourCC {
    /// Build a FourCC from a string.
    ///
    /// Always exactly 4 bytes: longer strings are truncated, shorter
    /// ones are padded with spaces.
    ///
    /// The empty string is the exception: it gives four zero bytes, not
    /// four spaces, which is what an unset vendor code looks like.
    pub fn new(s: &str) -> FourCC {
        if s.is_empty() {
            return FourCC(0);
        }
        let mut buf = [b' '; 4];
        for (dst, src) in buf.iter_mut().zip(s.bytes()) {
            *dst = src;
        }
        FourCC(u32::from_be_bytes(buf))
    }

    /// The raw bytes.
    pub fn bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    fn is_printable(&self) -> bool {
        self.bytes().iter().all(|&c| c >= 32 && c <= 126)
    }
}

impl From<&str> for FourCC {
    fn from(s: &str) -> FourCC {
        FourCC::new(s)
    }
}

impl PartialEq<&str> for FourCC {
    fn eq(&self, other: &&str) -> bool {
        *self == FourCC::new(other)
    }
}

impl Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 == 0 {
            return Ok(());
        }
        if !self.is_printable() {
            return write!(f, "0x{:08x}", self.0);
        }
        for &c in self.bytes().iter() {
            write!(f, "{}", c as char)?;
        }
        Ok(())
    }
}

impl Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 32 bits 16.16 fixed-point number.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedFloat16_16(pub u32);
def_from_to_bytes_newtype!(FixedFloat16_16, u32);

impl FixedFloat16_16 {
    /// Integer part.
    pub fn integer(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Fractional part, in units of 1/65536.
    pub fn fraction(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }

    pub fn get(&self) -> f64 {
        (self.0 as f64) / 65536f64
    }

    pub fn set(&mut self, value: f64) {
        *self = FixedFloat16_16::from(value);
    }
}

// Out of range values saturate.
impl From<f64> for FixedFloat16_16 {
    fn from(value: f64) -> FixedFloat16_16 {
        FixedFloat16_16((value * 65536f64) as u32)
    }
}

impl From<FixedFloat16_16> for f64 {
    fn from(value: FixedFloat16_16) -> f64 {
        value.get()
    }
}

impl Display for FixedFloat16_16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl Debug for FixedFloat16_16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl Serialize for FixedFloat16_16 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.get())
    }
}
