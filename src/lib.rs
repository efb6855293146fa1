//! Read and write QuickTime / MP4 sound sample descriptions.
//!
//! A sound sample description is one entry in the sample description
//! (`stsd`) box of an audio track. This crate reads and writes the
//! uncompressed PCM entries (`raw ` and `twos`), version 0 and 1,
//! byte-exact.
//!
//! ```
//! use qtsound::{SoundSampleEntry, ToBytes};
//!
//! # fn main() -> std::io::Result<()> {
//! let entry = SoundSampleEntry::new(1, 2, 16, 44100.0)?;
//! let mut buf = Vec::new();
//! entry.to_bytes(&mut buf)?;
//! assert_eq!(buf.len(), 52);
//!
//! let parsed = SoundSampleEntry::read(&mut &buf[..])?;
//! assert!(parsed.is_clean());
//! assert_eq!(parsed.value, entry);
//! # Ok(())
//! # }
//! ```
//!
#[macro_use]
mod ioerr;
pub mod serialize;
pub mod boxes;
pub mod io;
pub mod mp4box;
pub mod types;

pub use crate::boxes::{SoundDescriptionV1, SoundSampleEntry, SoundVersion};
pub use crate::io::{CountBytes, IoReader, IoWriter};
pub use crate::mp4box::{ParseWarning, Parsed, SampleEntry, SampleEntryHeader};
pub use crate::serialize::{FromBytes, ReadBytes, ToBytes, WriteBytes};
pub use crate::types::{FixedFloat16_16, FourCC};
