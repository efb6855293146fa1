//! The sample entries we know.
//!
//! Apart from the entries themselves, this module also contains the
//! helper types used in them.
//!
pub(crate) mod sound;

pub use self::sound::*;
