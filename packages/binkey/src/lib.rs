//! Sealed binary keys with content equality.
//!
//! A key is written field by field into a [`KeyBuilder`] that has a fixed reserved length, then
//! sealed into an immutable [`BinaryKey`]. Only sealed keys have equality and hashing, and they
//! are defined over the full content, never over a read or write position.
//!
//! ```
//! use binkey::{BinaryKey, SealedKey};
//!
//! let tail = b"payload";
//! let mut builder = BinaryKey::builder(4 + tail.len()).unwrap();
//! builder.write_u32(7).unwrap().write_bytes(tail).unwrap();
//! assert!(!builder.is_sealed());
//!
//! let key = builder.seal().unwrap();
//! assert_eq!(key.reader().read_u32().unwrap(), 7);
//! ```

pub extern crate bytes;

mod builder;
mod error;
mod key;
mod reader;

pub use crate::{
    builder::KeyBuilder,
    error::*,
    key::{BinaryKey, SealedKey, MAX_KEY_LEN},
    reader::KeyReader,
};
