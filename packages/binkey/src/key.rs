// the sealed key type and the sealed-key contract.

use crate::{
    builder::KeyBuilder,
    reader::KeyReader,
    error::*,
};
use std::fmt::{self, Formatter, Debug};
use bytes::Bytes;


/// Maximum length of a key in bytes.
pub const MAX_KEY_LEN: usize = u16::MAX as usize;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001b3;


/// Immutable, sealed sequence of bytes with content equality
///
/// Two keys are equal if and only if they have the same length and the same bytes. A key carries
/// no read or write position: reading fields back out goes through a separate [`KeyReader`], so
/// nothing about how far a key has been read can ever affect how it compares or hashes.
///
/// Cloning is cheap, since the bytes are reference-counted.
#[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BinaryKey {
    bytes: Bytes,
}

impl BinaryKey {
    /// Begin building a key of exactly `total_len` bytes
    pub fn builder(total_len: usize) -> Result<KeyBuilder, CapacityExceededError> {
        check_len(total_len)?;
        Ok(KeyBuilder::new(total_len))
    }

    /// Seal an already-complete byte string as a key
    pub fn from_sealed_bytes(bytes: impl Into<Bytes>) -> Result<Self, CapacityExceededError> {
        let bytes = bytes.into();
        check_len(bytes.len())?;
        Ok(BinaryKey { bytes })
    }

    // wrap bytes which the builder has already checked against its reservation.
    pub(crate) fn sealed(bytes: Bytes) -> Self {
        debug_assert!(bytes.len() <= MAX_KEY_LEN);
        BinaryKey { bytes }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the key has zero length.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the key's content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the key's content as a [`Bytes`] without copying.
    pub fn to_bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    /// Get a cursor for reading fields back out of the key.
    pub fn reader(&self) -> KeyReader<'_> {
        KeyReader::new(&self.bytes)
    }

    /// Deterministic 64-bit hash of the full content
    ///
    /// Unlike the [`Hash`] impl, which defers to the caller's hasher, this is stable across
    /// processes, so it is usable for sharding. Equal keys always produce equal hash codes.
    pub fn hash_code(&self) -> u64 {
        // FNV-1a over the length then every byte, followed by a murmur3-style finalizer so that
        // keys differing only in their last byte still spread across the high bits
        let mut h = FNV_OFFSET_BASIS;
        for b in (self.bytes.len() as u64).to_be_bytes().iter().chain(self.bytes.iter()) {
            h ^= *b as u64;
            h = h.wrapping_mul(FNV_PRIME);
        }
        h ^= h >> 33;
        h = h.wrapping_mul(0xff51afd7ed558ccd);
        h ^= h >> 33;
        h = h.wrapping_mul(0xc4ceb9fe1a85ec53);
        h ^= h >> 33;
        h
    }
}

fn check_len(len: usize) -> Result<(), CapacityExceededError> {
    if len > MAX_KEY_LEN {
        Err(CapacityExceededError { requested: len, max: MAX_KEY_LEN })
    } else {
        Ok(())
    }
}

impl Debug for BinaryKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("BinaryKey(")?;
        for b in self.bytes.iter() {
            write!(f, "{:02x}", b)?;
        }
        f.write_str(")")
    }
}

impl AsRef<[u8]> for BinaryKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}


/// Something which may or may not hold a sealed key
///
/// This is the boundary check for anything that compares, hashes, or stores keys. A
/// [`BinaryKey`] always passes. A [`KeyBuilder`] passes only once it has been sealed, so a key
/// whose content is still being written can never be observed by equality or hashing.
pub trait SealedKey {
    /// Borrow the sealed key, or fail if not yet sealed.
    fn sealed_key(&self) -> Result<&BinaryKey, UnsealedKeyError>;

    /// Whether this has been sealed.
    fn is_sealed(&self) -> bool {
        self.sealed_key().is_ok()
    }

    /// Content-compare with another key, failing if either side is unsealed.
    fn try_eq<K: SealedKey + ?Sized>(&self, other: &K) -> Result<bool, UnsealedKeyError> {
        Ok(self.sealed_key()? == other.sealed_key()?)
    }

    /// [`BinaryKey::hash_code`], failing if unsealed.
    fn try_hash_code(&self) -> Result<u64, UnsealedKeyError> {
        Ok(self.sealed_key()?.hash_code())
    }
}

impl SealedKey for BinaryKey {
    fn sealed_key(&self) -> Result<&BinaryKey, UnsealedKeyError> {
        Ok(self)
    }
}

impl<K: SealedKey + ?Sized> SealedKey for &K {
    fn sealed_key(&self) -> Result<&BinaryKey, UnsealedKeyError> {
        (**self).sealed_key()
    }
}
