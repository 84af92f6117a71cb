// writable key-in-progress.

use crate::{
    key::{BinaryKey, SealedKey},
    error::*,
};
use bytes::Bytes;
use smallvec::SmallVec;


// keys up to this many bytes are written without a heap allocation before sealing.
const INLINE_KEY_BYTES: usize = 32;


/// Key whose content is still being written
///
/// Created by [`BinaryKey::builder`] with a fixed reserved length. Fields are appended in
/// whatever order the caller defines, and the builder is then [`seal`](Self::seal)ed, which must
/// happen with exactly the reserved number of bytes written.
///
/// A builder deliberately has no equality or hash. Before sealing it fails the [`SealedKey`]
/// check; after sealing it passes and refers to the key it produced, but can no longer be
/// written to.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    total_len: usize,
    state: State,
}

#[derive(Debug, Clone)]
enum State {
    Writing(SmallVec<[u8; INLINE_KEY_BYTES]>),
    Sealed(BinaryKey),
}

macro_rules! write_int {
    ($($method:ident($t:ty),)*)=>{$(
        #[doc = concat!("Append a big-endian `", stringify!($t), "`.")]
        pub fn $method(&mut self, v: $t) -> Result<&mut Self, WriteError> {
            self.write_bytes(&v.to_be_bytes())
        }
    )*};
}

impl KeyBuilder {
    // callers check total_len against MAX_KEY_LEN.
    pub(crate) fn new(total_len: usize) -> Self {
        let mut buf = SmallVec::new();
        buf.reserve_exact(total_len);
        KeyBuilder { total_len, state: State::Writing(buf) }
    }

    /// The reserved length.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        match &self.state {
            State::Writing(buf) => buf.len(),
            State::Sealed(key) => key.len(),
        }
    }

    /// Bytes which may still be written.
    pub fn remaining(&self) -> usize {
        self.total_len - self.written()
    }

    write_int!(
        write_u8(u8),
        write_u16(u16),
        write_u32(u32),
        write_u64(u64),
        write_i32(i32),
        write_i64(i64),
    );

    /// Append raw bytes
    ///
    /// Fails without writing anything if they don't fit in the remaining reservation.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, WriteError> {
        let total_len = self.total_len;
        let State::Writing(buf) = &mut self.state else {
            return Err(AlreadySealedError.into());
        };
        let remaining = total_len - buf.len();
        if bytes.len() > remaining {
            return Err(OverflowError { needed: bytes.len(), remaining }.into());
        }
        buf.extend_from_slice(bytes);
        Ok(self)
    }

    /// Append a variable-length field as a big-endian `u16` length followed by the bytes
    ///
    /// Length-prefixing keeps the boundary between adjacent variable-length fields part of the
    /// content, so `("ab", "c")` and `("a", "bc")` produce different keys.
    pub fn write_len_prefixed(&mut self, bytes: &[u8]) -> Result<&mut Self, WriteError> {
        if matches!(self.state, State::Sealed(_)) {
            return Err(AlreadySealedError.into());
        }
        let needed = bytes.len().saturating_add(2);
        if bytes.len() > u16::MAX as usize || needed > self.remaining() {
            return Err(OverflowError { needed, remaining: self.remaining() }.into());
        }
        self.write_u16(bytes.len() as u16)?;
        self.write_bytes(bytes)
    }

    /// Seal into an immutable key
    ///
    /// Fails if fewer than the reserved number of bytes have been written, in which case the
    /// builder is unchanged and writing may continue. Fails if already sealed.
    pub fn seal(&mut self) -> Result<BinaryKey, SealError> {
        let buf = match &self.state {
            State::Writing(buf) => buf,
            State::Sealed(_) => return Err(AlreadySealedError.into()),
        };
        if buf.len() < self.total_len {
            return Err(IncompleteWriteError { written: buf.len(), expected: self.total_len }.into());
        }
        debug_assert_eq!(buf.len(), self.total_len);
        let key = BinaryKey::sealed(Bytes::copy_from_slice(buf));
        self.state = State::Sealed(key.clone());
        Ok(key)
    }
}

impl SealedKey for KeyBuilder {
    fn sealed_key(&self) -> Result<&BinaryKey, UnsealedKeyError> {
        match &self.state {
            State::Writing(_) => Err(UnsealedKeyError),
            State::Sealed(key) => Ok(key),
        }
    }
}
