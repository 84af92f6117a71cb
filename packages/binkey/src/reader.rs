// read cursor over a sealed key.

use crate::error::TooFewBytesError;


/// Cursor for reading fields back out of a [`BinaryKey`](crate::BinaryKey)
///
/// The cursor's position lives here and not in the key. Reads that fail consume nothing.
#[derive(Debug, Clone)]
pub struct KeyReader<'a> {
    rest: &'a [u8],
}

macro_rules! read_int {
    ($($method:ident($t:ty),)*)=>{$(
        #[doc = concat!("Read a big-endian `", stringify!($t), "`.")]
        pub fn $method(&mut self) -> Result<$t, TooFewBytesError> {
            const N: usize = std::mem::size_of::<$t>();
            let mut buf = [0; N];
            buf.copy_from_slice(self.read_bytes(N)?);
            Ok(<$t>::from_be_bytes(buf))
        }
    )*};
}

impl<'a> KeyReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        KeyReader { rest: bytes }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    read_int!(
        read_u8(u8),
        read_u16(u16),
        read_u32(u32),
        read_u64(u64),
        read_i32(i32),
        read_i64(i64),
    );

    /// Read the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], TooFewBytesError> {
        if n > self.rest.len() {
            return Err(TooFewBytesError);
        }
        let (read, rest) = self.rest.split_at(n);
        self.rest = rest;
        Ok(read)
    }

    /// Read a field written by [`KeyBuilder::write_len_prefixed`](crate::KeyBuilder::write_len_prefixed).
    pub fn read_len_prefixed(&mut self) -> Result<&'a [u8], TooFewBytesError> {
        let save = self.rest;
        let len = self.read_u16()? as usize;
        match self.read_bytes(len) {
            Ok(field) => Ok(field),
            Err(e) => {
                self.rest = save;
                Err(e)
            }
        }
    }
}
