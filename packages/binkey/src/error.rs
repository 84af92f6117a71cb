// key error types.

use thiserror::Error;


// ==== base error types ====


/// Error for reserving a key longer than [`MAX_KEY_LEN`](crate::MAX_KEY_LEN)
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[error("key length {requested} exceeds maximum of {max}")]
pub struct CapacityExceededError {
    /// The length that was asked for
    pub requested: usize,
    /// The maximum key length
    pub max: usize,
}

/// Error for a write which would go past the builder's reserved length
///
/// A failed write writes nothing.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[error("write of {needed} bytes overflows key, {remaining} bytes remain")]
pub struct OverflowError {
    /// Bytes the write needed
    pub needed: usize,
    /// Bytes left in the reservation
    pub remaining: usize,
}

/// Error for writing to or sealing a builder which has already been sealed
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("key already sealed")]
pub struct AlreadySealedError;

/// Error for sealing a builder before its reserved length has been written
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[error("incomplete key: {written} of {expected} bytes written")]
pub struct IncompleteWriteError {
    /// Bytes written so far
    pub written: usize,
    /// The reserved length
    pub expected: usize,
}

/// Error for comparing, hashing, or storing a key which has not been sealed
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("key is not sealed")]
pub struct UnsealedKeyError;

/// Error type for trying to read more bytes than remain in a key.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("too few bytes")]
pub struct TooFewBytesError;


// ==== compound error types ====


macro_rules! compound_from {
    ($compound:ident {$(
        $variant:ident($inner:ty),
    )*})=>{$(
        impl From<$inner> for $compound {
            fn from(inner: $inner) -> Self {
                Self::$variant(inner)
            }
        }
    )*};
}

/// Error for writing a field into a [`KeyBuilder`](crate::KeyBuilder)
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WriteError {
    /// The write would exceed the reserved length
    #[error(transparent)]
    Overflow(OverflowError),
    /// The builder was already sealed
    #[error(transparent)]
    AlreadySealed(AlreadySealedError),
}

compound_from!(WriteError {
    Overflow(OverflowError),
    AlreadySealed(AlreadySealedError),
});

/// Error for sealing a [`KeyBuilder`](crate::KeyBuilder)
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SealError {
    /// Fewer bytes than reserved have been written
    #[error(transparent)]
    IncompleteWrite(IncompleteWriteError),
    /// The builder was already sealed
    #[error(transparent)]
    AlreadySealed(AlreadySealedError),
}

compound_from!(SealError {
    IncompleteWrite(IncompleteWriteError),
    AlreadySealed(AlreadySealedError),
});
