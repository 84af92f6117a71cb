// channel error types.

use thiserror::Error;


// ==== base error types ====


/// Error for constructing a channel with a capacity of zero
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("channel capacity must be positive")]
pub struct InvalidCapacityError;

/// Error for trying to use a channel which has been closed
///
/// For senders this is terminal. For receivers it is returned only once every buffered item has
/// been received.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("channel closed")]
pub struct ClosedError;

/// Error for trying to send into a channel without blocking while it is at capacity
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("channel full")]
pub struct FullError;

/// Error for trying to receive from a channel without blocking while it has nothing buffered
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("channel empty")]
pub struct EmptyError;

/// Error for a blocking operation not completing before its timeout elapsed
///
/// A timed out operation has no effect on the channel.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("timed out")]
pub struct TimeoutError;

/// Error for signalling shutdown on a channel which has already been signalled
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("shutdown already signalled")]
pub struct AlreadySignalledError;


// ==== compound error types ====


/// Error for trying to send into a channel, which hands the message back
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("{cause}")]
pub struct SendError<T, E> {
    /// The message that could not be sent
    pub msg: T,
    /// The reason the message could not be sent
    pub cause: E,
}

impl<T, E> SendError<T, E> {
    // convert the message, keeping the cause.
    pub(crate) fn map_msg<U>(self, f: impl FnOnce(T) -> U) -> SendError<U, E> {
        SendError { msg: f(self.msg), cause: self.cause }
    }
}

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

/// Reason a non-blocking send failed
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TrySendErrorCause {
    /// The channel is at capacity
    #[error(transparent)]
    Full(FullError),
    /// The channel is closed
    #[error(transparent)]
    Closed(ClosedError),
}

compound_from!(TrySendErrorCause {
    Full(FullError),
    Closed(ClosedError),
});

/// Error for trying to send into a channel without blocking
pub type TrySendError<T> = SendError<T, TrySendErrorCause>;

/// Reason a blocking send with a timeout failed
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SendTimeoutError {
    /// No space became available before the timeout
    #[error(transparent)]
    Timeout(TimeoutError),
    /// The channel is closed
    #[error(transparent)]
    Closed(ClosedError),
}

compound_from!(SendTimeoutError {
    Timeout(TimeoutError),
    Closed(ClosedError),
});

/// Error for trying to receive from a channel without blocking
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TryRecvError {
    /// Nothing is buffered
    #[error(transparent)]
    Empty(EmptyError),
    /// The channel is closed and fully drained
    #[error(transparent)]
    Closed(ClosedError),
}

compound_from!(TryRecvError {
    Empty(EmptyError),
    Closed(ClosedError),
});

/// Error for receiving from a channel with a timeout
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RecvTimeoutError {
    /// Nothing arrived before the timeout
    #[error(transparent)]
    Timeout(TimeoutError),
    /// The channel is closed and fully drained
    #[error(transparent)]
    Closed(ClosedError),
}

compound_from!(RecvTimeoutError {
    Timeout(TimeoutError),
    Closed(ClosedError),
});
