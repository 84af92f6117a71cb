// deadlines for blocking channel operations.

use std::time::{Duration, Instant};


// deadline for blocking on a channel operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Deadline(Option<Instant>);

// time left until a deadline.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Remaining {
    // never time out.
    Forever,
    // time out after the given duration.
    For(Duration),
    // already timed out.
    Elapsed,
}

impl Deadline {
    // never time out.
    pub(crate) const NEVER: Self = Deadline(None);

    // time out once `timeout` has elapsed from now, or never if none. a timeout too large to
    // represent as an instant is treated as never.
    pub(crate) fn after(timeout: Option<Duration>) -> Self {
        Deadline(timeout.and_then(|timeout| Instant::now().checked_add(timeout)))
    }

    // time left until the deadline.
    pub(crate) fn remaining(&self) -> Remaining {
        match self.0 {
            None => Remaining::Forever,
            Some(deadline) => match deadline.checked_duration_since(Instant::now()) {
                Some(duration) if !duration.is_zero() => Remaining::For(duration),
                _ => Remaining::Elapsed,
            },
        }
    }
}
