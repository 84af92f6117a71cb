//! Internal utilities.

pub(crate) mod atomic_take;
