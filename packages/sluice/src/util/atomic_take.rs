//! One-shot atomic cell.

use std::{
    cell::UnsafeCell,
    mem::MaybeUninit,
    sync::atomic::{
        Ordering::AcqRel,
        AtomicBool,
    },
};

/// Cell holding a value which exactly one caller, across all threads, can take out.
pub(crate) struct AtomicTake<T> {
    // val is initialized while full is true. the caller which swaps full from true to false owns
    // the value and is the only one to ever read it.
    full: AtomicBool,
    val: UnsafeCell<MaybeUninit<T>>,
}

// taking moves the value to whichever thread won the swap.
unsafe impl<T: Send> Sync for AtomicTake<T> {}

impl<T> AtomicTake<T> {
    /// Construct holding a value.
    pub(crate) const fn new(val: T) -> Self {
        AtomicTake {
            full: AtomicBool::new(true),
            val: UnsafeCell::new(MaybeUninit::new(val)),
        }
    }

    /// Take the value if nobody has yet.
    pub(crate) fn take(&self) -> Option<T> {
        if self.full.swap(false, AcqRel) {
            Some(unsafe { (*self.val.get()).as_ptr().read() })
        } else {
            None
        }
    }
}

impl<T> Drop for AtomicTake<T> {
    fn drop(&mut self) {
        // drop the value if it was never taken
        drop(self.take());
    }
}
