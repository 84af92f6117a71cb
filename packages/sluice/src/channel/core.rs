// minimal safe API for the channel. the exposed API is a convenience wrapper around this.

use super::{
    ring::Ring,
    polling::{Deadline, Remaining},
};
use std::{
    sync::{
        atomic::{
            Ordering::{Relaxed, Acquire, Release},
            AtomicBool,
            AtomicU64,
            AtomicUsize,
        },
        Arc,
        Condvar,
        Mutex,
        MutexGuard,
        PoisonError,
    },
};
use tokio::sync::Notify;


// handle to a channel.
pub(crate) struct Channel<T>(Arc<Shared<T>>);

// channel shared state.
struct Shared<T> {
    // mutex around lockable state.
    lockable: Mutex<Lockable<T>>,

    // maximum number of ordinary elements. the ring may have additional reserved slots beyond
    // this which only `Lock::push_reserved` may fill.
    capacity: usize,
    // number of buffered elements, including any in reserved slots.
    //
    // - only modified while the lock is held, in the same critical section as the ring.
    // - may be read without locking to reject sends early. such a read may be stale, but the
    //   decision is always made again under the lock.
    occupancy: AtomicUsize,
    // begins false. once true, never changes again. mirrors Lockable.closed.
    closed: AtomicBool,

    // signalled when an element is pushed, and on close.
    not_empty: Condvar,
    // signalled when an element is popped, and on close.
    not_full: Condvar,
    // async equivalents of the above.
    not_empty_async: Notify,
    not_full_async: Notify,

    counters: Counters,
    // name attached to log events.
    label: Box<str>,
}

// channel lockable state.
struct Lockable<T> {
    // storage for elements.
    elems: Ring<T>,
    // whether the channel is closed to sends.
    closed: bool,
}

// monotonic event counters.
#[derive(Default)]
pub(crate) struct Counters {
    pub(crate) admitted: AtomicU64,
    pub(crate) dropped: AtomicU64,
    pub(crate) evicted: AtomicU64,
    pub(crate) dequeued: AtomicU64,
}

// which condition to wait for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Cond {
    NotEmpty,
    NotFull,
}

// why an element was refused by a push.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Refusal {
    Full,
    Closed,
}

impl<T> Channel<T> {
    // construct empty channel. capacity must be positive, which callers check.
    pub(crate) fn new(capacity: usize, reserved: usize, label: Box<str>) -> Self {
        debug_assert!(capacity > 0);
        Channel(Arc::new(Shared {
            lockable: Mutex::new(Lockable {
                elems: Ring::with_capacity(capacity + reserved),
                closed: false,
            }),
            capacity,
            occupancy: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            not_empty_async: Notify::new(),
            not_full_async: Notify::new(),
            counters: Counters::default(),
            label,
        }))
    }

    // clone another handle to the channel.
    pub(crate) fn clone(&self) -> Self {
        Channel(Arc::clone(&self.0))
    }

    pub(crate) fn capacity(&self) -> usize {
        self.0.capacity
    }

    pub(crate) fn label(&self) -> &str {
        &self.0.label
    }

    pub(crate) fn counters(&self) -> &Counters {
        &self.0.counters
    }

    // atomic-read the occupancy without locking.
    pub(crate) fn occupancy(&self) -> usize {
        self.0.occupancy.load(Acquire)
    }

    // atomic-read the closed flag without locking.
    pub(crate) fn is_closed(&self) -> bool {
        self.0.closed.load(Acquire)
    }

    // the notify for an async wait on the given condition.
    pub(crate) fn notify(&self, cond: Cond) -> &Notify {
        match cond {
            Cond::NotEmpty => &self.0.not_empty_async,
            Cond::NotFull => &self.0.not_full_async,
        }
    }

    // lock the channel
    pub(crate) fn lock(&self) -> Lock<'_, T> {
        Lock {
            shared: &self.0,
            lock: self.0.lockable.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

// lock on a channel.
pub(crate) struct Lock<'a, T> {
    shared: &'a Shared<T>,
    lock: MutexGuard<'a, Lockable<T>>,
}

impl<'a, T> Lock<'a, T> {
    pub(crate) fn is_closed(&self) -> bool {
        self.lock.closed
    }

    // push an ordinary element, unless closed or at capacity.
    pub(crate) fn push(&mut self, elem: T) -> Result<(), (T, Refusal)> {
        if self.lock.closed {
            return Err((elem, Refusal::Closed));
        }
        if self.lock.elems.len() >= self.shared.capacity {
            return Err((elem, Refusal::Full));
        }
        self.push_unchecked(elem).map_err(|elem| (elem, Refusal::Full))?;
        self.shared.counters.admitted.fetch_add(1, Relaxed);
        Ok(())
    }

    // push into a reserved slot, ignoring capacity and the closed flag. fails only if every slot
    // including reserved ones is taken.
    pub(crate) fn push_reserved(&mut self, elem: T) -> Result<(), T> {
        self.push_unchecked(elem)
    }

    fn push_unchecked(&mut self, elem: T) -> Result<(), T> {
        self.lock.elems.push(elem)?;
        self.shared.occupancy.fetch_add(1, Release);

        // notify the next receiver
        self.shared.not_empty.notify_one();
        self.shared.not_empty_async.notify_one();
        Ok(())
    }

    // pop the front element to hand to a receiver.
    pub(crate) fn pop(&mut self) -> Option<T> {
        let elem = self.pop_unchecked()?;
        self.shared.counters.dequeued.fetch_add(1, Relaxed);
        Some(elem)
    }

    // pop the front element to discard it in favor of a newer one.
    pub(crate) fn evict(&mut self) -> Option<T> {
        let elem = self.pop_unchecked()?;
        self.shared.counters.evicted.fetch_add(1, Relaxed);
        Some(elem)
    }

    fn pop_unchecked(&mut self) -> Option<T> {
        let elem = self.lock.elems.pop()?;
        self.shared.occupancy.fetch_sub(1, Release);

        // notify the next sender
        self.shared.not_full.notify_one();
        self.shared.not_full_async.notify_one();
        Some(elem)
    }

    // close the channel to sends and wake every waiter. returns whether this call closed it.
    pub(crate) fn close(&mut self) -> bool {
        if self.lock.closed {
            return false;
        }
        self.lock.closed = true;
        self.shared.closed.store(true, Release);
        self.shared.not_empty.notify_all();
        self.shared.not_full.notify_all();
        self.shared.not_empty_async.notify_waiters();
        self.shared.not_full_async.notify_waiters();
        true
    }

    // block on the condition until notified or the deadline passes, releasing the lock while
    // blocked. returns none without blocking if the deadline has already passed.
    //
    // may wake spuriously. callers must check their condition again.
    pub(crate) fn wait(self, cond: Cond, deadline: Deadline) -> Option<Self> {
        let Lock { shared, lock } = self;
        let condvar = match cond {
            Cond::NotEmpty => &shared.not_empty,
            Cond::NotFull => &shared.not_full,
        };
        let lock = match deadline.remaining() {
            Remaining::Forever => condvar.wait(lock).unwrap_or_else(PoisonError::into_inner),
            Remaining::For(duration) => condvar
                .wait_timeout(lock, duration)
                .unwrap_or_else(PoisonError::into_inner)
                .0,
            Remaining::Elapsed => return None,
        };
        Some(Lock { shared, lock })
    }
}
