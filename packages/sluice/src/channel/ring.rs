// fixed-size ring buffer part of a channel.

/// Ring buffer of `T` with a capacity fixed at construction
pub(crate) struct Ring<T> {
    // memory layout:
    //
    // - a "logical index" exists if it's in [0, len)
    // - logical index n maps to the storage index (start + n) % slots.len()
    // - a storage slot is Some iff a logical index maps to it
    start: usize,
    len: usize,
    slots: Box<[Option<T>]>,
}

impl<T> Ring<T> {
    /// Construct empty with room for exactly `cap` elements.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Ring {
            start: 0,
            len: 0,
            slots: (0..cap).map(|_| None).collect(),
        }
    }

    /// Elements in ring.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Total slots.
    pub(crate) fn cap(&self) -> usize {
        self.slots.len()
    }

    /// Push to back, or hand the element back if every slot is taken.
    pub(crate) fn push(&mut self, t: T) -> Result<(), T> {
        if self.len == self.cap() {
            return Err(t);
        }
        let idx = (self.start + self.len) % self.cap();
        debug_assert!(self.slots[idx].is_none());
        self.slots[idx] = Some(t);
        self.len += 1;
        Ok(())
    }

    /// Pop from front.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let t = self.slots[self.start].take();
        debug_assert!(t.is_some());
        self.start = (self.start + 1) % self.cap();
        self.len -= 1;
        t
    }
}
