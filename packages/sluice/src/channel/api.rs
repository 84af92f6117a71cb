// exposed API of channels

use super::{
    error::*,
    core::{self, Cond, Refusal},
    polling::Deadline,
};
use crate::config::ChannelConfig;
use smallvec::SmallVec;
use std::{
    fmt::{self, Formatter, Debug},
    pin::pin,
    sync::atomic::Ordering::Relaxed,
    time::Duration,
};


/// Number of items a batch holds before spilling to the heap.
pub const BATCH_INLINE: usize = 8;

/// Items received by [`BoundedChannel::try_dequeue_batch`].
pub type Batch<T> = SmallVec<[T; BATCH_INLINE]>;


// convert a core push refusal into the exposed error.
fn refusal_error<T>((msg, refusal): (T, Refusal)) -> TrySendError<T> {
    let cause = match refusal {
        Refusal::Full => FullError.into(),
        Refusal::Closed => ClosedError.into(),
    };
    SendError { msg, cause }
}


/// What to do with an item offered to a full channel
///
/// The channel itself only provides the primitives. This is how a caller names its choice at the
/// point of the call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DropPolicy {
    /// Drop the item being offered.
    DropNewest,
    /// Evict the item at the front of the channel and admit the offered one.
    DropOldest,
}

/// Outcome of [`BoundedChannel::offer`]
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Admission<T> {
    /// The item was admitted without displacing anything.
    Admitted,
    /// The channel was full and the offered item was dropped.
    Dropped,
    /// The channel was full, so this item was evicted from the front to admit the offered one.
    Evicted(T),
}

/// Snapshot of a channel's event counters
///
/// Counters are read individually, so a snapshot taken while the channel is in use may be
/// slightly inconsistent between fields.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ChannelStats {
    /// Items admitted by any send operation.
    pub admitted: u64,
    /// Items dropped by [`try_enqueue`](BoundedChannel::try_enqueue) or
    /// [`DropPolicy::DropNewest`] because the channel was full.
    pub dropped: u64,
    /// Items evicted by [`DropPolicy::DropOldest`].
    pub evicted: u64,
    /// Items handed to receivers.
    pub dequeued: u64,
}


/// Bounded multi-producer multi-consumer channel
///
/// Items are buffered in a ring allocated once at construction, so capacity is enforced by slot
/// availability and a send never needs to count what is already queued. Handles are cheap to
/// clone and every clone refers to the same channel.
///
/// Items are received in the order they were admitted. Only the `*_blocking` and `*_async`
/// methods ever wait.
pub struct BoundedChannel<T>(core::Channel<T>);

impl<T> BoundedChannel<T> {
    /// Create a channel which buffers at most `capacity` items
    ///
    /// Errors if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, InvalidCapacityError> {
        Self::with_config(ChannelConfig::new(capacity))
    }

    /// Create a channel from a config
    ///
    /// Errors if the configured capacity is zero.
    pub fn with_config(config: ChannelConfig) -> Result<Self, InvalidCapacityError> {
        config.validate()?;
        Ok(Self::with_reserved(config, 0))
    }

    // create a channel with `reserved` extra slots only `core::Lock::push_reserved` may fill.
    // config must already be validated.
    pub(crate) fn with_reserved(config: ChannelConfig, reserved: usize) -> Self {
        BoundedChannel(core::Channel::new(config.capacity, reserved, config.label.into()))
    }

    pub(crate) fn core(&self) -> &core::Channel<T> {
        &self.0
    }

    /// Try to send without blocking, dropping the item if the channel is full
    ///
    /// Returns `Ok(true)` if the item was admitted and `Ok(false)` if it was dropped. Dropping is
    /// an expected outcome under load and is counted in [`stats`](Self::stats). Errors only if
    /// the channel is closed, in which case the item is dropped as well.
    pub fn try_enqueue(&self, msg: T) -> Result<bool, ClosedError> {
        match self.try_send(msg) {
            Ok(()) => Ok(true),
            Err(SendError { cause: TrySendErrorCause::Full(_), .. }) => {
                self.0.counters().dropped.fetch_add(1, Relaxed);
                trace!(channel = %self.0.label(), "channel full, dropped newest item");
                Ok(false)
            }
            Err(SendError { cause: TrySendErrorCause::Closed(e), .. }) => Err(e),
        }
    }

    /// Try to send without blocking, handing the item back if it can't be admitted
    pub fn try_send(&self, msg: T) -> Result<(), TrySendError<T>> {
        if self.0.is_closed() {
            return Err(SendError { msg, cause: ClosedError.into() });
        }
        if self.0.occupancy() >= self.0.capacity() {
            return Err(SendError { msg, cause: FullError.into() });
        }
        self.0.lock().push(msg).map_err(refusal_error)
    }

    /// Send without blocking, resolving a full channel with the given policy
    ///
    /// Errors if the channel is closed, in which case the item is dropped.
    pub fn offer(&self, msg: T, policy: DropPolicy) -> Result<Admission<T>, ClosedError> {
        match policy {
            DropPolicy::DropNewest => self.try_enqueue(msg)
                .map(|admitted| if admitted { Admission::Admitted } else { Admission::Dropped }),
            DropPolicy::DropOldest => {
                let mut lock = self.0.lock();
                match lock.push(msg) {
                    Ok(()) => Ok(Admission::Admitted),
                    Err((_, Refusal::Closed)) => Err(ClosedError),
                    Err((msg, Refusal::Full)) => {
                        let evicted = lock.evict();
                        // the lock is still held, so the slot just freed can't be taken
                        match (lock.push(msg), evicted) {
                            (Ok(()), Some(old)) => {
                                trace!(channel = %self.0.label(), "channel full, evicted oldest item");
                                Ok(Admission::Evicted(old))
                            }
                            (Ok(()), None) => Ok(Admission::Admitted),
                            (Err(_), _) => {
                                self.0.counters().dropped.fetch_add(1, Relaxed);
                                Ok(Admission::Dropped)
                            }
                        }
                    }
                }
            }
        }
    }

    /// Send, blocking until there is space or the timeout elapses
    ///
    /// A timeout of `None` waits indefinitely. On error the item is handed back and the channel
    /// is unchanged.
    pub fn enqueue_blocking(
        &self,
        msg: T,
        timeout: Option<Duration>,
    ) -> Result<(), SendError<T, SendTimeoutError>> {
        self.enqueue_deadline(msg, Deadline::after(timeout))
    }

    pub(crate) fn enqueue_deadline(
        &self,
        mut msg: T,
        deadline: Deadline,
    ) -> Result<(), SendError<T, SendTimeoutError>> {
        let mut lock = self.0.lock();
        loop {
            msg = match lock.push(msg) {
                Ok(()) => return Ok(()),
                Err((msg, Refusal::Closed)) => {
                    return Err(SendError { msg, cause: ClosedError.into() });
                }
                Err((msg, Refusal::Full)) => msg,
            };
            lock = match lock.wait(Cond::NotFull, deadline) {
                Some(lock) => lock,
                None => return Err(SendError { msg, cause: TimeoutError.into() }),
            };
        }
    }

    /// Send, waiting asynchronously until there is space
    ///
    /// To bound the wait, wrap this in `tokio::time::timeout`. Cancelling the wait drops the
    /// item without sending it.
    pub async fn enqueue_async(&self, mut msg: T) -> Result<(), SendError<T, ClosedError>> {
        loop {
            // register interest before checking, so a slot freed in between isn't missed
            let mut notified = pin!(self.0.notify(Cond::NotFull).notified());
            notified.as_mut().enable();
            msg = match self.try_send(msg) {
                Ok(()) => return Ok(()),
                Err(SendError { msg, cause: TrySendErrorCause::Closed(e) }) => {
                    return Err(SendError { msg, cause: e });
                }
                Err(SendError { msg, cause: TrySendErrorCause::Full(_) }) => msg,
            };
            notified.await;
        }
    }

    /// Try to receive without blocking
    ///
    /// Errors with [`ClosedError`] only once the channel is closed and every buffered item has
    /// been received.
    pub fn try_dequeue(&self) -> Result<T, TryRecvError> {
        if self.0.occupancy() == 0 && !self.0.is_closed() {
            return Err(EmptyError.into());
        }
        let mut lock = self.0.lock();
        match lock.pop() {
            Some(msg) => Ok(msg),
            None if lock.is_closed() => Err(ClosedError.into()),
            None => Err(EmptyError.into()),
        }
    }

    /// Receive up to `max` items without blocking
    ///
    /// Takes the lock once for the whole batch. Returns an empty batch if nothing is buffered,
    /// whether or not the channel is closed.
    pub fn try_dequeue_batch(&self, max: usize) -> Batch<T> {
        let mut batch = Batch::new();
        if max == 0 || self.0.occupancy() == 0 {
            return batch;
        }
        let mut lock = self.0.lock();
        while batch.len() < max {
            let Some(msg) = lock.pop() else { break };
            batch.push(msg);
        }
        batch
    }

    /// Receive, blocking until an item arrives or the timeout elapses
    ///
    /// A timeout of `None` waits indefinitely. Errors with [`ClosedError`] once the channel is
    /// closed and every buffered item has been received.
    pub fn dequeue_blocking(&self, timeout: Option<Duration>) -> Result<T, RecvTimeoutError> {
        self.dequeue_deadline(Deadline::after(timeout))
    }

    pub(crate) fn dequeue_deadline(&self, deadline: Deadline) -> Result<T, RecvTimeoutError> {
        let mut lock = self.0.lock();
        loop {
            if let Some(msg) = lock.pop() {
                return Ok(msg);
            }
            if lock.is_closed() {
                return Err(ClosedError.into());
            }
            lock = lock.wait(Cond::NotEmpty, deadline).ok_or(TimeoutError)?;
        }
    }

    /// Receive, waiting asynchronously until an item arrives
    ///
    /// Errors once the channel is closed and every buffered item has been received.
    pub async fn dequeue_async(&self) -> Result<T, ClosedError> {
        loop {
            let mut notified = pin!(self.0.notify(Cond::NotEmpty).notified());
            notified.as_mut().enable();
            match self.try_dequeue() {
                Ok(msg) => return Ok(msg),
                Err(TryRecvError::Closed(e)) => return Err(e),
                Err(TryRecvError::Empty(_)) => (),
            }
            notified.await;
        }
    }

    /// Close the channel
    ///
    /// All further sends fail with [`ClosedError`]. Buffered items can still be received, after
    /// which receives fail with [`ClosedError`] too. Every blocked or waiting caller is woken.
    /// Returns whether this call was the one to close it.
    pub fn close(&self) -> bool {
        let closed = self.0.lock().close();
        if closed {
            debug!(channel = %self.0.label(), "channel closed");
        }
        closed
    }

    /// Whether the channel has been closed.
    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }

    /// Number of buffered items
    ///
    /// Read without locking, so it may already be out of date when it returns.
    pub fn len(&self) -> usize {
        self.0.occupancy()
    }

    /// Whether nothing is buffered. Same caveat as [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of buffered items.
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// The label from the channel's config.
    pub fn label(&self) -> &str {
        self.0.label()
    }

    /// Snapshot of the channel's event counters.
    pub fn stats(&self) -> ChannelStats {
        let counters = self.0.counters();
        ChannelStats {
            admitted: counters.admitted.load(Relaxed),
            dropped: counters.dropped.load(Relaxed),
            evicted: counters.evicted.load(Relaxed),
            dequeued: counters.dequeued.load(Relaxed),
        }
    }
}

impl<T> Clone for BoundedChannel<T> {
    fn clone(&self) -> Self {
        BoundedChannel(self.0.clone())
    }
}

impl<T> Debug for BoundedChannel<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("BoundedChannel")
            .field("label", &self.label())
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}


// ==== tests ====


#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_pcg::Pcg32;
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicBool, Ordering::SeqCst},
            Arc,
            Barrier,
        },
        thread,
        time::Instant,
    };

    fn new_rng() -> impl Rng {
        Pcg32::from_seed(0xdeadbeefdeadbeefdeadbeefdeadbeefu128.to_le_bytes())
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(BoundedChannel::<u8>::new(0).unwrap_err(), InvalidCapacityError);
        assert!(BoundedChannel::<u8>::new(1).is_ok());
    }

    #[test]
    fn capacity_two_end_to_end() {
        let channel = BoundedChannel::new(2).unwrap();
        assert_eq!(channel.try_enqueue('A'), Ok(true));
        assert_eq!(channel.try_enqueue('B'), Ok(true));
        assert_eq!(channel.try_enqueue('C'), Ok(false));
        assert_eq!(channel.len(), 2);
        assert_eq!(channel.dequeue_blocking(None), Ok('A'));
        assert_eq!(channel.try_enqueue('C'), Ok(true));
        assert_eq!(channel.dequeue_blocking(None), Ok('B'));
        assert_eq!(channel.dequeue_blocking(None), Ok('C'));
        assert_eq!(channel.try_dequeue(), Err(TryRecvError::Empty(EmptyError)));
        assert_eq!(
            channel.stats(),
            ChannelStats { admitted: 3, dropped: 1, evicted: 0, dequeued: 3 },
        );
    }

    #[test]
    fn try_send_hands_item_back() {
        let channel = BoundedChannel::new(1).unwrap();
        channel.try_send(1).unwrap();
        let e = channel.try_send(2).unwrap_err();
        assert_eq!(e, SendError { msg: 2, cause: FullError.into() });
        channel.close();
        let e = channel.try_send(3).unwrap_err();
        assert_eq!(e, SendError { msg: 3, cause: ClosedError.into() });
    }

    #[test]
    fn offer_policies() {
        let channel = BoundedChannel::new(2).unwrap();
        assert_eq!(channel.offer(1, DropPolicy::DropOldest), Ok(Admission::Admitted));
        assert_eq!(channel.offer(2, DropPolicy::DropNewest), Ok(Admission::Admitted));
        assert_eq!(channel.offer(3, DropPolicy::DropNewest), Ok(Admission::Dropped));
        assert_eq!(channel.offer(4, DropPolicy::DropOldest), Ok(Admission::Evicted(1)));
        assert_eq!(channel.try_dequeue(), Ok(2));
        assert_eq!(channel.try_dequeue(), Ok(4));
        let stats = channel.stats();
        assert_eq!((stats.dropped, stats.evicted), (1, 1));

        channel.close();
        assert_eq!(channel.offer(5, DropPolicy::DropOldest), Err(ClosedError));
        assert_eq!(channel.offer(5, DropPolicy::DropNewest), Err(ClosedError));
    }

    #[test]
    fn blocking_timeouts_have_no_effect() {
        let channel = BoundedChannel::new(1).unwrap();
        let timeout = Some(Duration::from_millis(20));
        assert_eq!(channel.dequeue_blocking(timeout), Err(TimeoutError.into()));

        channel.enqueue_blocking("a", timeout).unwrap();
        let start = Instant::now();
        let e = channel.enqueue_blocking("b", timeout).unwrap_err();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(e, SendError { msg: "b", cause: TimeoutError.into() });
        assert_eq!(channel.len(), 1);
        assert_eq!(channel.stats().admitted, 1);
        assert_eq!(channel.try_dequeue(), Ok("a"));
    }

    #[test]
    fn close_drains_then_errors() {
        let channel = BoundedChannel::new(4).unwrap();
        channel.try_enqueue(1).unwrap();
        channel.try_enqueue(2).unwrap();
        assert!(channel.close());
        assert!(!channel.close());
        assert_eq!(channel.try_enqueue(3), Err(ClosedError));
        assert_eq!(
            channel.enqueue_blocking(3, None).unwrap_err().cause,
            SendTimeoutError::Closed(ClosedError),
        );
        assert_eq!(channel.try_dequeue(), Ok(1));
        assert_eq!(channel.dequeue_blocking(None), Ok(2));
        assert_eq!(channel.try_dequeue(), Err(ClosedError.into()));
        assert_eq!(channel.dequeue_blocking(None), Err(ClosedError.into()));
    }

    #[test]
    fn close_wakes_blocked_receivers() {
        let channel = BoundedChannel::<u32>::new(1).unwrap();
        let joins = (0..3)
            .map(|_| {
                let channel = channel.clone();
                thread::spawn(move || channel.dequeue_blocking(Some(Duration::from_secs(10))))
            })
            .collect::<Vec<_>>();
        thread::sleep(Duration::from_millis(50));
        channel.close();
        for join in joins {
            assert_eq!(join.join().unwrap(), Err(ClosedError.into()));
        }
    }

    #[test]
    fn batch_dequeue() {
        let channel = BoundedChannel::new(16).unwrap();
        for i in 0..12 {
            channel.try_enqueue(i).unwrap();
        }
        assert!(channel.try_dequeue_batch(0).is_empty());
        assert_eq!(&channel.try_dequeue_batch(5)[..], &[0, 1, 2, 3, 4]);
        assert_eq!(&channel.try_dequeue_batch(100)[..], &[5, 6, 7, 8, 9, 10, 11]);
        assert!(channel.try_dequeue_batch(100).is_empty());
    }

    #[test]
    fn random_ops_match_model() {
        let mut rng = new_rng();
        for capacity in [1, 2, 5, 32] {
            let channel = BoundedChannel::new(capacity).unwrap();
            let mut model = VecDeque::new();
            for i in 0u32..5_000 {
                match rng.gen_range(0..4) {
                    0 | 1 => {
                        let admitted = channel.try_enqueue(i).unwrap();
                        assert_eq!(admitted, model.len() < capacity);
                        if admitted {
                            model.push_back(i);
                        }
                    }
                    2 => {
                        let admission = channel.offer(i, DropPolicy::DropOldest).unwrap();
                        if model.len() == capacity {
                            assert_eq!(admission, Admission::Evicted(model.pop_front().unwrap()));
                        } else {
                            assert_eq!(admission, Admission::Admitted);
                        }
                        model.push_back(i);
                    }
                    _ => assert_eq!(channel.try_dequeue().ok(), model.pop_front()),
                }
                assert_eq!(channel.len(), model.len());
                assert!(channel.len() <= capacity);
            }
        }
    }

    #[test]
    fn concurrent_occupancy_never_exceeds_capacity() {
        const CAPACITY: usize = 8;
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 2_000;

        let channel = BoundedChannel::new(CAPACITY).unwrap();
        let done = Arc::new(AtomicBool::new(false));

        let watcher = {
            let channel = channel.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(SeqCst) {
                    assert!(channel.len() <= CAPACITY);
                }
            })
        };

        let producers = (0..PRODUCERS)
            .map(|p| {
                let channel = channel.clone();
                thread::spawn(move || {
                    let mut rng = Pcg32::seed_from_u64(p as u64);
                    for i in 0..PER_PRODUCER {
                        let msg = (p, i);
                        if rng.gen_bool(0.5) {
                            channel.enqueue_blocking(msg, Some(Duration::from_secs(10))).unwrap();
                        } else {
                            let mut msg = msg;
                            loop {
                                match channel.try_send(msg) {
                                    Ok(()) => break,
                                    Err(e) => {
                                        msg = e.msg;
                                        thread::yield_now();
                                    }
                                }
                            }
                        }
                    }
                })
            })
            .collect::<Vec<_>>();

        let consumers = (0..3)
            .map(|c| {
                let channel = channel.clone();
                thread::spawn(move || {
                    let mut rng = Pcg32::seed_from_u64(100 + c);
                    let mut received = Vec::new();
                    loop {
                        let result = if rng.gen_bool(0.5) {
                            channel.dequeue_blocking(Some(Duration::from_secs(10)))
                        } else {
                            match channel.try_dequeue() {
                                Ok(msg) => Ok(msg),
                                Err(TryRecvError::Empty(_)) => {
                                    thread::yield_now();
                                    continue;
                                }
                                Err(TryRecvError::Closed(e)) => Err(e.into()),
                            }
                        };
                        match result {
                            Ok(msg) => received.push(msg),
                            Err(RecvTimeoutError::Closed(_)) => return received,
                            Err(RecvTimeoutError::Timeout(_)) => panic!("consumer timed out"),
                        }
                    }
                })
            })
            .collect::<Vec<_>>();

        for producer in producers {
            producer.join().unwrap();
        }
        channel.close();
        let received = consumers
            .into_iter()
            .map(|consumer| consumer.join().unwrap())
            .collect::<Vec<_>>();
        done.store(true, SeqCst);
        watcher.join().unwrap();

        // every item arrived exactly once, and each consumer saw each producer's items in order
        let mut total = 0;
        for msgs in &received {
            total += msgs.len();
            for p in 0..PRODUCERS {
                let seq = msgs.iter().filter(|(q, _)| *q == p).map(|&(_, i)| i).collect::<Vec<_>>();
                assert!(seq.windows(2).all(|w| w[0] < w[1]));
            }
        }
        assert_eq!(total, PRODUCERS * PER_PRODUCER);
        let stats = channel.stats();
        assert_eq!(stats.admitted as usize, PRODUCERS * PER_PRODUCER);
        assert_eq!(stats.dequeued as usize, PRODUCERS * PER_PRODUCER);
    }

    #[test]
    fn blocked_sender_resumes_when_space_frees() {
        let channel = BoundedChannel::new(1).unwrap();
        channel.try_enqueue(0).unwrap();
        let barrier = Arc::new(Barrier::new(2));
        let join = {
            let channel = channel.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                channel.enqueue_blocking(1, Some(Duration::from_secs(10)))
            })
        };
        barrier.wait();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(channel.dequeue_blocking(None), Ok(0));
        join.join().unwrap().unwrap();
        assert_eq!(channel.dequeue_blocking(Some(Duration::from_secs(10))), Ok(1));
    }

    // time a fixed workload of admissions, rejections, and removals against a channel held at
    // or near full.
    fn time_near_full(capacity: usize) -> Duration {
        const OPS: usize = 50_000;

        let channel = BoundedChannel::new(capacity).unwrap();
        for i in 0..capacity - 1 {
            assert!(channel.try_enqueue(i).unwrap());
        }
        let start = Instant::now();
        for i in 0..OPS {
            assert!(channel.try_enqueue(i).unwrap());
            assert!(!channel.try_enqueue(i).unwrap());
            channel.try_dequeue().unwrap();
        }
        start.elapsed()
    }

    #[test]
    fn enqueue_cost_independent_of_occupancy() {
        let best_of = |capacity| (0..3).map(|_| time_near_full(capacity)).min().unwrap();
        let small = best_of(16);
        let large = best_of(1 << 16);
        // a traversal would make the large channel thousands of times slower
        assert!(
            large < small * 10 + Duration::from_millis(20),
            "small: {:?}, large: {:?}", small, large,
        );
    }

    #[tokio::test]
    async fn async_round_trip() {
        let channel = BoundedChannel::new(2).unwrap();
        let consumer = {
            let channel = channel.clone();
            tokio::spawn(async move {
                let mut received = Vec::new();
                while let Ok(msg) = channel.dequeue_async().await {
                    received.push(msg);
                }
                received
            })
        };
        for i in 0..100 {
            channel.enqueue_async(i).await.unwrap();
        }
        channel.close();
        assert_eq!(consumer.await.unwrap(), (0..100).collect::<Vec<_>>());
        assert_eq!(
            channel.enqueue_async(100).await,
            Err(SendError { msg: 100, cause: ClosedError }),
        );
    }

    #[tokio::test]
    async fn async_enqueue_can_time_out() {
        let channel = BoundedChannel::new(1).unwrap();
        channel.enqueue_async(1).await.unwrap();
        let result = tokio::time::timeout(Duration::from_millis(20), channel.enqueue_async(2)).await;
        assert!(result.is_err());
        assert_eq!(channel.len(), 1);
        assert_eq!(channel.try_dequeue(), Ok(1));
    }
}
