//! Graceful shutdown over a bounded channel.
//!
//! A shutdown channel carries [`Envelope`]s: real items, plus a single [`Sentinel`] which the
//! producer side enqueues to tell consumers that nothing follows. Consumers recognise their
//! channel's sentinel by its [`SentinelId`], so no real item can ever be mistaken for it, however
//! it compares.
//!
//! ```
//! let (producer, consumer) = sluice::shutdown::channel(16).unwrap();
//! producer.try_enqueue("a").unwrap();
//! producer.try_enqueue("b").unwrap();
//! producer.signal_shutdown().unwrap();
//!
//! assert_eq!(consumer.dequeue_blocking(None), Ok(Some("a")));
//! assert_eq!(consumer.dequeue_blocking(None), Ok(Some("b")));
//! assert_eq!(consumer.dequeue_blocking(None), Ok(None));
//! assert!(producer.try_enqueue("c").is_err());
//! ```

use crate::{
    channel::{
        api::{Admission, BoundedChannel, Batch, ChannelStats, DropPolicy},
        error::*,
        Deadline,
    },
    config::ChannelConfig,
    util::atomic_take::AtomicTake,
};
use std::{
    fmt::{self, Formatter, Debug},
    sync::{
        atomic::{
            Ordering::{Relaxed, Acquire, AcqRel},
            AtomicBool,
            AtomicU64,
            AtomicUsize,
        },
        Arc,
    },
    time::Duration,
};


/// Process-unique identity of a [`Sentinel`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SentinelId(u64);

/// End-of-stream marker
///
/// Deliberately not `Clone` and not comparable: a sentinel is only ever recognised by its
/// [`id`](Self::id), and each minted sentinel has an id no other has.
#[derive(Debug)]
pub struct Sentinel {
    id: SentinelId,
}

impl Sentinel {
    /// Create a sentinel with a fresh id.
    pub fn mint() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Sentinel { id: SentinelId(NEXT_ID.fetch_add(1, Relaxed)) }
    }

    pub fn id(&self) -> SentinelId {
        self.id
    }
}

/// Item carried on a shutdown channel.
#[derive(Debug)]
pub enum Envelope<T> {
    Real(T),
    Sentinel(Sentinel),
}

/// Stage of a shutdown channel's lifecycle
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Sends are accepted.
    Running,
    /// Shutdown has been signalled. Sends fail, and buffered items are still being received.
    Draining,
    /// The sentinel has been received and every receive returns `None`.
    Terminated,
}

// state shared by every handle to a shutdown channel.
struct State {
    // the channel's sentinel, until it is enqueued.
    sentinel: AtomicTake<Sentinel>,
    sentinel_id: SentinelId,
    // begins false. once true, never changes again.
    terminated: AtomicBool,
    // number of live producer handles.
    producers: AtomicUsize,
}

// what an envelope turned out to hold.
enum Opened<T> {
    Real(T),
    Terminated,
    Discarded,
}

/// Create a shutdown channel which buffers at most `capacity` real items
///
/// Errors if `capacity` is zero.
pub fn channel<T>(capacity: usize) -> Result<(Producer<T>, Consumer<T>), InvalidCapacityError> {
    channel_with_config(ChannelConfig::new(capacity))
}

/// Create a shutdown channel which uses the given sentinel.
pub fn channel_with_sentinel<T>(
    capacity: usize,
    sentinel: Sentinel,
) -> Result<(Producer<T>, Consumer<T>), InvalidCapacityError> {
    build(ChannelConfig::new(capacity), sentinel)
}

/// Create a shutdown channel from a config.
pub fn channel_with_config<T>(
    config: ChannelConfig,
) -> Result<(Producer<T>, Consumer<T>), InvalidCapacityError> {
    build(config, Sentinel::mint())
}

fn build<T>(
    config: ChannelConfig,
    sentinel: Sentinel,
) -> Result<(Producer<T>, Consumer<T>), InvalidCapacityError> {
    config.validate()?;
    // one reserved slot, so the sentinel can always be enqueued
    let channel = BoundedChannel::with_reserved(config, 1);
    let state = Arc::new(State {
        sentinel_id: sentinel.id(),
        sentinel: AtomicTake::new(sentinel),
        terminated: AtomicBool::new(false),
        producers: AtomicUsize::new(1),
    });
    let producer = Producer { channel: channel.clone(), state: Arc::clone(&state) };
    let consumer = Consumer { channel, state };
    Ok((producer, consumer))
}

// take back an item refused by the channel. only real items are ever sent through a producer.
fn unwrap_real<T>(envelope: Envelope<T>) -> T {
    match envelope {
        Envelope::Real(item) => item,
        Envelope::Sentinel(_) => unreachable!("producer sent a sentinel as an ordinary item"),
    }
}

fn phase<T>(channel: &BoundedChannel<Envelope<T>>, state: &State) -> Phase {
    if state.terminated.load(Acquire) {
        Phase::Terminated
    } else if channel.is_closed() {
        Phase::Draining
    } else {
        Phase::Running
    }
}


/// Sending half of a shutdown channel
///
/// Cloning creates another handle to the same channel. Dropping the last producer signals
/// shutdown if nobody has yet.
pub struct Producer<T> {
    channel: BoundedChannel<Envelope<T>>,
    state: Arc<State>,
}

impl<T> Producer<T> {
    /// Try to send without blocking, dropping the item if the channel is full
    ///
    /// See [`BoundedChannel::try_enqueue`]. Errors once shutdown has been signalled.
    pub fn try_enqueue(&self, item: T) -> Result<bool, ClosedError> {
        self.channel.try_enqueue(Envelope::Real(item))
    }

    /// Try to send without blocking, handing the item back if it can't be admitted.
    pub fn try_send(&self, item: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(Envelope::Real(item)).map_err(|e| e.map_msg(unwrap_real))
    }

    /// Send without blocking, resolving a full channel with the given policy.
    pub fn offer(&self, item: T, policy: DropPolicy) -> Result<Admission<T>, ClosedError> {
        Ok(match self.channel.offer(Envelope::Real(item), policy)? {
            Admission::Admitted => Admission::Admitted,
            Admission::Dropped => Admission::Dropped,
            Admission::Evicted(Envelope::Real(old)) => Admission::Evicted(old),
            // a foreign sentinel was evicted, which nobody needs back
            Admission::Evicted(Envelope::Sentinel(_)) => Admission::Admitted,
        })
    }

    /// Send, blocking until there is space or the timeout elapses.
    pub fn enqueue_blocking(
        &self,
        item: T,
        timeout: Option<Duration>,
    ) -> Result<(), SendError<T, SendTimeoutError>> {
        self.channel
            .enqueue_deadline(Envelope::Real(item), Deadline::after(timeout))
            .map_err(|e| e.map_msg(unwrap_real))
    }

    /// Send, waiting asynchronously until there is space.
    pub async fn enqueue_async(&self, item: T) -> Result<(), SendError<T, ClosedError>> {
        self.channel
            .enqueue_async(Envelope::Real(item))
            .await
            .map_err(|e| e.map_msg(unwrap_real))
    }

    /// Signal that nothing more will be sent
    ///
    /// Enqueues the sentinel behind every item already buffered and closes the channel to sends,
    /// as one atomic step. The sentinel goes into a slot reserved for it, so this never blocks
    /// and succeeds even while the channel is full. Errors if shutdown was already signalled.
    pub fn signal_shutdown(&self) -> Result<(), AlreadySignalledError> {
        if self.raise() {
            debug!(channel = %self.channel.label(), "shutdown signalled");
            Ok(())
        } else {
            warn!(channel = %self.channel.label(), "shutdown signalled more than once");
            Err(AlreadySignalledError)
        }
    }

    // enqueue the sentinel and close, unless already done. returns whether this call did it.
    fn raise(&self) -> bool {
        let mut lock = self.channel.core().lock();
        let Some(sentinel) = self.state.sentinel.take() else {
            return false;
        };
        let pushed = lock.push_reserved(Envelope::Sentinel(sentinel)).is_ok();
        debug_assert!(pushed, "sentinel slot already taken");
        lock.close();
        true
    }

    // send an arbitrary envelope, bypassing the real-items-only API.
    #[cfg(test)]
    fn inject(&self, envelope: Envelope<T>) -> Result<(), TrySendError<Envelope<T>>> {
        self.channel.try_send(envelope)
    }

    /// Current lifecycle stage.
    pub fn phase(&self) -> Phase {
        phase(&self.channel, &self.state)
    }

    /// Id of the sentinel this channel's consumers wait for.
    pub fn sentinel_id(&self) -> SentinelId {
        self.state.sentinel_id
    }

    /// Approximate number of buffered envelopes, including the sentinel once enqueued.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Maximum number of buffered real items.
    pub fn capacity(&self) -> usize {
        self.channel.capacity()
    }

    pub fn stats(&self) -> ChannelStats {
        self.channel.stats()
    }
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        self.state.producers.fetch_add(1, Relaxed);
        Producer {
            channel: self.channel.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        if self.state.producers.fetch_sub(1, AcqRel) == 1 && self.raise() {
            debug!(channel = %self.channel.label(), "last producer dropped, shutdown signalled");
        }
    }
}

impl<T> Debug for Producer<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Producer")
            .field("channel", &self.channel)
            .field("phase", &self.phase())
            .finish()
    }
}


/// Receiving half of a shutdown channel
///
/// Every receive returns `Some` for a real item and `None` once the channel has terminated.
/// Cloning creates another handle to the same channel, and all consumers terminate together.
pub struct Consumer<T> {
    channel: BoundedChannel<Envelope<T>>,
    state: Arc<State>,
}

impl<T> Consumer<T> {
    // classify a received envelope, terminating on our own sentinel.
    fn open(&self, envelope: Envelope<T>) -> Opened<T> {
        match envelope {
            Envelope::Real(item) => Opened::Real(item),
            Envelope::Sentinel(sentinel) if sentinel.id() == self.state.sentinel_id => {
                self.terminate();
                Opened::Terminated
            }
            Envelope::Sentinel(sentinel) => {
                warn!(
                    channel = %self.channel.label(),
                    sentinel = ?sentinel.id(),
                    "discarding sentinel from another channel",
                );
                Opened::Discarded
            }
        }
    }

    fn terminate(&self) {
        if !self.state.terminated.swap(true, AcqRel) {
            debug!(channel = %self.channel.label(), "shutdown complete");
        }
    }

    /// Receive, blocking until an item arrives, the channel terminates, or the timeout elapses
    ///
    /// A timeout of `None` waits indefinitely.
    pub fn dequeue_blocking(&self, timeout: Option<Duration>) -> Result<Option<T>, TimeoutError> {
        self.dequeue_deadline(Deadline::after(timeout))
    }

    fn dequeue_deadline(&self, deadline: Deadline) -> Result<Option<T>, TimeoutError> {
        loop {
            match self.channel.dequeue_deadline(deadline) {
                Ok(envelope) => match self.open(envelope) {
                    Opened::Real(item) => return Ok(Some(item)),
                    Opened::Terminated => return Ok(None),
                    Opened::Discarded => (),
                },
                // closed and drained, so another consumer took the sentinel
                Err(RecvTimeoutError::Closed(_)) => {
                    self.terminate();
                    return Ok(None);
                }
                Err(RecvTimeoutError::Timeout(e)) => return Err(e),
            }
        }
    }

    /// Try to receive without blocking
    ///
    /// Errors if nothing is buffered and the channel hasn't terminated.
    pub fn try_dequeue(&self) -> Result<Option<T>, EmptyError> {
        loop {
            match self.channel.try_dequeue() {
                Ok(envelope) => match self.open(envelope) {
                    Opened::Real(item) => return Ok(Some(item)),
                    Opened::Terminated => return Ok(None),
                    Opened::Discarded => (),
                },
                Err(TryRecvError::Closed(_)) => {
                    self.terminate();
                    return Ok(None);
                }
                Err(TryRecvError::Empty(e)) => return Err(e),
            }
        }
    }

    /// Receive, waiting asynchronously until an item arrives or the channel terminates.
    pub async fn dequeue_async(&self) -> Option<T> {
        loop {
            match self.channel.dequeue_async().await {
                Ok(envelope) => match self.open(envelope) {
                    Opened::Real(item) => return Some(item),
                    Opened::Terminated => return None,
                    Opened::Discarded => (),
                },
                Err(ClosedError) => {
                    self.terminate();
                    return None;
                }
            }
        }
    }

    /// Receive up to `max` real items without blocking
    ///
    /// The batch may hold fewer than `max` items even if more are buffered, when a sentinel was
    /// among those received. Check [`phase`](Self::phase) to tell whether the channel terminated.
    pub fn try_dequeue_batch(&self, max: usize) -> Batch<T> {
        self.channel
            .try_dequeue_batch(max)
            .into_iter()
            .filter_map(|envelope| match self.open(envelope) {
                Opened::Real(item) => Some(item),
                Opened::Terminated | Opened::Discarded => None,
            })
            .collect()
    }

    /// Receive and process items until the channel terminates
    ///
    /// Returns how many items were processed, or the first error `process` returns. An item
    /// whose processing failed is not counted.
    pub fn drain<E>(&self, mut process: impl FnMut(T) -> Result<(), E>) -> Result<usize, E> {
        let mut count = 0;
        while let Ok(Some(item)) = self.dequeue_deadline(Deadline::NEVER) {
            process(item)?;
            count += 1;
        }
        Ok(count)
    }

    /// Current lifecycle stage.
    pub fn phase(&self) -> Phase {
        phase(&self.channel, &self.state)
    }

    /// Id of the sentinel this consumer waits for.
    pub fn sentinel_id(&self) -> SentinelId {
        self.state.sentinel_id
    }

    /// Approximate number of buffered envelopes, including the sentinel once enqueued.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn stats(&self) -> ChannelStats {
        self.channel.stats()
    }
}

impl<T> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Consumer {
            channel: self.channel.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Debug for Consumer<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("channel", &self.channel)
            .field("phase", &self.phase())
            .finish()
    }
}
