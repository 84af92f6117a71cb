// implementation of the bounded channel.
//
// the architecture is as such:
//
// channel handles wrap around Arc<shared state>
//                                   |
//          /------------------------/
//          v
//       shared state
//          |
//          |------ it contains a Mutex around a ring::Ring<T>, which is a fixed-size,
//          |       not-itself-concurrent buffer allocated once at construction. capacity is
//          |       enforced by slot availability, never by counting elements.
//          |
//          |------ it contains an occupancy counter and a closed flag, both atomic, which are
//          |       only written under the lock but may be read without it to reject sends early.
//          |
//          \------ it contains a not-empty and a not-full condvar for blocking callers, and a
//                  tokio Notify for each for async callers.
//
// the ring may have reserved slots beyond the capacity. these can only be filled by a push which
// bypasses backpressure, which the shutdown protocol uses to deliver its sentinel even when the
// channel is full.
//
// the organization of these modules is as such:
//
//      ring<-----------core: presents a minimal abstraction for the channel which is safe and
//                      ^     consistent under the lock, but inconvenient.
//                      |
//      polling<--------api: wraps core into the exposed, convenient API. the crate re-exports
//                            this API publically.
//
// there is also the error module, which contains the relevant error types, which is also
// re-exported publically.

pub(crate) mod error;
pub(crate) mod api;

mod ring;
mod polling;
mod core;

pub(crate) use self::polling::Deadline;
