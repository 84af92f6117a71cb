//! Bounded ingest channel with graceful shutdown.
//!
//! - [`BoundedChannel`] is a multi-producer multi-consumer channel whose capacity is enforced in
//!   constant time, with non-blocking, blocking, and async operations.
//! - [`shutdown`] layers a sentinel-based shutdown protocol on top, so consumers can tell when
//!   every item sent before shutdown has been received.
//! - [`store::KeyedStore`] is a concurrent map keyed by sealed [`binkey::BinaryKey`]s.
//!
//! ```
//! use sluice::BoundedChannel;
//!
//! let channel = BoundedChannel::new(2).unwrap();
//! assert_eq!(channel.try_enqueue('A'), Ok(true));
//! assert_eq!(channel.try_enqueue('B'), Ok(true));
//! assert_eq!(channel.try_enqueue('C'), Ok(false));
//! assert_eq!(channel.dequeue_blocking(None), Ok('A'));
//! ```

#[macro_use]
extern crate tracing;

pub extern crate binkey;

mod channel;
mod config;
mod util;
pub mod shutdown;
pub mod store;

pub use crate::{
    channel::api::*,
    config::{ChannelConfig, DEFAULT_CAPACITY, DEFAULT_LABEL},
};

/// Error types
pub mod error {
    pub use crate::channel::error::*;
    pub use crate::store::StoreError;
}
