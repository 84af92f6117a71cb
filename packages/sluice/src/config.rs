//! Channel configuration.

use crate::error::InvalidCapacityError;


/// Capacity used by [`ChannelConfig::default`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// Label used by [`ChannelConfig::default`].
pub const DEFAULT_LABEL: &str = "sluice";

/// Configuration for constructing a channel
///
/// ```
/// use sluice::{BoundedChannel, ChannelConfig};
///
/// let channel = BoundedChannel::<u32>::with_config(
///     ChannelConfig::default().with_capacity(64).with_label("datagrams"),
/// ).unwrap();
/// assert_eq!(channel.capacity(), 64);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ChannelConfig {
    /// Maximum number of buffered items. Must be positive.
    pub capacity: usize,
    /// Name attached to the channel's log events.
    pub label: String,
}

impl ChannelConfig {
    /// Default config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self::default().with_capacity(capacity)
    }

    /// Set the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    // reject configs no channel can be built from.
    pub(crate) fn validate(&self) -> Result<(), InvalidCapacityError> {
        if self.capacity == 0 {
            Err(InvalidCapacityError)
        } else {
            Ok(())
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        ChannelConfig {
            capacity: DEFAULT_CAPACITY,
            label: DEFAULT_LABEL.to_owned(),
        }
    }
}
