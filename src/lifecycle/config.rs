//! Platform settings.

use clap::ValueEnum;
use std::num::NonZeroUsize;

/// What a checkout does with a cart line whose stock could not be reserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FailedLinePolicy {
    /// Keep the line in the order and charge for it. Stock is not decremented.
    #[default]
    Charge,
    /// Leave the line out of the order and its total.
    Exclude,
}

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Capacity of each actor's request channel.
    pub buffer_size: NonZeroUsize,
    pub failed_lines: FailedLinePolicy,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            buffer_size: NonZeroUsize::new(32).unwrap_or(NonZeroUsize::MIN),
            failed_lines: FailedLinePolicy::default(),
        }
    }
}
