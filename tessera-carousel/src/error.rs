//! Error types for carousel construction and configuration.
//!
//! Only construction can fail. Runtime handlers never surface errors: a
//! missing pager entry, a click on a detached arrow or an empty collection all
//! degrade to a static display and are logged instead.

use thiserror::Error;

/// Invalid carousel options.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The breakpoint table is empty and `single` is not set.
    #[error("breakpoint table is empty")]
    EmptyBreakpoints,
    /// A breakpoint maps a width to zero items per page.
    #[error("breakpoint at width {width} shows zero items per page")]
    ZeroItemsPerPage {
        /// Width threshold of the offending breakpoint.
        width: u32,
    },
    /// Two breakpoints share the same width threshold.
    #[error("duplicate breakpoint width {0}")]
    DuplicateBreakpoint(u32),
    /// The transition duration is negative, not finite or too large for a
    /// [`Duration`](std::time::Duration).
    #[error("transition time must be a non-negative, representable number of seconds (got {0})")]
    InvalidTime(f32),
    /// The drag threshold is negative or not finite.
    #[error("drag delta must be a finite, non-negative number of pixels (got {0})")]
    InvalidDelta(f32),
}

/// Failure to attach a carousel to a container.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    /// The options could not be merged into a valid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The container selector matched nothing.
    #[error("carousel container `{0}` not found")]
    ContainerNotFound(String),
    /// The container has no item strip matching the wrapper selector.
    #[error("item strip `{0}` not found inside the carousel container")]
    StripNotFound(String),
}
