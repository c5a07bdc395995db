//! perfwatch core: stop watches, severity mapping, backend capability, and
//! the timing line format.
//!
//! This crate has no HTTP or runtime dependencies. The gateway crate builds
//! the named collector registry and graph endpoint on top of it.
//!
//! Panics, `unwrap`, and `expect` are denied in this crate.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod backend;
pub mod clock;
pub mod error;
pub mod level;
pub mod record;
pub mod stopwatch;

/// Shared result type.
pub use error::{PerfError, Result};

pub use backend::{LogBackend, OrdinalLevel, TracingBackend, WriterBackend};
pub use clock::{Clock, SystemClock};
pub use level::{LevelMapper, Severity};
pub use record::TimingRecord;
pub use stopwatch::{Completion, Outcome, StopWatch, WatchState};
