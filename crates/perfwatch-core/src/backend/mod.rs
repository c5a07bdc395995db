//! Logging backend capability.
//!
//! A stop watch only needs two things from wherever its lines go: a cheap
//! "is this severity enabled right now?" check and an "emit this line" call.
//! Each concrete logging system gets one thin adapter implementing
//! [`LogBackend`] and its own [`crate::level::LevelMapper`] table.

mod trace;
mod writer;

use std::sync::Arc;

pub use trace::TracingBackend;
pub use writer::{OrdinalLevel, WriterBackend};

/// Destination of completed timing lines.
pub trait LogBackend {
    /// Native severity token.
    type Level: Copy;

    /// Gate check. Must not format anything; it runs for every timed block,
    /// including the ones that end up filtered out.
    fn is_enabled(&self, level: Self::Level) -> bool;

    /// Emit one already-formatted line.
    fn emit(&self, level: Self::Level, line: &str);
}

impl<B: LogBackend + ?Sized> LogBackend for &B {
    type Level = B::Level;

    fn is_enabled(&self, level: Self::Level) -> bool {
        (**self).is_enabled(level)
    }

    fn emit(&self, level: Self::Level, line: &str) {
        (**self).emit(level, line)
    }
}

impl<B: LogBackend + ?Sized> LogBackend for Arc<B> {
    type Level = B::Level;

    fn is_enabled(&self, level: Self::Level) -> bool {
        (**self).is_enabled(level)
    }

    fn emit(&self, level: Self::Level, line: &str) {
        (**self).emit(level, line)
    }
}
