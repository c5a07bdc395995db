use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Mutex;

use super::LogBackend;
use crate::level::{LevelMapper, Severity};

/// Ordinal severity: larger is more severe.
///
/// Any `u16` is accepted. Values that are not one of the native tiers snap
/// to the greatest native tier at or below them, or to [`OrdinalLevel::TRACE`]
/// when they sit below every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrdinalLevel(pub u16);

impl OrdinalLevel {
    pub const TRACE: OrdinalLevel = OrdinalLevel(10);
    pub const DEBUG: OrdinalLevel = OrdinalLevel(20);
    pub const INFO: OrdinalLevel = OrdinalLevel(30);
    pub const NOTICE: OrdinalLevel = OrdinalLevel(35);
    pub const WARN: OrdinalLevel = OrdinalLevel(40);
    pub const ERROR: OrdinalLevel = OrdinalLevel(50);
    pub const CRITICAL: OrdinalLevel = OrdinalLevel(60);

    // Ascending.
    const NATIVE: [OrdinalLevel; 7] = [
        Self::TRACE,
        Self::DEBUG,
        Self::INFO,
        Self::NOTICE,
        Self::WARN,
        Self::ERROR,
        Self::CRITICAL,
    ];

    pub fn is_native(self) -> bool {
        Self::NATIVE.contains(&self)
    }

    /// Nearest native tier at or below `self`, else the minimum tier.
    pub fn snapped(self) -> OrdinalLevel {
        Self::NATIVE
            .iter()
            .rev()
            .find(|tier| tier.0 <= self.0)
            .copied()
            .unwrap_or(Self::TRACE)
    }

    pub fn name(self) -> &'static str {
        match self.snapped() {
            Self::DEBUG => "DEBUG",
            Self::INFO => "INFO",
            Self::NOTICE => "NOTICE",
            Self::WARN => "WARN",
            Self::ERROR => "ERROR",
            Self::CRITICAL => "CRITICAL",
            _ => "TRACE",
        }
    }
}

impl fmt::Display for OrdinalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Line-oriented backend writing to any `io::Write` sink.
///
/// The threshold lives in an atomic and can be changed through a shared
/// reference at any time; every gate check reads the current value.
pub struct WriterBackend {
    channel: String,
    threshold: AtomicU16,
    out: Mutex<Box<dyn Write + Send>>,
}

impl WriterBackend {
    pub fn new(channel: impl Into<String>, threshold: OrdinalLevel, out: impl Write + Send + 'static) -> Self {
        Self {
            channel: channel.into(),
            threshold: AtomicU16::new(threshold.snapped().0),
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn threshold(&self) -> OrdinalLevel {
        OrdinalLevel(self.threshold.load(Ordering::Relaxed))
    }

    pub fn set_threshold(&self, level: OrdinalLevel) {
        self.threshold.store(level.snapped().0, Ordering::Relaxed);
    }
}

impl fmt::Debug for WriterBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterBackend")
            .field("channel", &self.channel)
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}

impl LevelMapper for WriterBackend {
    type Level = OrdinalLevel;

    fn native(severity: Severity) -> OrdinalLevel {
        match severity {
            Severity::Trace => OrdinalLevel::TRACE,
            Severity::Debug => OrdinalLevel::DEBUG,
            Severity::Info => OrdinalLevel::INFO,
            Severity::Notice => OrdinalLevel::NOTICE,
            Severity::Warn => OrdinalLevel::WARN,
            Severity::Error => OrdinalLevel::ERROR,
            Severity::Critical => OrdinalLevel::CRITICAL,
        }
    }
}

impl LogBackend for WriterBackend {
    type Level = OrdinalLevel;

    fn is_enabled(&self, level: OrdinalLevel) -> bool {
        level.snapped().0 >= self.threshold.load(Ordering::Relaxed)
    }

    fn emit(&self, level: OrdinalLevel, line: &str) {
        // A poisoned sink only means another writer panicked mid-line.
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(out, "{} [{}] {}", self.channel, level, line);
        let _ = out.flush();
    }
}
