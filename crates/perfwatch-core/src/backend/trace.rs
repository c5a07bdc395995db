use std::sync::Arc;

use tracing::Level;

use super::LogBackend;
use crate::level::{LevelMapper, Severity};

/// Callsite target for every emitted timing line.
pub const TARGET: &str = "perfwatch";

/// Adapter onto the `tracing` dispatcher.
///
/// The enabled check defers to the installed subscriber, so reloading its
/// filter changes what gets recorded without touching instrumented code.
/// `channel` is recorded as a field on every event.
#[derive(Debug, Clone)]
pub struct TracingBackend {
    channel: Arc<str>,
}

impl TracingBackend {
    pub fn new(channel: impl Into<Arc<str>>) -> Self {
        Self { channel: channel.into() }
    }
}

impl LevelMapper for TracingBackend {
    type Level = Level;

    fn native(severity: Severity) -> Level {
        match severity {
            Severity::Trace => Level::TRACE,
            Severity::Debug => Level::DEBUG,
            Severity::Info | Severity::Notice => Level::INFO,
            Severity::Warn => Level::WARN,
            Severity::Error | Severity::Critical => Level::ERROR,
        }
    }
}

impl LogBackend for TracingBackend {
    type Level = Level;

    // Callsite levels must be constants, hence one arm per level.
    fn is_enabled(&self, level: Level) -> bool {
        if level == Level::ERROR {
            tracing::enabled!(target: TARGET, Level::ERROR)
        } else if level == Level::WARN {
            tracing::enabled!(target: TARGET, Level::WARN)
        } else if level == Level::INFO {
            tracing::enabled!(target: TARGET, Level::INFO)
        } else if level == Level::DEBUG {
            tracing::enabled!(target: TARGET, Level::DEBUG)
        } else {
            tracing::enabled!(target: TARGET, Level::TRACE)
        }
    }

    fn emit(&self, level: Level, line: &str) {
        let channel = &*self.channel;
        if level == Level::ERROR {
            tracing::event!(target: TARGET, Level::ERROR, channel, "{line}");
        } else if level == Level::WARN {
            tracing::event!(target: TARGET, Level::WARN, channel, "{line}");
        } else if level == Level::INFO {
            tracing::event!(target: TARGET, Level::INFO, channel, "{line}");
        } else if level == Level::DEBUG {
            tracing::event!(target: TARGET, Level::DEBUG, channel, "{line}");
        } else {
            tracing::event!(target: TARGET, Level::TRACE, channel, "{line}");
        }
    }
}
