use std::sync::Arc;

use perfwatch_core::{LogBackend, TimingRecord};

use crate::collect::StatsCollector;

/// Wraps a backend and feeds every emitted timing line to a set of
/// collectors. The gate is the inner backend's, so collectors only see what
/// actually got logged.
pub struct CollectingBackend<B> {
    inner: B,
    collectors: Vec<Arc<dyn StatsCollector>>,
}

impl<B: LogBackend> CollectingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            collectors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_collector(mut self, collector: Arc<dyn StatsCollector>) -> Self {
        self.collectors.push(collector);
        self
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B: LogBackend> LogBackend for CollectingBackend<B> {
    type Level = B::Level;

    fn is_enabled(&self, level: B::Level) -> bool {
        self.inner.is_enabled(level)
    }

    fn emit(&self, level: B::Level, line: &str) {
        self.inner.emit(level, line);
        if let Some(rec) = TimingRecord::parse(line) {
            for c in &self.collectors {
                c.record(&rec);
            }
        }
    }
}
