//! Shared application state for the perfwatch gateway.
//!
//! Owns the collector registry, the collectors declared in config, and the
//! backend that both logs timing lines and feeds those collectors.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use perfwatch_core::error::Result;
use perfwatch_core::{LevelMapper, OrdinalLevel, Severity, StopWatch, WriterBackend};

use crate::collect::{CollectingBackend, StatsCollector, TimingCollector};
use crate::config::PerfConfig;
use crate::graphs::GraphResolver;
use crate::registry::CollectorRegistry;

/// Backend used for the gateway's own timing lines.
pub type GatewayBackend = CollectingBackend<WriterBackend>;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: PerfConfig,
    registry: Arc<CollectorRegistry>,
    resolver: GraphResolver,
    default_graphs: Option<Vec<String>>,
    collectors: Vec<Arc<TimingCollector>>,
    backend: Arc<GatewayBackend>,
    normal_level: OrdinalLevel,
    exception_level: OrdinalLevel,
    draining: AtomicBool,
}

impl AppState {
    /// Build state writing timing lines to stderr.
    pub fn new(cfg: PerfConfig) -> Result<Self> {
        Self::with_sink(cfg, io::stderr())
    }

    /// Build state writing timing lines to `sink`.
    pub fn with_sink(cfg: PerfConfig, sink: impl Write + Send + 'static) -> Result<Self> {
        cfg.validate()?;

        // 1) Levels (unknown names degrade, but say so)
        let log = &cfg.logging;
        for (key, name) in [
            ("threshold", &log.threshold),
            ("normal_level", &log.normal_level),
            ("exception_level", &log.exception_level),
        ] {
            if Severity::parse(name).is_none() {
                tracing::warn!(key, level = %name, "unknown severity name, using INFO");
            }
        }
        let threshold = WriterBackend::map(Some(log.threshold.as_str()));
        let normal_level = WriterBackend::map(Some(log.normal_level.as_str()));
        let exception_level = WriterBackend::map(Some(log.exception_level.as_str()));

        // 2) Registry + collectors (they register themselves)
        let registry = Arc::new(CollectorRegistry::new());
        let collectors: Vec<Arc<TimingCollector>> = cfg
            .collectors
            .iter()
            .map(|c| TimingCollector::new(c.name.clone(), c.tags.clone(), c.max_points).start(&registry))
            .collect();

        // 3) Backend feeding every collector
        let mut backend = CollectingBackend::new(WriterBackend::new(log.channel.clone(), threshold, sink));
        for c in &collectors {
            let handle: Arc<dyn StatsCollector> = c.clone();
            backend = backend.with_collector(handle);
        }

        // configured defaults <-> collectors sanity check
        let default_graphs = cfg.graphs.default_names();
        for name in default_graphs.iter().flatten() {
            if registry.lookup(name).is_none() {
                tracing::warn!(graph = %name, "graphs.graph_names refers to an unconfigured collector");
            }
        }

        let resolver = GraphResolver::new(Arc::clone(&registry));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                resolver,
                default_graphs,
                collectors,
                backend: Arc::new(backend),
                normal_level,
                exception_level,
                draining: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &PerfConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<CollectorRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn resolver(&self) -> &GraphResolver {
        &self.inner.resolver
    }

    pub fn default_graphs(&self) -> Option<&[String]> {
        self.inner.default_graphs.as_deref()
    }

    pub fn collectors(&self) -> &[Arc<TimingCollector>] {
        &self.inner.collectors
    }

    pub fn backend(&self) -> Arc<GatewayBackend> {
        Arc::clone(&self.inner.backend)
    }

    /// Running stop watch on the gateway backend with the configured levels.
    pub fn stopwatch(&self, tag: &str) -> StopWatch<Arc<GatewayBackend>> {
        StopWatch::new(self.backend(), self.inner.normal_level, self.inner.exception_level).tagged(tag)
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }

    /// Mark draining and tear down the configured collectors.
    pub fn shutdown(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
        for c in &self.inner.collectors {
            c.shutdown();
        }
    }
}
