use std::sync::Arc;

use crate::registry::CollectorRegistry;

/// What one requested graph name resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphRef {
    /// Collector found and has something to draw.
    Chart(String),
    /// Collector found but has no data yet.
    Empty,
    /// No collector under that name.
    Unknown,
}

/// Where the list of names came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Explicit,
    Configured,
    AllKnown,
}

/// Turns graph names into chart references via the collector registry.
#[derive(Clone)]
pub struct GraphResolver {
    registry: Arc<CollectorRegistry>,
}

impl GraphResolver {
    pub fn new(registry: Arc<CollectorRegistry>) -> Self {
        Self { registry }
    }

    /// Pick the names to show: a non-empty explicit list wins, then a
    /// non-empty configured list, then every registered name.
    pub fn select_names(&self, explicit: Option<&[String]>, defaults: Option<&[String]>) -> (NameSource, Vec<String>) {
        match (explicit, defaults) {
            (Some(names), _) if !names.is_empty() => (NameSource::Explicit, names.to_vec()),
            (_, Some(names)) if !names.is_empty() => (NameSource::Configured, names.to_vec()),
            _ => (NameSource::AllKnown, self.registry.all_names().into_iter().collect()),
        }
    }

    /// Resolve each selected name independently, preserving order and
    /// duplicates.
    pub fn resolve(&self, explicit: Option<&[String]>, defaults: Option<&[String]>) -> Vec<(String, GraphRef)> {
        let (source, names) = self.select_names(explicit, defaults);
        tracing::debug!(?source, count = names.len(), "resolving graphs");

        names
            .into_iter()
            .map(|name| {
                let graph = self.resolve_one(&name);
                (name, graph)
            })
            .collect()
    }

    pub fn resolve_one(&self, name: &str) -> GraphRef {
        match self.registry.lookup(name) {
            Some(collector) => match collector.chart_url() {
                Some(url) => GraphRef::Chart(url),
                None => GraphRef::Empty,
            },
            None => GraphRef::Unknown,
        }
    }
}
