use std::collections::{BTreeMap, VecDeque};
use std::fmt::Write;
use std::sync::{Arc, Mutex};

use perfwatch_core::TimingRecord;

use crate::registry::{CollectorRegistry, RegistrationId};

const CHART_BASE: &str = "https://chart.googleapis.com/chart";
const CHART_SIZE: &str = "750x400";
/// Series per chart; samples for further new tags are dropped.
pub const MAX_SERIES: usize = 16;

/// Something that accumulates timing records and can point at a chart of
/// what it has seen.
pub trait StatsCollector: Send + Sync {
    fn name(&self) -> &str;

    fn record(&self, rec: &TimingRecord);

    /// `None` while there is nothing to draw.
    fn chart_url(&self) -> Option<String>;
}

/// Keeps the most recent elapsed times per tag and draws them as a line
/// chart, one series per tag.
pub struct TimingCollector {
    name: String,
    /// Empty accepts every tag.
    tags: Vec<String>,
    max_points: usize,
    series: Mutex<BTreeMap<String, VecDeque<u64>>>,
    registration: Mutex<Option<(Arc<CollectorRegistry>, RegistrationId)>>,
}

impl TimingCollector {
    pub fn new(name: impl Into<String>, tags: Vec<String>, max_points: usize) -> Self {
        Self {
            name: name.into(),
            tags,
            max_points: max_points.max(1),
            series: Mutex::new(BTreeMap::new()),
            registration: Mutex::new(None),
        }
    }

    /// Wrap in an `Arc` and register under this collector's name.
    /// A collector already registered under the same name is replaced.
    pub fn start(self, registry: &Arc<CollectorRegistry>) -> Arc<Self> {
        let this = Arc::new(self);
        let handle: Arc<dyn StatsCollector> = this.clone();
        let id = registry.register(this.name.clone(), &handle);
        *this.registration.lock().unwrap_or_else(|e| e.into_inner()) = Some((Arc::clone(registry), id));
        tracing::info!(collector = %this.name, "collector started");
        this
    }

    /// Remove this collector's own registry entry. Idempotent.
    pub fn shutdown(&self) {
        let reg = self.registration.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some((registry, id)) = reg {
            if registry.deregister_if(&self.name, id) {
                tracing::info!(collector = %self.name, "collector stopped");
            }
        }
    }

    pub fn accepts(&self, tag: &str) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| t == tag)
    }

    /// Number of samples currently held for `tag`.
    pub fn samples(&self, tag: &str) -> usize {
        self.series
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(tag)
            .map_or(0, VecDeque::len)
    }
}

impl StatsCollector for TimingCollector {
    fn name(&self) -> &str {
        &self.name
    }

    fn record(&self, rec: &TimingRecord) {
        if !self.accepts(&rec.tag) {
            return;
        }
        let mut series = self.series.lock().unwrap_or_else(|e| e.into_inner());
        if !series.contains_key(&rec.tag) && series.len() >= MAX_SERIES {
            tracing::debug!(collector = %self.name, tag = %rec.tag, "series limit reached, sample dropped");
            return;
        }
        let points = series.entry(rec.tag.clone()).or_default();
        if points.len() == self.max_points {
            points.pop_front();
        }
        points.push_back(rec.elapsed);
    }

    fn chart_url(&self) -> Option<String> {
        let series = self.series.lock().unwrap_or_else(|e| e.into_inner());
        if series.values().all(VecDeque::is_empty) {
            return None;
        }

        let max = series.values().flatten().copied().max().unwrap_or(0).max(1);
        let legend = series
            .keys()
            .map(|t| urlencoding::encode(t).into_owned())
            .collect::<Vec<_>>()
            .join("|");
        let data = series
            .values()
            .map(|pts| pts.iter().map(u64::to_string).collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join("|");

        let mut url = String::with_capacity(128 + data.len());
        let _ = write!(
            url,
            "{CHART_BASE}?cht=lc&chs={CHART_SIZE}&chtt={}&chdl={legend}&chxt=y&chxr=0,0,{max}&chds=0,{max}&chd=t:{data}",
            urlencoding::encode(&self.name),
        );
        Some(url)
    }
}

impl Drop for TimingCollector {
    fn drop(&mut self) {
        self.shutdown();
    }
}
