use std::collections::HashSet;

use serde::Deserialize;
use perfwatch_core::error::{PerfError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerfConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub graphs: GraphsSection,

    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub collectors: Vec<CollectorConfig>,
}

impl PerfConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PerfError::UnsupportedVersion);
        }

        self.server.validate()?;

        let mut seen = HashSet::new();
        for c in &self.collectors {
            c.validate()?;
            if !seen.insert(c.name.as_str()) {
                return Err(PerfError::BadRequest(format!(
                    "duplicate collector name: {}",
                    c.name
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_graphs_path")]
    pub graphs_path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            graphs_path: default_graphs_path(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !self.graphs_path.starts_with('/') || self.graphs_path.len() < 2 {
            return Err(PerfError::BadRequest(
                "server.graphs_path must be an absolute path like /perf/graphs".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_graphs_path() -> String {
    "/perf/graphs".into()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GraphsSection {
    /// Comma-separated graph names shown when a request names none.
    #[serde(default)]
    pub graph_names: Option<String>,
}

impl GraphsSection {
    /// Configured default list, in order. `None` when unset or blank.
    pub fn default_names(&self) -> Option<Vec<String>> {
        let names: Vec<String> = self
            .graph_names
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(names)
        }
    }
}

/// Severity names are symbolic and never rejected here; unknown names fall
/// back to the informational tier when mapped.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    #[serde(default = "default_channel")]
    pub channel: String,

    #[serde(default = "default_info")]
    pub threshold: String,

    #[serde(default = "default_info")]
    pub normal_level: String,

    #[serde(default = "default_warn")]
    pub exception_level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            threshold: default_info(),
            normal_level: default_info(),
            exception_level: default_warn(),
        }
    }
}

fn default_channel() -> String {
    "perfwatch".into()
}
fn default_info() -> String {
    "info".into()
}
fn default_warn() -> String {
    "warn".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    pub name: String,

    /// Tags to keep; empty keeps every tag.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PerfError::BadRequest("collectors[].name must not be empty".into()));
        }
        if self.name.contains(',') {
            return Err(PerfError::BadRequest(format!(
                "collector name must not contain ',': {}",
                self.name
            )));
        }
        if !(1..=500).contains(&self.max_points) {
            return Err(PerfError::BadRequest(format!(
                "collectors[{}].max_points must be between 1 and 500",
                self.name
            )));
        }
        Ok(())
    }
}

fn default_max_points() -> usize {
    60
}
