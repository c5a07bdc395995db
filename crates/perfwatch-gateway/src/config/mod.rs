//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use perfwatch_core::error::{PerfError, Result};

pub use schema::{CollectorConfig, GraphsSection, LoggingSection, PerfConfig, ServerSection};

pub fn load_from_file(path: &str) -> Result<PerfConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PerfError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<PerfConfig> {
    let cfg: PerfConfig = serde_yaml::from_str(s)
        .map_err(|e| PerfError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
