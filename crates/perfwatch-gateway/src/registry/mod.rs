//! Process-wide named registry of statistics collectors.
//!
//! One instance is built at startup and handed to both the collectors (which
//! register themselves) and the graph endpoint (which resolves names).
//! Nothing here is global; tests build as many registries as they like.

mod named;

pub use named::{NamedRegistry, RegistrationId};

use crate::collect::StatsCollector;

/// Registry of chart-capable collectors, as used by the gateway.
pub type CollectorRegistry = NamedRegistry<dyn StatsCollector>;
