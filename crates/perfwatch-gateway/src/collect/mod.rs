//! Statistics collectors and the backend that feeds them.

mod backend;
mod collector;

pub use backend::CollectingBackend;
pub use collector::{StatsCollector, TimingCollector, MAX_SERIES};
