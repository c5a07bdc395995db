//! Graph name resolution and the HTML graphs endpoint.

pub mod handler;
pub mod page;
mod resolver;

pub use handler::GraphsRequest;
pub use resolver::{GraphRef, GraphResolver, NameSource};
