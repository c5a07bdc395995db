//! perfwatch gateway library entry.
//!
//! This crate wires the named collector registry, the collectors and the
//! backend feeding them, graph resolution, and the HTTP graphs page into one
//! stack. It is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod collect;
pub mod config;
pub mod error;
pub mod graphs;
pub mod ops;
pub mod registry;
pub mod router;
