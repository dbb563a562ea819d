// src/graph/mod.rs
//! Component interface graph: construction, provider lookup and cycles.

pub mod builder;
pub mod cycles;
pub mod dependency;

pub use builder::{GraphBuild, GraphBuilder};
pub use cycles::{detect_cycles, Cycle};
pub use dependency::{provider_map, DependencyGraph, ProviderMap};
