// src/graph/mod.rs
//! Link graph construction from streamed page records.

pub mod builder;
pub mod index;
pub mod links;

pub use builder::{build_graph, BuildStats, GraphBuilder, LinkGraph};
pub use index::TitleIndex;
