// src/geo/mod.rs
//! Projection of page ranks onto gazetteer entries.

pub mod join;
pub mod output;

pub use join::{join, JoinOutcome, TitleLookup};
pub use output::{format_line, write_geo_ranks, OutputFormat};
