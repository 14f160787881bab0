pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod exit;
pub mod geo;
pub mod graph;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod stream;
pub mod types;
