// src/stream/mod.rs
//! Record streams: bounded queues and the count-prefixed file format.

pub mod queue;
pub mod records;

pub use queue::{emit, spawn_producer, spawn_sink, Producer, Sink};
pub use records::{read_all, read_count, read_records, write_all, write_records};
