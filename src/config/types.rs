use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Fraction of mass following links rather than teleporting.
    #[serde(default = "default_walk_probability")]
    pub walk_probability: f64,
    /// L1 delta between iterations at which the solver stops.
    #[serde(default = "default_convergence")]
    pub convergence: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            walk_probability: default_walk_probability(),
            convergence: default_convergence(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Capacity of every bounded record queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of top-ranked pages logged after ranking.
    #[serde(default = "default_preview")]
    pub preview: usize,
    /// Number of individual misses (and hits) logged per kind.
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview: default_preview(),
            sample_limit: default_sample_limit(),
        }
    }
}

/// On-disk shape of `placerank.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlaceRankToml {
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

const fn default_walk_probability() -> f64 { 0.85 }
const fn default_convergence() -> f64 { 0.000_001 }
const fn default_queue_capacity() -> usize { 1000 }
const fn default_preview() -> usize { 50 }
const fn default_sample_limit() -> usize { 10 }
