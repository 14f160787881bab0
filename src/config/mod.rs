// src/config/mod.rs
pub mod types;

pub use self::types::{PageRankConfig, PipelineConfig, PlaceRankToml, ReportConfig};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlaceRankError, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "placerank.toml";

/// Runtime configuration for every pipeline stage.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub pagerank: PageRankConfig,
    pub pipeline: PipelineConfig,
    pub report: ReportConfig,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path` if given, else `placerank.toml` from the working
    /// directory if present, else defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if !local.exists() {
                    return Ok(Self::new());
                }
                local
            }
        };
        let content = fs::read_to_string(&path).map_err(|e| PlaceRankError::io(&path, e))?;
        Self::parse_toml(&path, &content)
    }

    /// Parses and validates TOML content. `origin` is only used in errors.
    ///
    /// # Errors
    /// Returns error on malformed TOML or out-of-range values.
    pub fn parse_toml(origin: &Path, content: &str) -> Result<Self> {
        let parsed: PlaceRankToml = toml::from_str(content).map_err(|e| PlaceRankError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self {
            pagerank: parsed.pagerank,
            pipeline: parsed.pipeline,
            report: parsed.report,
        };
        config.validate(origin)?;
        Ok(config)
    }

    /// Validates value ranges.
    ///
    /// # Errors
    /// Returns a `Config` error naming the first offending key.
    pub fn validate(&self, origin: &Path) -> Result<()> {
        let invalid = |message: &str| PlaceRankError::Config {
            path: origin.to_path_buf(),
            message: message.to_string(),
        };
        let beta = self.pagerank.walk_probability;
        // At 1.0 nothing teleports and a periodic graph never settles.
        if !(beta > 0.0 && beta < 1.0) {
            return Err(invalid("pagerank.walk_probability must be in (0, 1)"));
        }
        if !(self.pagerank.convergence > 0.0) {
            return Err(invalid("pagerank.convergence must be positive"));
        }
        if self.pipeline.queue_capacity == 0 {
            return Err(invalid("pipeline.queue_capacity must be at least 1"));
        }
        Ok(())
    }
}
