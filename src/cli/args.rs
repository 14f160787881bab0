use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "placerank", version, about = "Rank gazetteer places by wiki PageRank")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Configuration file (defaults to ./placerank.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract location refs from a geonames dump
    Locations {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        #[arg(value_name = "DEST")]
        dest: PathBuf,
    },
    /// Extract the link graph from a wiki dump
    Graph {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        #[arg(value_name = "DEST")]
        dest: PathBuf,
    },
    /// Compute PageRank for every page of a graph file
    Pagerank {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        #[arg(value_name = "DEST")]
        dest: PathBuf,
    },
    /// Join ranked pages with location refs
    Georank {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        #[arg(value_name = "GEO_FILE")]
        geo: PathBuf,
        #[arg(value_name = "DEST")]
        dest: PathBuf,
    },
    /// Run every stage from raw dumps to ranked locations
    All {
        #[arg(value_name = "WIKI_DUMP")]
        wiki: PathBuf,
        #[arg(value_name = "GEONAMES_DUMP")]
        geonames: PathBuf,
        #[arg(value_name = "DEST")]
        dest: PathBuf,
        /// Keep intermediate files here instead of a temporary directory
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
    },
}
