//! ssnclust clusters a sequence similarity network into connected components.
//! It reads a node table and an edge table, keeps edges at or above a percent
//! identity threshold, and reports each accession's cluster ranked by size.

// Module declarations
pub mod error;
pub mod types;
pub mod config;
pub mod parser;
pub mod graph;
pub mod cluster;
pub mod output;
pub mod pipeline;
pub mod utils;

// Re-exports
pub use error::{Error, Result};
pub use config::SsnConfig;
pub use graph::{GraphBuilder, RecordTable, SsnGraph};
pub use cluster::{extract_components, rank, ClusterSummary};
pub use pipeline::{cluster_rows, run, ClusterRun};
