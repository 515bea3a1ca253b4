pub mod parser;
pub mod cluster;

pub use parser::ParserConfig;
pub use cluster::{ClusterConfig, DanglingPolicy, RowPolicy};
