//! End-to-end run: read rows, build the graph, cluster, write outputs.

use std::path::Path;
use std::time::Instant;
use log::{info, debug};
use crate::cluster::{extract_components, rank, ClusterSummary};
use crate::config::SsnConfig;
use crate::error::Result;
use crate::graph::{GraphBuilder, SsnGraph};
use crate::output::{write_all_or_nothing, RenderedOutput};
use crate::parser::{read_rows, RawRow};
use crate::types::RankedCluster;
use crate::utils::skipped_log::SkippedLog;

/// In-memory result of clustering one network.
#[derive(Debug, Clone)]
pub struct ClusterRun {
    pub graph: SsnGraph,
    pub ranked: Vec<RankedCluster>,
    pub summary: ClusterSummary,
    pub skipped: SkippedLog,
}

impl ClusterRun {
    pub fn render(&self) -> RenderedOutput {
        RenderedOutput::new(&self.graph, &self.ranked)
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped.count()
    }
}

/// Clusters already-tokenized node and edge rows.
pub fn cluster_rows(
    node_rows: &[RawRow],
    edge_rows: &[RawRow],
    config: &SsnConfig,
) -> Result<ClusterRun> {
    let min_percent_identity = config.cluster.min_percent_identity;

    let mut builder = GraphBuilder::new(config.parser.clone())
        .with_row_policy(config.cluster.row_policy)
        .with_dangling_policy(config.cluster.dangling_policy);

    let node_load = builder.load_nodes(node_rows)?;
    let edge_load = builder.load_edges(edge_rows, min_percent_identity)?;
    let (graph, skipped) = builder.finish();

    let start = Instant::now();
    let components = extract_components(&graph);
    let ranked = rank(&components);
    debug!("Clustering took {:?}", start.elapsed());

    let summary = ClusterSummary::new(&graph, &ranked, min_percent_identity, node_load, edge_load);
    summary.log();

    Ok(ClusterRun { graph, ranked, summary, skipped })
}

/// Runs the whole batch described by `config`. Every output file, including
/// the summary and skipped-row log, is written only after clustering completes,
/// and either all of them land or none do.
pub fn run(config: &SsnConfig) -> Result<ClusterRun> {
    config.validate()?;
    let files = &config.files;
    let start = Instant::now();

    info!("Reading nodes from {:?}", files.nodes);
    let node_rows = read_rows(&files.nodes, &config.parser)?;
    info!("Reading edges from {:?}", files.edges);
    let edge_rows = read_rows(&files.edges, &config.parser)?;

    let result = cluster_rows(&node_rows, &edge_rows, config)?;
    let rendered = result.render();
    let summary = match &files.summary_file {
        Some(_) => result.summary.to_json()?,
        None => Vec::new(),
    };
    let skipped = result.skipped.render();

    let mut outputs: Vec<(&Path, &[u8])> = vec![
        (files.accession_list.as_path(), rendered.accessions.as_slice()),
        (files.clusters_file.as_path(), rendered.clusters.as_slice()),
    ];
    if let Some(path) = &files.summary_file {
        outputs.push((path.as_path(), summary.as_slice()));
    }
    if let Some(path) = &files.skipped_log {
        outputs.push((path.as_path(), skipped.as_slice()));
    }

    write_all_or_nothing(&outputs)?;
    info!("Wrote accession list to {:?} and cluster mapping to {:?}",
        files.accession_list, files.clusters_file);
    if let Some(path) = &files.summary_file {
        info!("Wrote run summary to {:?}", path);
    }
    if let Some(path) = &files.skipped_log {
        info!("Wrote {} skipped rows to {:?}", result.skipped_rows(), path);
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(result)
}
