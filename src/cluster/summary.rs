use std::collections::BTreeMap;
use chrono::Local;
use log::info;
use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::graph::{EdgeLoadStats, NodeLoadStats, SsnGraph};
use crate::types::RankedCluster;

/// Run statistics written next to the cluster mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub generated_at: String,
    pub min_percent_identity: f64,
    pub nodes: usize,
    pub accessions: usize,
    pub links: usize,
    pub clusters: usize,
    pub singletons: usize,
    pub largest_cluster: usize,
    /// Cluster size (in nodes) to number of clusters of that size.
    pub size_histogram: BTreeMap<usize, usize>,
    pub node_load: NodeLoadStats,
    pub edge_load: EdgeLoadStats,
}

impl ClusterSummary {
    pub fn new(
        graph: &SsnGraph,
        ranked: &[RankedCluster],
        min_percent_identity: f64,
        node_load: NodeLoadStats,
        edge_load: EdgeLoadStats,
    ) -> Self {
        let mut size_histogram = BTreeMap::new();
        for cluster in ranked {
            *size_histogram.entry(cluster.size()).or_insert(0) += 1;
        }

        Self {
            generated_at: Local::now().to_rfc3339(),
            min_percent_identity,
            nodes: graph.len(),
            accessions: graph.table().len(),
            links: graph.edge_count(),
            clusters: ranked.len(),
            singletons: size_histogram.get(&1).copied().unwrap_or(0),
            largest_cluster: ranked.first().map(RankedCluster::size).unwrap_or(0),
            size_histogram,
            node_load,
            edge_load,
        }
    }

    pub fn log(&self) {
        info!("{} clusters over {} nodes ({} singletons, largest has {} nodes)",
            self.clusters, self.nodes, self.singletons, self.largest_cluster);
    }

    /// Pretty-printed JSON, newline terminated.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
