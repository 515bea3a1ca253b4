//! Flattens ranked clusters back to per-accession rows.

use std::io::Write;
use std::path::Path;
use log::debug;
use tempfile::NamedTempFile;
use crate::error::Result;
use crate::graph::{RecordTable, SsnGraph};
use crate::types::{Accession, RankedCluster};

/// Every registered accession, sorted lexicographically by bytes.
pub fn accession_universe(table: &RecordTable) -> Vec<Accession> {
    let mut accessions: Vec<Accession> = table.accessions().cloned().collect();
    accessions.sort_unstable();
    accessions
}

/// `(rank, accession)` pairs, clusters in rank order, each node's aliases in
/// their original order.
pub fn cluster_mapping(graph: &SsnGraph, ranked: &[RankedCluster]) -> Vec<(usize, Accession)> {
    let mut rows = Vec::with_capacity(graph.table().len());
    for cluster in ranked {
        for &id in &cluster.members.members {
            for accession in &graph.node(id).aliases {
                rows.push((cluster.rank, accession.clone()));
            }
        }
    }
    rows
}

pub fn render_accessions(accessions: &[Accession]) -> Vec<u8> {
    let mut out = Vec::new();
    for accession in accessions {
        out.extend_from_slice(accession.as_bytes());
        out.push(b'\n');
    }
    out
}

pub fn render_cluster_mapping(mapping: &[(usize, Accession)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (rank, accession) in mapping {
        out.extend_from_slice(rank.to_string().as_bytes());
        out.push(b'\t');
        out.extend_from_slice(accession.as_bytes());
        out.push(b'\n');
    }
    out
}

/// Both outputs of one run, fully rendered before anything touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub accessions: Vec<u8>,
    pub clusters: Vec<u8>,
}

impl RenderedOutput {
    pub fn new(graph: &SsnGraph, ranked: &[RankedCluster]) -> Self {
        Self {
            accessions: render_accessions(&accession_universe(graph.table())),
            clusters: render_cluster_mapping(&cluster_mapping(graph, ranked)),
        }
    }

    pub fn write<P: AsRef<Path>, Q: AsRef<Path>>(&self, accession_list: P, clusters_file: Q) -> Result<()> {
        write_all_or_nothing(&[
            (accession_list.as_ref(), self.accessions.as_slice()),
            (clusters_file.as_ref(), self.clusters.as_slice()),
        ])
    }
}

/// Writes every `(path, bytes)` pair or none of them.
///
/// Each payload is first staged in a temporary file next to its target. Targets
/// are only replaced once every payload has been staged; staged files left
/// behind by a failure are removed when dropped.
pub fn write_all_or_nothing(outputs: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for &(path, bytes) in outputs {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        staged.push((file, path));
    }

    for (file, path) in staged {
        file.persist(path).map_err(|e| e.error)?;
        debug!("Wrote {:?}", path);
    }
    Ok(())
}
