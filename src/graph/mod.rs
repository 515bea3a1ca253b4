//! Record table and similarity graph construction.

use ahash::{AHashMap, AHashSet};
use log::{debug, info, trace};
use serde::{Serialize, Deserialize};
use crate::config::subsystems::{DanglingPolicy, ParserConfig, RowPolicy};
use crate::error::{Error, Result};
use crate::parser::{EdgeRow, NodeRow, RawRow, EDGE_STREAM, NODE_STREAM};
use crate::types::{Accession, Node, NodeId};
use crate::utils::skipped_log::SkippedLog;

/// Maps every registered accession to the node that owns it.
#[derive(Debug, Default, Clone)]
pub struct RecordTable {
    owners: AHashMap<Accession, NodeId>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, accession: &str) -> Option<NodeId> {
        self.owners.get(accession).copied()
    }

    pub fn contains(&self, accession: &str) -> bool {
        self.owners.contains_key(accession)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn accessions(&self) -> impl Iterator<Item = &Accession> {
        self.owners.keys()
    }

    fn register(&mut self, accession: Accession, node: NodeId) {
        self.owners.insert(accession, node);
    }
}

/// Undirected similarity network over nodes in load order.
#[derive(Debug, Default, Clone)]
pub struct SsnGraph {
    nodes: Vec<Node>,
    table: RecordTable,
}

impl SsnGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum::<usize>() / 2
    }

    /// Adds a node owning `aliases`. Every alias must be new to the table.
    pub fn add_node(&mut self, line: u64, aliases: Vec<Accession>) -> Result<NodeId> {
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(aliases.len());
        for alias in &aliases {
            if let Some(owner) = self.table.get(alias) {
                return Err(Error::DuplicateAccession {
                    line,
                    accession: alias.clone(),
                    first_line: self.node(owner).line,
                });
            }
            if !seen.insert(alias.as_str()) {
                return Err(Error::DuplicateAccession { line, accession: alias.clone(), first_line: line });
            }
        }

        let id = NodeId(self.nodes.len());
        for alias in &aliases {
            self.table.register(alias.clone(), id);
        }
        self.nodes.push(Node::new(id, line, aliases));
        Ok(id)
    }

    /// Adds a mutual adjacency link. Linking a node to itself is a no-op.
    /// Returns true when a new link was created.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        let inserted = self.nodes[a.index()].adjacency.insert(b);
        self.nodes[b.index()].adjacency.insert(a);
        inserted
    }

    pub fn are_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.node(a).adjacency.contains(&b)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLoadStats {
    pub rows: usize,
    pub nodes: usize,
    pub accessions: usize,
    pub skipped: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeLoadStats {
    pub rows: usize,
    pub accepted: usize,
    pub below_threshold: usize,
    /// Accepted edges whose endpoints resolve to the same node.
    pub self_links: usize,
    /// Accepted edges between nodes that were already linked.
    pub repeated: usize,
    pub dangling_skipped: usize,
    pub malformed_skipped: usize,
}

/// Populates an [`SsnGraph`] from node rows, then edge rows.
pub struct GraphBuilder {
    parser: ParserConfig,
    row_policy: RowPolicy,
    dangling_policy: DanglingPolicy,
    skipped: SkippedLog,
    graph: SsnGraph,
}

impl GraphBuilder {
    pub fn new(parser: ParserConfig) -> Self {
        Self {
            parser,
            row_policy: RowPolicy::Strict,
            dangling_policy: DanglingPolicy::Fail,
            skipped: SkippedLog::new(),
            graph: SsnGraph::new(),
        }
    }

    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    pub fn with_dangling_policy(mut self, policy: DanglingPolicy) -> Self {
        self.dangling_policy = policy;
        self
    }

    pub fn graph(&self) -> &SsnGraph {
        &self.graph
    }

    /// Downgrades a row error to a skip when the row policy allows it.
    fn skip_or_fail(&mut self, stream: &'static str, line: u64, err: Error) -> Result<()> {
        if self.row_policy == RowPolicy::Skip && err.is_row_error() {
            self.skipped.log_skipped(stream, "malformed row", line, &err.to_string());
            Ok(())
        } else {
            Err(err)
        }
    }

    pub fn load_nodes(&mut self, rows: &[RawRow]) -> Result<NodeLoadStats> {
        let mut stats = NodeLoadStats { rows: rows.len(), ..Default::default() };

        for row in rows {
            let parsed = NodeRow::parse(row, &self.parser)
                .and_then(|node| {
                    let count = node.aliases.len();
                    self.graph.add_node(node.line, node.aliases).map(|_| count)
                });

            match parsed {
                Ok(count) => {
                    stats.nodes += 1;
                    stats.accessions += count;
                }
                Err(e) => {
                    self.skip_or_fail(NODE_STREAM, row.line, e)?;
                    stats.skipped += 1;
                }
            }
        }

        info!("Loaded {} nodes carrying {} accessions ({} rows skipped)",
            stats.nodes, stats.accessions, stats.skipped);
        Ok(stats)
    }

    pub fn load_edges(&mut self, rows: &[RawRow], min_percent_identity: f64) -> Result<EdgeLoadStats> {
        let mut stats = EdgeLoadStats { rows: rows.len(), ..Default::default() };

        for row in rows {
            let edge = match EdgeRow::parse(row, &self.parser) {
                Ok(edge) => edge,
                Err(e) => {
                    self.skip_or_fail(EDGE_STREAM, row.line, e)?;
                    stats.malformed_skipped += 1;
                    continue;
                }
            };

            if edge.percent_identity < min_percent_identity {
                stats.below_threshold += 1;
                continue;
            }

            let (a, b) = match self.resolve(&edge)? {
                Some(pair) => pair,
                None => {
                    stats.dangling_skipped += 1;
                    continue;
                }
            };

            stats.accepted += 1;
            if a == b {
                stats.self_links += 1;
            } else if !self.graph.link(a, b) {
                stats.repeated += 1;
            }
            trace!("Accepted edge {} - {} ({}%)", edge.accession_a, edge.accession_b, edge.percent_identity);
        }

        info!("Accepted {} of {} edges at >= {}% identity ({} below threshold, {} dangling skipped, {} malformed skipped)",
            stats.accepted, stats.rows, min_percent_identity,
            stats.below_threshold, stats.dangling_skipped, stats.malformed_skipped);
        debug!("Edge load: {} self links, {} repeated links", stats.self_links, stats.repeated);
        Ok(stats)
    }

    fn resolve(&mut self, edge: &EdgeRow) -> Result<Option<(NodeId, NodeId)>> {
        for accession in [&edge.accession_a, &edge.accession_b] {
            if self.graph.table().contains(accession) {
                continue;
            }
            return match self.dangling_policy {
                DanglingPolicy::Fail => Err(Error::DanglingAccession {
                    line: edge.line,
                    accession: accession.clone(),
                }),
                DanglingPolicy::Skip => {
                    self.skipped.log_skipped(EDGE_STREAM, "dangling accession", edge.line, accession);
                    Ok(None)
                }
            };
        }

        match (self.graph.table().get(&edge.accession_a), self.graph.table().get(&edge.accession_b)) {
            (Some(a), Some(b)) => Ok(Some((a, b))),
            _ => Ok(None),
        }
    }

    /// Finishes construction, handing back the graph and the rows it skipped.
    pub fn finish(self) -> (SsnGraph, SkippedLog) {
        (self.graph, self.skipped)
    }
}
