use ahash::AHashSet;
use serde::{Serialize, Deserialize};

/// Opaque, case-sensitive sequence identifier.
pub type Accession = String;

/// Load-order index of a node. Assigned once when the node row is read and
/// used as the stable tie-break key for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// Source line of the node row.
    pub line: u64,
    pub aliases: Vec<Accession>,
    pub adjacency: AHashSet<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, line: u64, aliases: Vec<Accession>) -> Self {
        Self {
            id,
            line,
            aliases,
            adjacency: AHashSet::new(),
        }
    }

    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }
}

/// Maximal set of mutually reachable nodes, seed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub members: Vec<NodeId>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Load index of the node that started the traversal.
    pub fn seed(&self) -> Option<NodeId> {
        self.members.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCluster {
    pub rank: usize,
    pub members: Component,
}

impl RankedCluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}
