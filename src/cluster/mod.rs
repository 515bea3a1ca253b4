// cluster/mod.rs
pub mod summary;

use std::collections::VecDeque;
use bit_vec::BitVec;
use log::debug;
use crate::graph::SsnGraph;
use crate::types::{Component, NodeId, RankedCluster};

pub use self::summary::ClusterSummary;

/// Splits the graph into connected components.
///
/// Seeds are taken in node load order and each component is collected by a
/// breadth-first walk, so the result order is the seed discovery order. The
/// visited set lives only for the duration of the call.
///
/// Members are reported in load order. The seed is always the lowest load
/// index of its component, so it stays first.
pub fn extract_components(graph: &SsnGraph) -> Vec<Component> {
    let mut visited = BitVec::from_elem(graph.len(), false);
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    let mut components = Vec::new();

    for seed in graph.nodes() {
        if visited[seed.id.index()] {
            continue;
        }

        visited.set(seed.id.index(), true);
        queue.push_back(seed.id);
        let mut members = Vec::new();

        while let Some(current) = queue.pop_front() {
            members.push(current);
            for &next in &graph.node(current).adjacency {
                if !visited[next.index()] {
                    visited.set(next.index(), true);
                    queue.push_back(next);
                }
            }
        }

        // Adjacency sets are hashed; sort so output does not depend on their iteration order.
        members.sort_unstable();
        components.push(Component { members });
    }

    debug!("Extracted {} components from {} nodes", components.len(), graph.len());
    components
}

/// Orders components by descending size and assigns 1-based ranks.
/// Equal sizes keep their extraction order.
pub fn rank(components: &[Component]) -> Vec<RankedCluster> {
    let mut order: Vec<&Component> = components.iter().collect();
    order.sort_by(|a, b| b.len().cmp(&a.len()));

    order
        .into_iter()
        .enumerate()
        .map(|(i, component)| RankedCluster {
            rank: i + 1,
            members: component.clone(),
        })
        .collect()
}
