use petgraph::{
    algo::dijkstra,
    stable_graph::NodeIndex,
    unionfind::UnionFind,
    visit::{EdgeRef, IntoEdgeReferences, NodeIndexable},
};

use crate::{
    error::{Error, Result},
    graph::{node::NodeId, social_graph::SocialGraph},
};

fn ensure_non_negative(graph: &SocialGraph) -> Result<()> {
    for (a, b, link) in graph.edges() {
        if link.weight < 0.0 {
            return Err(Error::NegativeWeight {
                from: graph.node(a).id.clone(),
                to: graph.node(b).id.clone(),
                weight: link.weight,
            });
        }
    }
    Ok(())
}

/// Weighted distance from `from` to every node, in input order. `None` marks an unreachable node.
pub fn shortest_paths(graph: &SocialGraph, from: &NodeId) -> Result<Vec<(NodeIndex, Option<f64>)>> {
    let start = graph.require(from)?;
    ensure_non_negative(graph)?;
    let distances = dijkstra(&graph.graph, start, None, |edge| edge.weight().weight);
    Ok(graph
        .node_indices()
        .map(|ix| (ix, distances.get(&ix).copied()))
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    /// Chosen edges in the order Kruskal picked them (non-decreasing weight).
    pub edges: Vec<(NodeIndex, NodeIndex, f64)>,
    pub total_weight: f64,
    /// Number of connected components the forest spans.
    pub components: usize,
}

/// Kruskal's minimum spanning forest. Disconnected graphs give one tree per component.
pub fn minimum_spanning_tree(graph: &SocialGraph) -> SpanningTree {
    let mut candidates: Vec<_> = graph
        .graph
        .edge_references()
        .map(|edge| (edge.source(), edge.target(), edge.weight().weight))
        .collect();
    candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut sets = UnionFind::<usize>::new(NodeIndexable::node_bound(&graph.graph));
    let mut edges = Vec::new();
    let mut total_weight = 0.0;
    for (a, b, weight) in candidates {
        if sets.union(a.index(), b.index()) {
            edges.push((a, b, weight));
            total_weight += weight;
        }
    }

    SpanningTree {
        components: graph.node_count() - edges.len(),
        edges,
        total_weight,
    }
}
