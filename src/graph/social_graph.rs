use std::collections::HashMap;

use petgraph::{
    stable_graph::{EdgeIndex, NodeIndex, StableUnGraph},
    visit::{EdgeRef, IntoEdgeReferences},
};

use crate::{
    error::{Error, Result},
    graph::{
        edge::Link,
        node::{Node, NodeId, Role},
    },
};

/// Undirected weighted graph of students and teachers.
///
/// node_id_to_index_map maps the ids from the input file to graph indices to allow safe lookups.
/// Nodes are never removed, so iterating indices follows insertion order.
#[derive(Debug, Default)]
pub struct SocialGraph {
    pub graph: StableUnGraph<Node, Link>,
    pub node_id_to_index_map: HashMap<NodeId, NodeIndex>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or relabel the existing node with the same id.
    pub fn upsert_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&index) = self.node_id_to_index_map.get(&node.id) {
            log::warn!(
                "Duplicate node id {}, relabelling {:?} as {:?}",
                node.id,
                self.graph[index].label,
                node.label
            );
            self.graph[index].label = node.label;
            return index;
        }
        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_id_to_index_map.insert(id, index);
        index
    }

    /// Connect two existing nodes. A second edge between the same pair replaces the weight of the first.
    pub fn upsert_edge(&mut self, from: &NodeId, to: &NodeId, link: Link) -> Result<EdgeIndex> {
        let a = self.require(from)?;
        let b = self.require(to)?;
        if let Some(existing) = self.graph.find_edge(a, b) {
            log::warn!(
                "Duplicate edge {from} -- {to}, weight {} replaced by {}",
                self.graph[existing].label,
                link.label
            );
        }
        Ok(self.graph.update_edge(a, b, link))
    }

    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_id_to_index_map.get(id).copied()
    }

    pub fn require(&self, id: &NodeId) -> Result<NodeIndex> {
        self.index_of(id).ok_or_else(|| Error::UnknownNode(id.clone()))
    }

    /// Find a node from an id typed by the user. `12` matches an integer id first and the
    /// string id `"12"` otherwise.
    pub fn resolve(&self, raw: &str) -> Result<&NodeId> {
        let parsed = NodeId::parse(raw);
        let index = match self.index_of(&parsed) {
            Some(index) => index,
            None => self
                .index_of(&NodeId::Text(raw.to_string()))
                .ok_or(Error::UnknownNode(parsed))?,
        };
        Ok(&self.graph[index].id)
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.graph[index]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Every edge once, as (endpoint, endpoint, payload).
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Link)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }

    /// Neighbours of a node together with the connecting edge, most recently added first.
    pub fn neighbors(&self, index: NodeIndex) -> Vec<(NodeIndex, &Link)> {
        self.graph
            .edges(index)
            .map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (other, edge.weight())
            })
            .collect()
    }

    pub fn role<S: AsRef<str>>(&self, index: NodeIndex, teacher_prefixes: &[S]) -> Role {
        self.graph[index].role(teacher_prefixes)
    }
}
