/*!
JSON graph file format.

```json
{
  "nodes": [{"id": 0, "label": "Mati"}, {"id": 10, "label": "Sir_Khwaja"}],
  "edges": [{"from": 0, "to": 10, "weight": 4}]
}
```

Extra fields on any record are ignored.
*/

use std::{fs, path::Path, time::Instant};

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::{
    error::{Error, Result},
    graph::{
        edge::Link,
        node::{Node, NodeId},
        social_graph::SocialGraph,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Number,
}

impl GraphFile {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the graph: all nodes first, then the edges between them.
    pub fn into_graph(self) -> Result<SocialGraph> {
        let mut graph = SocialGraph::new();
        for record in self.nodes {
            graph.upsert_node(Node::new(record.id, record.label));
        }
        for record in self.edges {
            // Only reachable with serde_json's arbitrary_precision numbers
            let link = Link::from_number(&record.weight).ok_or_else(|| Error::InvalidWeight {
                from: record.from.clone(),
                to: record.to.clone(),
                weight: record.weight.to_string(),
            })?;
            graph.upsert_edge(&record.from, &record.to, link)?;
        }
        Ok(graph)
    }
}

/// Load a graph file from disk.
pub fn load_graph(path: impl AsRef<Path>) -> Result<SocialGraph> {
    let path = path.as_ref();
    let started = Instant::now();
    let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let file = GraphFile::parse(&json)?;
    let (node_records, edge_records) = (file.nodes.len(), file.edges.len());
    let graph = file.into_graph()?;
    log::info!(
        "Loaded {} nodes and {} edges from {} ({} node records, {} edge records) in {:?}",
        graph.node_count(),
        graph.edge_count(),
        path.display(),
        node_records,
        edge_records,
        started.elapsed()
    );
    Ok(graph)
}
