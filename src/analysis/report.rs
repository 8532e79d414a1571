use std::fmt::Display;

use petgraph::stable_graph::NodeIndex;

use crate::graph::{
    edge::Link,
    node::{Node, Role},
    social_graph::SocialGraph,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub nodes: usize,
    pub edges: usize,
    pub teachers: usize,
    pub students: usize,
}

impl Summary {
    pub fn of<S: AsRef<str>>(graph: &SocialGraph, teacher_prefixes: &[S]) -> Self {
        let teachers = graph
            .node_indices()
            .filter(|&ix| graph.role(ix, teacher_prefixes) == Role::Teacher)
            .count();
        Summary {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            teachers,
            students: graph.node_count() - teachers,
        }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Nodes:    {}", self.nodes)?;
        writeln!(f, "Edges:    {}", self.edges)?;
        writeln!(f, "Teachers: {}", self.teachers)?;
        write!(f, "Students: {}", self.students)
    }
}

/// A node and everyone it is directly connected to.
#[derive(Debug, Clone)]
pub struct Connection<'a> {
    pub node: &'a Node,
    pub role: Role,
    pub neighbors: Vec<(&'a Node, &'a Link)>,
}

impl Display for Connection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let heading = match self.role {
            Role::Student => "has friends",
            Role::Teacher => "has connections",
        };
        write!(f, "{} {} (id {}) {}:", self.role, self.node.label, self.node.id, heading)?;
        if self.neighbors.is_empty() {
            write!(f, "\n\t(none)")?;
        }
        for (other, link) in &self.neighbors {
            write!(f, "\n\t{} (Strength: {})", other.label, link.label)?;
        }
        Ok(())
    }
}

fn connection<'a, S: AsRef<str>>(
    graph: &'a SocialGraph,
    index: NodeIndex,
    teacher_prefixes: &[S],
) -> Connection<'a> {
    let neighbors = graph
        .neighbors(index)
        .into_iter()
        .map(|(other, link)| (graph.node(other), link))
        .collect();
    Connection {
        node: graph.node(index),
        role: graph.role(index, teacher_prefixes),
        neighbors,
    }
}

/// Every node in input order with its neighbours.
pub fn connections<'a, S: AsRef<str>>(graph: &'a SocialGraph, teacher_prefixes: &[S]) -> Vec<Connection<'a>> {
    graph
        .node_indices()
        .map(|ix| connection(graph, ix, teacher_prefixes))
        .collect()
}

/// Nodes whose label equals `name`, ignoring case.
pub fn search<'a, S: AsRef<str>>(
    graph: &'a SocialGraph,
    name: &str,
    teacher_prefixes: &[S],
) -> Vec<Connection<'a>> {
    let wanted = name.trim().to_lowercase();
    graph
        .node_indices()
        .filter(|&ix| graph.node(ix).label.to_lowercase() == wanted)
        .map(|ix| connection(graph, ix, teacher_prefixes))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{graph::node::DEFAULT_TEACHER_PREFIXES, input::source::GraphFile};

    fn sample() -> SocialGraph {
        GraphFile::parse(include_str!("../../test_data/graph_data.json"))
            .and_then(GraphFile::into_graph)
            .expect("sample should build")
    }

    #[test]
    fn test_summary() {
        let graph = sample();
        let summary = Summary::of(&graph, &DEFAULT_TEACHER_PREFIXES);
        assert_eq!(
            summary,
            Summary {
                nodes: 15,
                edges: 20,
                teachers: 5,
                students: 10
            }
        );
    }

    #[test]
    fn test_connections_cover_every_node() {
        let graph = sample();
        let all = connections(&graph, &DEFAULT_TEACHER_PREFIXES);
        assert_eq!(all.len(), 15);
        assert_eq!(all[0].node.label, "Mati");
        let degree_sum: usize = all.iter().map(|c| c.neighbors.len()).sum();
        assert_eq!(degree_sum, 2 * graph.edge_count());

        let zaheer = all.iter().find(|c| c.node.label == "Sir_Zaheer").expect("Sir_Zaheer");
        assert_eq!(zaheer.role, Role::Teacher);
        assert_eq!(
            zaheer.to_string(),
            "Teacher Sir_Zaheer (id 14) has connections:\n\tUmair (Strength: 6)"
        );
    }

    #[test]
    fn test_search_ignores_case() {
        let graph = sample();
        let found = search(&graph, "eman", &DEFAULT_TEACHER_PREFIXES);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].role, Role::Student);
        let mut names: Vec<&str> = found[0].neighbors.iter().map(|(n, _)| n.label.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["Abdurehman", "Ibrahim", "Sir_Atif"]);

        assert!(search(&graph, "Nobody", &DEFAULT_TEACHER_PREFIXES).is_empty());
    }
}
