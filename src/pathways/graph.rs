use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

/// A resolved leaf gene.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneNode {
    pub id: String,
    /// Biomarker symbol; joins against mutation data, not unique across ids.
    pub label: String,
    pub ownership_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEdge {
    pub label: String,
}

/// Directed gene interaction graph keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct PathwayGraph {
    graph: DiGraph<GeneNode, InteractionEdge>,
    index: HashMap<String, NodeIndex>,
}

impl PathwayGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, or replaces the attributes of an existing node with the same id.
    pub fn add_node(&mut self, node: GeneNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.id) {
            self.graph[idx] = node;
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    /// Adds `source -> target`, overwriting the label of an existing edge.
    /// Returns false when either endpoint is not a node.
    pub fn add_edge(&mut self, source: &str, target: &str, label: &str) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&src), Some(&tgt)) => {
                self.graph.update_edge(
                    src,
                    tgt,
                    InteractionEdge {
                        label: label.to_string(),
                    },
                );
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&GeneNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn edge_label(&self, source: &str, target: &str) -> Option<&str> {
        let src = *self.index.get(source)?;
        let tgt = *self.index.get(target)?;
        self.graph
            .find_edge(src, tgt)
            .map(|e| self.graph[e].label.as_str())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GeneNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    pub fn inner(&self) -> &DiGraph<GeneNode, InteractionEdge> {
        &self.graph
    }
}
