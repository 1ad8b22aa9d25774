use std::collections::BTreeMap;

use crate::measures::GraphMeasure;
use crate::pathways::PathwayGraph;

#[derive(Debug, Clone, Copy, Default)]
pub struct InDegreeCentrality;

#[derive(Debug, Clone, Copy, Default)]
pub struct OutDegreeCentrality;

/// In plus out degree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeCentrality;

impl GraphMeasure for InDegreeCentrality {
    fn id(&self) -> &str {
        "in-degree"
    }

    fn compute(&self, graph: &PathwayGraph) -> BTreeMap<String, f64> {
        normalized_degree(graph, |idx| graph.in_degree(idx))
    }
}

impl GraphMeasure for OutDegreeCentrality {
    fn id(&self) -> &str {
        "out-degree"
    }

    fn compute(&self, graph: &PathwayGraph) -> BTreeMap<String, f64> {
        normalized_degree(graph, |idx| graph.out_degree(idx))
    }
}

impl GraphMeasure for DegreeCentrality {
    fn id(&self) -> &str {
        "degree"
    }

    fn compute(&self, graph: &PathwayGraph) -> BTreeMap<String, f64> {
        normalized_degree(graph, |idx| graph.in_degree(idx) + graph.out_degree(idx))
    }
}

/// degree / (n - 1); single-node and empty graphs give 1 per node.
fn normalized_degree<F>(graph: &PathwayGraph, degree: F) -> BTreeMap<String, f64>
where
    F: Fn(petgraph::graph::NodeIndex) -> usize,
{
    let inner = graph.inner();
    let n = inner.node_count();
    let mut out = BTreeMap::new();
    if n <= 1 {
        for node in graph.nodes() {
            out.insert(node.id.clone(), 1.0);
        }
        return out;
    }
    let scale = 1.0 / (n - 1) as f64;
    for idx in inner.node_indices() {
        out.insert(inner[idx].id.clone(), degree(idx) as f64 * scale);
    }
    out
}
