use std::collections::{BTreeMap, VecDeque};

use petgraph::Direction;

use crate::measures::GraphMeasure;
use crate::pathways::PathwayGraph;

/// Shortest-path betweenness on the directed graph (Brandes, unweighted),
/// normalised by `1 / ((n - 1)(n - 2))` when `n > 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BetweennessCentrality;

impl GraphMeasure for BetweennessCentrality {
    fn id(&self) -> &str {
        "betweenness"
    }

    fn compute(&self, graph: &PathwayGraph) -> BTreeMap<String, f64> {
        let inner = graph.inner();
        let n = inner.node_count();
        let mut centrality = vec![0.0f64; n];

        for source in inner.node_indices() {
            let s = source.index();
            let mut stack = Vec::with_capacity(n);
            let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut sigma = vec![0.0f64; n];
            let mut dist = vec![-1i64; n];
            sigma[s] = 1.0;
            dist[s] = 0;

            let mut queue = VecDeque::from([source]);
            while let Some(v) = queue.pop_front() {
                let vi = v.index();
                stack.push(vi);
                for w in inner.neighbors_directed(v, Direction::Outgoing) {
                    let wi = w.index();
                    if dist[wi] < 0 {
                        dist[wi] = dist[vi] + 1;
                        queue.push_back(w);
                    }
                    if dist[wi] == dist[vi] + 1 {
                        sigma[wi] += sigma[vi];
                        preds[wi].push(vi);
                    }
                }
            }

            let mut delta = vec![0.0f64; n];
            while let Some(w) = stack.pop() {
                for &v in &preds[w] {
                    delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
                }
                if w != s {
                    centrality[w] += delta[w];
                }
            }
        }

        if n > 2 {
            let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
            for value in &mut centrality {
                *value *= scale;
            }
        }

        inner
            .node_indices()
            .map(|idx| (inner[idx].id.clone(), centrality[idx.index()]))
            .collect()
    }
}
