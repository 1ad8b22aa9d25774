use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod aliases;
pub mod assemble;
pub mod coexpression;
pub mod graph;
pub mod loader;

pub use graph::{GeneNode, InteractionEdge, PathwayGraph};
pub use coexpression::{CoexpressionMatrix, load_coexpression_matrix, pathway_from_threshold};
pub use loader::{build_pathway, load_pathway};

use crate::input::InputError;
use crate::measures::GraphMeasure;

/// Per-gene weights keyed by biomarker label.
pub type WeightSeries = BTreeMap<String, f64>;

type MeasureKey = (String, bool);

/// A named pathway graph with a per-instance measure cache.
#[derive(Debug)]
pub struct Pathway {
    name: String,
    graph: PathwayGraph,
    group_count: usize,
    measures: RwLock<HashMap<MeasureKey, Arc<WeightSeries>>>,
}

impl Pathway {
    pub fn new(name: impl Into<String>, graph: PathwayGraph, group_count: usize) -> Self {
        Self {
            name: name.into(),
            graph,
            group_count,
            measures: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &PathwayGraph {
        &self.graph
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Biomarker labels of all gene nodes.
    pub fn genes(&self) -> BTreeSet<&str> {
        self.graph.nodes().map(|n| n.label.as_str()).collect()
    }

    /// Weights from `measure`, re-indexed by label and optionally scaled by
    /// ownership weight. Results are cached per `(measure id, flag)`.
    ///
    /// When two node ids share a label, the node later in graph order wins.
    pub fn calculate_measure(
        &self,
        measure: &dyn GraphMeasure,
        include_complex_factor: bool,
    ) -> Arc<WeightSeries> {
        let key = (measure.id().to_string(), include_complex_factor);
        if let Some(hit) = self.read_cache().get(&key) {
            return Arc::clone(hit);
        }

        let raw = measure.compute(&self.graph);
        let mut series = WeightSeries::new();
        for node in self.graph.nodes() {
            let Some(&value) = raw.get(&node.id) else {
                continue;
            };
            let value = if include_complex_factor {
                value * node.ownership_weight
            } else {
                value
            };
            series.insert(node.label.clone(), value);
        }

        let mut cache = self.write_cache();
        Arc::clone(cache.entry(key).or_insert_with(|| Arc::new(series)))
    }

    pub fn cached_measure_count(&self) -> usize {
        self.read_cache().len()
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<MeasureKey, Arc<WeightSeries>>> {
        self.measures.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<MeasureKey, Arc<WeightSeries>>> {
        self.measures.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pathways of one run, ordered by name.
#[derive(Debug, Default)]
pub struct PathwaySet {
    pub pathways: Vec<Pathway>,
}

impl PathwaySet {
    pub fn new(mut pathways: Vec<Pathway>) -> Self {
        pathways.sort_by(|a, b| a.name.cmp(&b.name));
        Self { pathways }
    }

    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pathway> {
        self.pathways.iter()
    }

    /// Adds a pathway in name order; names must stay unique.
    pub fn insert(&mut self, pathway: Pathway) -> Result<(), InputError> {
        match self
            .pathways
            .binary_search_by(|p| p.name.as_str().cmp(pathway.name()))
        {
            Ok(_) => Err(InputError::InvalidInput(format!(
                "pathway name {} is already loaded",
                pathway.name()
            ))),
            Err(pos) => {
                self.pathways.insert(pos, pathway);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Pathway> {
        self.pathways.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.pathways.iter().map(|p| p.name.clone()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pathways/tests.rs"]
mod tests;
