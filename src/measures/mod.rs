use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pathways::PathwayGraph;

pub mod betweenness;
pub mod degree;

pub use betweenness::BetweennessCentrality;
pub use degree::{DegreeCentrality, InDegreeCentrality, OutDegreeCentrality};

/// A per-node scalar computed from the whole graph.
///
/// Implementations must be deterministic: `Pathway` caches results by `id()`.
pub trait GraphMeasure: Send + Sync {
    fn id(&self) -> &str;

    /// Values keyed by node id.
    fn compute(&self, graph: &PathwayGraph) -> BTreeMap<String, f64>;
}

/// Every node weighs 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl GraphMeasure for Uniform {
    fn id(&self) -> &str {
        "uniform"
    }

    fn compute(&self, graph: &PathwayGraph) -> BTreeMap<String, f64> {
        graph.nodes().map(|n| (n.id.clone(), 1.0)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasureKind {
    Uniform,
    InDegree,
    OutDegree,
    Degree,
    Betweenness,
}

impl MeasureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MeasureKind::Uniform => "uniform",
            MeasureKind::InDegree => "in-degree",
            MeasureKind::OutDegree => "out-degree",
            MeasureKind::Degree => "degree",
            MeasureKind::Betweenness => "betweenness",
        }
    }

    pub fn build(self) -> Arc<dyn GraphMeasure> {
        match self {
            MeasureKind::Uniform => Arc::new(Uniform),
            MeasureKind::InDegree => Arc::new(InDegreeCentrality),
            MeasureKind::OutDegree => Arc::new(OutDegreeCentrality),
            MeasureKind::Degree => Arc::new(DegreeCentrality),
            MeasureKind::Betweenness => Arc::new(BetweennessCentrality),
        }
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(MeasureKind::Uniform),
            "in-degree" => Ok(MeasureKind::InDegree),
            "out-degree" => Ok(MeasureKind::OutDegree),
            "degree" => Ok(MeasureKind::Degree),
            "betweenness" => Ok(MeasureKind::Betweenness),
            other => Err(format!(
                "unknown measure `{other}` (use uniform|in-degree|out-degree|degree|betweenness)"
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/measures/tests.rs"]
mod tests;
