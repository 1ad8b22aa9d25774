use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::input::{InputError, open_maybe_gz};
use crate::measures::MeasureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Measure-weighted average of per-gene mutation.
    Weighted,
    /// Legacy: summed per-gene mutation over the top-level group count.
    Baseline,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Weighted => "weighted",
            StrategyKind::Baseline => "baseline",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weighted" => Ok(StrategyKind::Weighted),
            "baseline" => Ok(StrategyKind::Baseline),
            other => Err(format!("unknown strategy `{other}` (use weighted|baseline)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub technology: String,
    pub accepted_results: Vec<String>,
    pub strategy: StrategyKind,
    pub measure: MeasureKind,
    pub include_complex_factor: bool,
    /// Per-pathway strategy overrides, keyed by pathway name.
    pub pathway_strategies: BTreeMap<String, StrategyKind>,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            technology: "NGS Q3".to_string(),
            accepted_results: vec![
                "variantdetected".to_string(),
                "Mutated, Pathogenic".to_string(),
            ],
            strategy: StrategyKind::Weighted,
            measure: MeasureKind::InDegree,
            include_complex_factor: false,
            pathway_strategies: BTreeMap::new(),
        }
    }

    pub fn baseline_v1() -> Self {
        let mut base = Self::default_v1();
        base.strategy = StrategyKind::Baseline;
        base
    }

    pub fn from_json_file(path: &Path) -> Result<Self, InputError> {
        let reader = open_maybe_gz(path)?;
        let profile = serde_json::from_reader(reader)?;
        Ok(profile)
    }

    pub fn strategy_for(&self, pathway_name: &str) -> StrategyKind {
        self.pathway_strategies
            .get(pathway_name)
            .copied()
            .unwrap_or(self.strategy)
    }

    pub fn accepts_result(&self, test_result: &str) -> bool {
        self.accepted_results.iter().any(|r| r == test_result)
    }
}
