use std::sync::Arc;

use rayon::prelude::*;

use crate::input::{MutationRecord, MutationTable};
use crate::measures::GraphMeasure;
use crate::model::{PathwayScore, PatientScores, ScoreRow, ScoreTable, ScoringProfile, StrategyKind};
use crate::pathways::{Pathway, PathwaySet};
use crate::pipeline::stage2_filter::{GeneMutations, filter_patient_rows, max_by_gene};

/// Turns per-gene maxima (already restricted to the pathway) into one score.
pub trait ScoringStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn score(&self, mutations: &GeneMutations, pathway: &Pathway) -> f64;
}

/// `Σ w[g]·m[g] / Σ w` with weights from a graph measure.
pub struct WeightedAverage {
    pub measure: Arc<dyn GraphMeasure>,
    pub include_complex_factor: bool,
}

impl ScoringStrategy for WeightedAverage {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Weighted
    }

    fn score(&self, mutations: &GeneMutations, pathway: &Pathway) -> f64 {
        let weights = pathway.calculate_measure(self.measure.as_ref(), self.include_complex_factor);
        let total: f64 = weights.values().sum();
        if total == 0.0 {
            return 0.0;
        }
        let weighted: f64 = mutations
            .iter()
            .map(|(gene, percent)| weights.get(gene).copied().unwrap_or(0.0) * percent)
            .sum();
        weighted / total
    }
}

/// Summed per-gene maxima over the number of top-level gene groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineAverage;

impl ScoringStrategy for BaselineAverage {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Baseline
    }

    fn score(&self, mutations: &GeneMutations, pathway: &Pathway) -> f64 {
        let groups = pathway.group_count();
        if groups == 0 {
            return 0.0;
        }
        mutations.values().sum::<f64>() / groups as f64
    }
}

/// Score of one patient against one pathway; `None` when the patient has no
/// usable mutation rows at all.
pub fn score_pathway(
    patient_id: &str,
    table: &MutationTable,
    pathway: &Pathway,
    strategy: &dyn ScoringStrategy,
    profile: &ScoringProfile,
) -> Option<f64> {
    let rows = filter_patient_rows(table, patient_id, profile);
    if rows.is_empty() {
        return None;
    }
    Some(score_filtered_rows(&rows, pathway, strategy))
}

/// Restricts already-filtered rows to the pathway's genes and scores them;
/// no overlap scores 0.
pub fn score_filtered_rows(
    rows: &[&MutationRecord],
    pathway: &Pathway,
    strategy: &dyn ScoringStrategy,
) -> f64 {
    let mutations = max_by_gene(rows, &pathway.genes());
    if mutations.is_empty() {
        return 0.0;
    }
    strategy.score(&mutations, pathway)
}

pub struct ScoringEngine {
    profile: ScoringProfile,
    weighted: WeightedAverage,
    baseline: BaselineAverage,
}

impl ScoringEngine {
    pub fn new(profile: ScoringProfile) -> Self {
        let measure = profile.measure.build();
        Self::with_measure(profile, measure)
    }

    /// Uses `measure` for the weighted strategy instead of the profile's measure kind.
    pub fn with_measure(profile: ScoringProfile, measure: Arc<dyn GraphMeasure>) -> Self {
        let weighted = WeightedAverage {
            measure,
            include_complex_factor: profile.include_complex_factor,
        };
        Self {
            profile,
            weighted,
            baseline: BaselineAverage,
        }
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn strategy_for(&self, pathway_name: &str) -> &dyn ScoringStrategy {
        match self.profile.strategy_for(pathway_name) {
            StrategyKind::Weighted => &self.weighted,
            StrategyKind::Baseline => &self.baseline,
        }
    }

    pub fn score_patient(
        &self,
        patient_id: &str,
        table: &MutationTable,
        pathways: &PathwaySet,
    ) -> PatientScores {
        let rows = filter_patient_rows(table, patient_id, &self.profile);
        if rows.is_empty() {
            tracing::debug!("patient {patient_id}: no rows after filtering");
            return PatientScores::NoData;
        }

        let mut scores = Vec::with_capacity(pathways.len());
        for pathway in pathways.iter() {
            let score = score_filtered_rows(&rows, pathway, self.strategy_for(pathway.name()));
            scores.push(PathwayScore {
                patient_id: patient_id.to_string(),
                pathway_name: pathway.name().to_string(),
                score,
            });
        }
        PatientScores::Scored(scores)
    }

    /// Scores all patients in parallel; rows keep the order of `patient_ids`.
    pub fn score_patients(
        &self,
        patient_ids: &[String],
        table: &MutationTable,
        pathways: &PathwaySet,
    ) -> ScoreTable {
        let rows = patient_ids
            .par_iter()
            .map(|patient_id| {
                let (has_data, scores) = match self.score_patient(patient_id, table, pathways) {
                    PatientScores::NoData => (false, vec![None; pathways.len()]),
                    PatientScores::Scored(scores) => {
                        (true, scores.into_iter().map(|s| Some(s.score)).collect())
                    }
                };
                ScoreRow {
                    patient_id: patient_id.clone(),
                    has_data,
                    scores,
                }
            })
            .collect::<Vec<_>>();

        ScoreTable {
            pathway_names: pathways.names(),
            rows,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stage3Inputs<'a> {
    pub patient_ids: &'a [String],
    pub mutations: &'a MutationTable,
    pub pathways: &'a PathwaySet,
    pub profile: &'a ScoringProfile,
}

pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> ScoreTable {
    let engine = ScoringEngine::new(inputs.profile.clone());
    let table = engine.score_patients(inputs.patient_ids, inputs.mutations, inputs.pathways);
    tracing::info!(
        "scored {} patients against {} pathways ({} without usable mutation data)",
        table.rows.len(),
        table.pathway_names.len(),
        table.no_data_count()
    );
    table
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_scores.rs"]
mod tests;
