use std::collections::{BTreeMap, BTreeSet};

use crate::input::{MutationRecord, MutationTable};
use crate::model::ScoringProfile;

/// Maximum mutation percentage per biomarker.
pub type GeneMutations = BTreeMap<String, f64>;

/// Rows of `patient_id` with the profile's technology and an accepted test result.
pub fn filter_patient_rows<'a>(
    table: &'a MutationTable,
    patient_id: &str,
    profile: &ScoringProfile,
) -> Vec<&'a MutationRecord> {
    table
        .rows_for(patient_id)
        .filter(|r| r.technology == profile.technology && profile.accepts_result(&r.test_result))
        .collect()
}

/// Per-gene maximum over rows whose biomarker is in `genes`.
/// Rows without a percentage are ignored.
pub fn max_by_gene(rows: &[&MutationRecord], genes: &BTreeSet<&str>) -> GeneMutations {
    let mut out = GeneMutations::new();
    for row in rows {
        if !genes.contains(row.biomarker.as_str()) {
            continue;
        }
        let Some(percent) = row.percent_mutated else {
            continue;
        };
        out.entry(row.biomarker.clone())
            .and_modify(|v| *v = v.max(percent))
            .or_insert(percent);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_filter.rs"]
mod tests;
