use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::input::{InputError, open_maybe_gz};

pub const COL_PATIENT: &str = "PatientFirstName";
pub const COL_TECHNOLOGY: &str = "Technology";
pub const COL_TEST_RESULT: &str = "TestResult";
pub const COL_BIOMARKER: &str = "Biomarker";
pub const COL_PERCENT: &str = "NGS_PercentMutated";

const REQUIRED_COLUMNS: &[&str] = &[
    COL_PATIENT,
    COL_TECHNOLOGY,
    COL_TEST_RESULT,
    COL_BIOMARKER,
    COL_PERCENT,
];

/// One row of patient sequencing results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MutationRecord {
    #[serde(rename = "PatientFirstName")]
    pub patient_id: String,
    #[serde(rename = "Biomarker")]
    pub biomarker: String,
    #[serde(rename = "Technology")]
    pub technology: String,
    #[serde(rename = "TestResult")]
    pub test_result: String,
    /// Empty or non-numeric cells read as `None`.
    #[serde(rename = "NGS_PercentMutated", deserialize_with = "csv::invalid_option")]
    pub percent_mutated: Option<f64>,
}

/// Read-only mutation table indexed by patient.
#[derive(Debug, Clone, Default)]
pub struct MutationTable {
    records: Vec<MutationRecord>,
    by_patient: HashMap<String, Vec<usize>>,
}

impl MutationTable {
    pub fn from_records(records: Vec<MutationRecord>) -> Self {
        let mut by_patient: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_patient
                .entry(record.patient_id.clone())
                .or_default()
                .push(idx);
        }
        Self {
            records,
            by_patient,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MutationRecord] {
        &self.records
    }

    pub fn rows_for<'a>(&'a self, patient_id: &str) -> impl Iterator<Item = &'a MutationRecord> {
        self.by_patient
            .get(patient_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.records[idx])
    }
}

pub fn load_mutations(path: &Path) -> Result<MutationTable, InputError> {
    let reader = open_maybe_gz(path)?;
    let table = read_mutations(reader, path)?;
    tracing::info!(
        "loaded {} mutation rows from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

pub fn read_mutations<R: Read>(reader: R, path: &Path) -> Result<MutationTable, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(InputError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<MutationRecord>() {
        records.push(row?);
    }
    Ok(MutationTable::from_records(records))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/mutations.rs"]
mod tests;
