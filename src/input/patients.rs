use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::input::mutations::COL_PATIENT;
use crate::input::{InputError, open_maybe_gz};

pub const COL_ARM: &str = "arm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientEntry {
    pub patient_id: String,
    pub arm: Option<String>,
}

/// Patients to score, in registry order.
#[derive(Debug, Clone, Default)]
pub struct PatientRegistry {
    pub patients: Vec<PatientEntry>,
}

impl PatientRegistry {
    pub fn ids(&self) -> Vec<String> {
        self.patients.iter().map(|p| p.patient_id.clone()).collect()
    }

    pub fn ids_in_arm(&self, arm: &str) -> Vec<String> {
        self.patients
            .iter()
            .filter(|p| p.arm.as_deref() == Some(arm))
            .map(|p| p.patient_id.clone())
            .collect()
    }

    pub fn has_arms(&self) -> bool {
        self.patients.iter().any(|p| p.arm.is_some())
    }
}

pub fn load_patients(path: &Path) -> Result<PatientRegistry, InputError> {
    let reader = open_maybe_gz(path)?;
    let registry = read_patients(reader, path)?;
    tracing::info!(
        "loaded {} patients from {}",
        registry.patients.len(),
        path.display()
    );
    Ok(registry)
}

pub fn read_patients<R: Read>(reader: R, path: &Path) -> Result<PatientRegistry, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let patient_col = headers
        .iter()
        .position(|h| h == COL_PATIENT)
        .ok_or_else(|| InputError::MissingColumn {
            path: path.to_path_buf(),
            column: COL_PATIENT.to_string(),
        })?;
    let arm_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(COL_ARM));

    let mut seen = HashSet::new();
    let mut patients = Vec::new();
    for (row_idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let line_no = row_idx + 2;
        let patient_id = row.get(patient_col).unwrap_or("").to_string();
        if patient_id.is_empty() {
            tracing::warn!("patient row has empty id; skipping (line {line_no})");
            continue;
        }
        if !seen.insert(patient_id.clone()) {
            tracing::warn!(
                "duplicate patient in registry; keeping first (line {line_no}, patient {patient_id})"
            );
            continue;
        }
        let arm = arm_col
            .and_then(|idx| row.get(idx))
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        patients.push(PatientEntry { patient_id, arm });
    }

    Ok(PatientRegistry { patients })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/patients.rs"]
mod tests;
