use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathwayScore {
    pub patient_id: String,
    pub pathway_name: String,
    pub score: f64,
}

/// Outcome for one patient across a pathway set.
#[derive(Debug, Clone, PartialEq)]
pub enum PatientScores {
    /// No rows survived the technology/result filter.
    NoData,
    Scored(Vec<PathwayScore>),
}

impl PatientScores {
    pub fn get(&self, pathway_name: &str) -> Option<f64> {
        match self {
            PatientScores::NoData => None,
            PatientScores::Scored(scores) => scores
                .iter()
                .find(|s| s.pathway_name == pathway_name)
                .map(|s| s.score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub patient_id: String,
    /// False when the patient had no rows after filtering.
    pub has_data: bool,
    /// Aligned with `ScoreTable::pathway_names`; `None` marks missing data.
    pub scores: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreTable {
    pub pathway_names: Vec<String>,
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn column(&self, pathway_name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.pathway_names.iter().position(|n| n == pathway_name)?;
        Some(self.rows.iter().map(|r| r.scores[idx]).collect())
    }

    pub fn get(&self, patient_id: &str, pathway_name: &str) -> Option<f64> {
        let idx = self.pathway_names.iter().position(|n| n == pathway_name)?;
        self.rows
            .iter()
            .find(|r| r.patient_id == patient_id)
            .and_then(|r| r.scores[idx])
    }

    pub fn no_data_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.has_data).count()
    }
}
