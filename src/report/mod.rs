use serde::Serialize;

pub mod json;
pub mod text;
pub mod tsv;

/// Descriptive statistics of one pathway column, over non-missing scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub missing: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub technology: String,
    pub strategy: String,
    pub measure: String,
    pub include_complex_factor: bool,
    pub arm: Option<String>,

    pub n_patients: usize,
    pub n_patients_no_data: usize,
    pub n_pathways: usize,

    pub pathways: Vec<ColumnStats>,
    pub pathway_failures: Vec<FailureEntry>,
}

pub fn format_score(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.6}", v),
        None => "NA".to_string(),
    }
}

/// Linear-interpolated quantile of an ascending slice.
pub fn quantile_linear(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub fn describe(name: &str, values: &[Option<f64>]) -> ColumnStats {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let count = present.len();
    let missing = values.len() - count;

    if count == 0 {
        return ColumnStats {
            name: name.to_string(),
            count,
            missing,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    let mean = present.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = present.iter().map(|v| (v - mean) * (v - mean)).sum();
        Some((ss / (count - 1) as f64).sqrt())
    } else {
        None
    };

    ColumnStats {
        name: name.to_string(),
        count,
        missing,
        mean: Some(mean),
        std,
        min: present.first().copied(),
        q25: Some(quantile_linear(&present, 0.25)),
        median: Some(quantile_linear(&present, 0.50)),
        q75: Some(quantile_linear(&present, 0.75)),
        max: present.last().copied(),
    }
}
