use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::input::InputError;
use crate::model::{ScoreTable, ScoringProfile};
use crate::pipeline::stage1_pathways::PathwayLoadFailure;
use crate::report::json::render_summary_json;
use crate::report::text::render_summary_text;
use crate::report::tsv::render_score_table;
use crate::report::{FailureEntry, SummaryData, describe};

pub const SCORES_FILE: &str = "pathway_scores.tsv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_FILE: &str = "report.txt";

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub table: &'a ScoreTable,
    pub profile: &'a ScoringProfile,
    pub failures: &'a [PathwayLoadFailure],
    pub arm: Option<&'a str>,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn build_summary(input: &Stage4Input<'_>) -> SummaryData {
    let pathways = input
        .table
        .pathway_names
        .iter()
        .map(|name| {
            let column = input.table.column(name).unwrap_or_default();
            describe(name, &column)
        })
        .collect();

    let pathway_failures = input
        .failures
        .iter()
        .map(|f| FailureEntry {
            path: f.path.display().to_string(),
            error: f.error.to_string(),
        })
        .collect();

    SummaryData {
        tool_name: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        technology: input.profile.technology.clone(),
        strategy: input.profile.strategy.to_string(),
        measure: input.profile.measure.to_string(),
        include_complex_factor: input.profile.include_complex_factor,
        arm: input.arm.map(str::to_string),
        n_patients: input.table.rows.len(),
        n_patients_no_data: input.table.no_data_count(),
        n_pathways: input.table.pathway_names.len(),
        pathways,
        pathway_failures,
    }
}

/// Writes the score table, JSON summary and text report into `out_dir`;
/// returns the text report.
pub fn write_reports(input: &Stage4Input<'_>, out_dir: &Path) -> Result<String, InputError> {
    fs::create_dir_all(out_dir)?;

    let summary = build_summary(input);
    let text = render_summary_text(&summary);

    write_text(&out_dir.join(SCORES_FILE), &render_score_table(input.table))?;
    write_text(&out_dir.join(SUMMARY_FILE), &render_summary_json(&summary)?)?;
    write_text(&out_dir.join(REPORT_FILE), &text)?;

    tracing::info!("reports written to {}", out_dir.display());
    Ok(text)
}

fn write_text(path: &Path, contents: &str) -> Result<(), InputError> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(contents.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
