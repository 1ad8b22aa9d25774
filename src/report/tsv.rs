use crate::input::mutations::COL_PATIENT;
use crate::model::ScoreTable;
use crate::report::format_score;

pub fn render_score_table(table: &ScoreTable) -> String {
    let mut out = String::new();
    out.push_str(COL_PATIENT);
    for name in &table.pathway_names {
        out.push('\t');
        out.push_str(name);
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&row.patient_id);
        for &score in &row.scores {
            out.push('\t');
            out.push_str(&format_score(score));
        }
        out.push('\n');
    }
    out
}
