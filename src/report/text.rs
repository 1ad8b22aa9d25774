use crate::report::{SummaryData, format_score};

pub fn render_summary_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Pathway Mutation Burden Report\n");
    out.push_str("==============================\n\n");

    out.push_str("1. Run\n");
    out.push_str(&format!("Technology filter: {}\n", data.technology));
    out.push_str(&format!("Scoring strategy: {}\n", data.strategy));
    out.push_str(&format!(
        "Graph measure: {} (complex factor: {})\n",
        data.measure,
        if data.include_complex_factor { "on" } else { "off" }
    ));
    if let Some(arm) = &data.arm {
        out.push_str(&format!("Arm: {}\n", arm));
    }
    out.push_str(&format!(
        "Patients: {} ({} without usable mutation data)\n",
        data.n_patients, data.n_patients_no_data
    ));
    out.push_str(&format!("Pathways: {}\n\n", data.n_pathways));

    out.push_str("2. Scores by pathway\n");
    out.push_str("pathway\tcount\tmean\tstd\tmin\t25%\t50%\t75%\tmax\n");
    for stats in &data.pathways {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            stats.name,
            stats.count,
            format_score(stats.mean),
            format_score(stats.std),
            format_score(stats.min),
            format_score(stats.q25),
            format_score(stats.median),
            format_score(stats.q75),
            format_score(stats.max)
        ));
    }

    if !data.pathway_failures.is_empty() {
        out.push_str("\n3. Pathway files skipped\n");
        for failure in &data.pathway_failures {
            out.push_str(&format!("{}: {}\n", failure.path, failure.error));
        }
    }

    out
}
