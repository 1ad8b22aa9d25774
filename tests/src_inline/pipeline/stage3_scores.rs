use super::*;
use crate::input::MutationRecord;
use crate::input::pathway_file::parse_pathway_str;
use crate::measures::MeasureKind;
use crate::pathways::build_pathway;

fn pathway(title: &str, genes: &[&str], edges: &[&str]) -> Pathway {
    let text = format!(
        "{title}\n\ndesc\n\nNAME\tID\tTYPE\tPARENT_ID\n{}\n\nEDGE_ID\tSOURCE\tTARGET\tEDGE_TYPE\n{}\n",
        genes.join("\n"),
        edges.join("\n")
    );
    build_pathway(&parse_pathway_str(&text).unwrap()).unwrap()
}

fn hippo() -> Pathway {
    pathway(
        "HIPPO",
        &[
            "A\t1\tGENE\t-1",
            "C\t2\tCOMPLEX\t-1",
            "B\t3\tGENE\t2",
            "D\t4\tGENE\t2",
        ],
        &[],
    )
}

fn record(patient: &str, gene: &str, tech: &str, pct: f64) -> MutationRecord {
    MutationRecord {
        patient_id: patient.to_string(),
        biomarker: gene.to_string(),
        technology: tech.to_string(),
        test_result: "variantdetected".to_string(),
        percent_mutated: Some(pct),
    }
}

fn table() -> MutationTable {
    MutationTable::from_records(vec![
        record("P1", "A", "NGS Q3", 20.0),
        record("P1", "B", "NGS Q3", 80.0),
        record("P1", "B", "NGS Q3", 35.0),
        record("P1", "D", "NGS Q3", 0.0),
        record("P2", "A", "IHC", 50.0),
        record("P3", "ZZZ", "NGS Q3", 12.0),
    ])
}

fn profile(measure: MeasureKind, include_complex_factor: bool) -> ScoringProfile {
    ScoringProfile {
        measure,
        include_complex_factor,
        ..ScoringProfile::default_v1()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_weighted_uniform_without_complex_factor() {
    let p = hippo();
    let profile = profile(MeasureKind::Uniform, false);
    let engine = ScoringEngine::new(profile.clone());
    let score = score_pathway("P1", &table(), &p, engine.strategy_for("HIPPO"), &profile);
    assert!(close(score.unwrap(), 100.0 / 3.0));
}

#[test]
fn test_weighted_uniform_with_complex_factor() {
    let p = hippo();
    let profile = profile(MeasureKind::Uniform, true);
    let engine = ScoringEngine::new(profile.clone());
    let score = score_pathway("P1", &table(), &p, engine.strategy_for("HIPPO"), &profile);
    assert!(close(score.unwrap(), 30.0));
}

#[test]
fn test_baseline_divides_by_group_count() {
    let p = hippo();
    let profile = ScoringProfile::baseline_v1();
    let score = score_pathway("P1", &table(), &p, &BaselineAverage, &profile);
    assert!(close(score.unwrap(), 50.0));
}

#[test]
fn test_no_data_versus_zero() {
    let p = hippo();
    let profile = ScoringProfile::default_v1();
    let engine = ScoringEngine::new(profile.clone());
    let strategy = engine.strategy_for("HIPPO");
    assert_eq!(score_pathway("P2", &table(), &p, strategy, &profile), None);
    assert_eq!(score_pathway("P3", &table(), &p, strategy, &profile), Some(0.0));
    assert_eq!(score_pathway("P404", &table(), &p, strategy, &profile), None);
}

#[test]
fn test_zero_total_weight_scores_zero() {
    let p = pathway("FLAT", &["A\t1\tGENE\t-1", "B\t2\tGENE\t-1"], &[]);
    let profile = ScoringProfile::default_v1();
    let engine = ScoringEngine::new(profile.clone());
    let score = score_pathway("P1", &table(), &p, engine.strategy_for("FLAT"), &profile);
    assert_eq!(score, Some(0.0));
}

#[test]
fn test_weighted_score_bounded_by_max_mutation() {
    let p = pathway(
        "CHAIN",
        &["A\t1\tGENE\t-1", "B\t2\tGENE\t-1", "D\t3\tGENE\t-1"],
        &["e1\t1\t2\tX", "e2\t2\t3\tX", "e3\t1\t3\tX"],
    );
    let profile = ScoringProfile::default_v1();
    let engine = ScoringEngine::new(profile.clone());
    let score = score_pathway("P1", &table(), &p, engine.strategy_for("CHAIN"), &profile).unwrap();
    assert!((0.0..=80.0).contains(&score));
    // in-degree: A 0, B 0.5, D 1.0
    assert!(close(score, (0.5 * 80.0) / 1.5));
}

#[test]
fn test_per_pathway_strategy_override() {
    let mut profile = profile(MeasureKind::Uniform, false);
    profile
        .pathway_strategies
        .insert("HIPPO".to_string(), StrategyKind::Baseline);
    let engine = ScoringEngine::new(profile);
    assert_eq!(engine.strategy_for("HIPPO").kind(), StrategyKind::Baseline);
    assert_eq!(engine.strategy_for("WNT").kind(), StrategyKind::Weighted);

    let pathways = PathwaySet::new(vec![hippo()]);
    let scores = engine.score_patient("P1", &table(), &pathways);
    assert!(close(scores.get("HIPPO").unwrap(), 50.0));
}

#[test]
fn test_score_patients_keeps_order_and_marks_missing() {
    let pathways = PathwaySet::new(vec![
        hippo(),
        pathway("WNT", &["ZZZ\t1\tGENE\t-1"], &[]),
    ]);
    let table = table();
    let ids: Vec<String> = ["P3", "P1", "P2"].iter().map(|s| s.to_string()).collect();
    let profile = profile(MeasureKind::Uniform, false);
    let scores = run_stage3(&Stage3Inputs {
        patient_ids: &ids,
        mutations: &table,
        pathways: &pathways,
        profile: &profile,
    });

    assert_eq!(scores.pathway_names, vec!["HIPPO", "WNT"]);
    let order: Vec<&str> = scores.rows.iter().map(|r| r.patient_id.as_str()).collect();
    assert_eq!(order, vec!["P3", "P1", "P2"]);
    assert_eq!(scores.get("P3", "HIPPO"), Some(0.0));
    assert_eq!(scores.get("P3", "WNT"), Some(12.0));
    assert!(close(scores.get("P1", "HIPPO").unwrap(), 100.0 / 3.0));
    assert_eq!(scores.rows[2].scores, vec![None, None]);
    assert!(!scores.rows[2].has_data);
    assert_eq!(scores.no_data_count(), 1);
}

#[test]
fn test_repeated_scoring_reuses_measure_cache() {
    let pathways = PathwaySet::new(vec![hippo()]);
    let engine = ScoringEngine::new(ScoringProfile::default_v1());
    let table = table();
    let first = engine.score_patient("P1", &table, &pathways);
    let second = engine.score_patient("P1", &table, &pathways);
    assert_eq!(first, second);
    assert_eq!(pathways.get("HIPPO").unwrap().cached_measure_count(), 1);
}

#[test]
fn test_batch_and_single_scoring_agree() {
    let pathways = PathwaySet::new(vec![
        hippo(),
        pathway(
            "CHAIN",
            &["A\t1\tGENE\t-1", "B\t2\tGENE\t-1", "D\t3\tGENE\t-1"],
            &["e1\t1\t2\tX", "e2\t2\t3\tX"],
        ),
    ]);
    let table = table();
    let mut profile = profile(MeasureKind::InDegree, true);
    profile
        .pathway_strategies
        .insert("CHAIN".to_string(), StrategyKind::Baseline);
    let engine = ScoringEngine::new(profile.clone());

    for patient in ["P1", "P2", "P3"] {
        let batch = engine.score_patient(patient, &table, &pathways);
        for p in pathways.iter() {
            let single = score_pathway(patient, &table, p, engine.strategy_for(p.name()), &profile);
            assert_eq!(batch.get(p.name()), single, "{patient} / {}", p.name());
        }
    }
}
