use super::*;

#[test]
fn test_parse_run_args() {
    let cli = Cli::try_parse_from([
        "kira-pathwayburden",
        "run",
        "--pathways",
        "pw",
        "--mutations",
        "m.csv",
        "--patients",
        "p.csv",
        "--out",
        "out",
        "--arm",
        "B",
        "--measure",
        "betweenness",
        "--complex-factor",
        "--strategy-for",
        "HIPPO=baseline",
    ])
    .unwrap();
    let Command::Run(args) = cli.command;
    assert_eq!(args.pathways, PathBuf::from("pw"));
    assert_eq!(args.arm.as_deref(), Some("B"));
    assert_eq!(args.measure, Some(MeasureKind::Betweenness));
    assert!(args.complex_factor);
    assert_eq!(
        args.strategy_for,
        vec![("HIPPO".to_string(), StrategyKind::Baseline)]
    );
}

#[test]
fn test_unknown_strategy_rejected() {
    let result = Cli::try_parse_from([
        "kira-pathwayburden",
        "run",
        "--pathways",
        "pw",
        "--mutations",
        "m.csv",
        "--patients",
        "p.csv",
        "--out",
        "out",
        "--strategy",
        "median",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_parse_strategy_override() {
    assert_eq!(
        parse_strategy_override("Cell cycle=weighted"),
        Ok(("Cell cycle".to_string(), StrategyKind::Weighted))
    );
    assert_eq!(
        parse_strategy_override("a=b=baseline"),
        Ok(("a=b".to_string(), StrategyKind::Baseline))
    );
    assert!(parse_strategy_override("HIPPO").is_err());
    assert!(parse_strategy_override("=weighted").is_err());
    assert!(parse_strategy_override("HIPPO=mean").is_err());
}

fn run_args(config: Option<PathBuf>) -> RunArgs {
    RunArgs {
        pathways: PathBuf::from("pw"),
        mutations: PathBuf::from("m.csv"),
        patients: PathBuf::from("p.csv"),
        out: PathBuf::from("out"),
        arm: None,
        config,
        strategy: None,
        measure: None,
        complex_factor: false,
        technology: None,
        coexpression: None,
        coexpression_threshold: None,
        strategy_for: Vec::new(),
    }
}

#[test]
fn test_build_profile_flags_override_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(
        &path,
        r#"{"technology": "NGS Q4", "measure": "degree", "strategy": "baseline"}"#,
    )
    .unwrap();

    let mut args = run_args(Some(path));
    let profile = build_profile(&args).unwrap();
    assert_eq!(profile.technology, "NGS Q4");
    assert_eq!(profile.measure, MeasureKind::Degree);
    assert_eq!(profile.strategy, StrategyKind::Baseline);
    assert_eq!(profile.accepted_results.len(), 2);

    args.strategy = Some(StrategyKind::Weighted);
    args.complex_factor = true;
    args.strategy_for = vec![("WNT".to_string(), StrategyKind::Baseline)];
    let profile = build_profile(&args).unwrap();
    assert_eq!(profile.strategy, StrategyKind::Weighted);
    assert!(profile.include_complex_factor);
    assert_eq!(profile.strategy_for("WNT"), StrategyKind::Baseline);
}

#[test]
fn test_build_profile_defaults() {
    let profile = build_profile(&run_args(None)).unwrap();
    assert_eq!(profile, ScoringProfile::default_v1());
}

#[test]
fn test_end_to_end_run() {
    let dir = tempfile::tempdir().unwrap();
    let pw = dir.path().join("pw");
    std::fs::create_dir(&pw).unwrap();
    std::fs::write(
        pw.join("hippo.txt"),
        "HIPPO\n\ndesc\n\nNAME\tID\tTYPE\tPARENT_ID\nA\t1\tGENE\t-1\nC\t2\tCOMPLEX\t-1\nB\t3\tGENE\t2\nD\t4\tGENE\t2\n\nEDGE_ID\tSOURCE\tTARGET\tEDGE_TYPE\n",
    )
    .unwrap();
    let mutations = dir.path().join("m.csv");
    std::fs::write(
        &mutations,
        "PatientFirstName,Technology,TestResult,Biomarker,NGS_PercentMutated\n\
         P1,NGS Q3,variantdetected,A,20\n\
         P1,NGS Q3,variantdetected,B,80\n\
         P1,NGS Q3,variantdetected,D,0\n\
         P2,IHC,variantdetected,A,50\n",
    )
    .unwrap();
    let patients = dir.path().join("p.csv");
    std::fs::write(&patients, "PatientFirstName,arm\nP1,A\nP2,A\nP3,B\n").unwrap();

    let mut args = run_args(None);
    args.pathways = pw;
    args.mutations = mutations;
    args.patients = patients;
    args.out = dir.path().join("out");
    args.arm = Some("A".to_string());
    args.measure = Some(MeasureKind::Uniform);
    args.complex_factor = true;
    run_scoring(&args).unwrap();

    let tsv = std::fs::read_to_string(args.out.join("pathway_scores.tsv")).unwrap();
    assert_eq!(tsv, "PatientFirstName\tHIPPO\nP1\t30.000000\nP2\tNA\n");
}

#[test]
fn test_coexpression_flags_require_each_other() {
    let base = [
        "kira-pathwayburden",
        "run",
        "--pathways",
        "pw",
        "--mutations",
        "m.csv",
        "--patients",
        "p.csv",
        "--out",
        "out",
    ];
    let mut lone = base.to_vec();
    lone.extend(["--coexpression", "coexp.tsv"]);
    assert!(Cli::try_parse_from(lone).is_err());

    let mut both = base.to_vec();
    both.extend(["--coexpression", "coexp.tsv", "--coexpression-threshold", "0.8"]);
    let Command::Run(args) = Cli::try_parse_from(both).unwrap().command;
    assert_eq!(args.coexpression_threshold, Some(0.8));
}

#[test]
fn test_end_to_end_with_coexpression_pathway() {
    let dir = tempfile::tempdir().unwrap();
    let pw = dir.path().join("pw");
    std::fs::create_dir(&pw).unwrap();
    std::fs::write(
        pw.join("hippo.txt"),
        "HIPPO\n\ndesc\n\nNAME\tID\tTYPE\tPARENT_ID\nA\t1\tGENE\t-1\n",
    )
    .unwrap();
    let coexp = dir.path().join("coexp.tsv");
    std::fs::write(&coexp, "\tA\tB\tC\nA\t1\t0.9\t0\nB\t0.9\t1\t0\nC\t0\t0\t1\n").unwrap();
    let mutations = dir.path().join("m.csv");
    std::fs::write(
        &mutations,
        "PatientFirstName,Technology,TestResult,Biomarker,NGS_PercentMutated\n\
         P1,NGS Q3,variantdetected,A,20\n\
         P1,NGS Q3,variantdetected,B,60\n",
    )
    .unwrap();
    let patients = dir.path().join("p.csv");
    std::fs::write(&patients, "PatientFirstName\nP1\n").unwrap();

    let mut args = run_args(None);
    args.pathways = pw;
    args.mutations = mutations;
    args.patients = patients;
    args.out = dir.path().join("out");
    args.measure = Some(MeasureKind::Uniform);
    args.coexpression = Some(coexp);
    args.coexpression_threshold = Some(0.5);
    run_scoring(&args).unwrap();

    let tsv = std::fs::read_to_string(args.out.join("pathway_scores.tsv")).unwrap();
    assert_eq!(tsv, "PatientFirstName\tGPL570-0.5\tHIPPO\nP1\t40.000000\t20.000000\n");
}
