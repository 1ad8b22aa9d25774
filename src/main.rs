use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use kira_pathwayburden::input::{InputError, load_mutations, load_patients};
use kira_pathwayburden::logging::init_tracing;
use kira_pathwayburden::measures::MeasureKind;
use kira_pathwayburden::model::{ScoringProfile, StrategyKind};
use kira_pathwayburden::pathways::coexpression::threshold_pathway_name;
use kira_pathwayburden::pathways::{load_coexpression_matrix, pathway_from_threshold};
use kira_pathwayburden::pipeline::stage1_pathways::load_pathway_dir;
use kira_pathwayburden::pipeline::stage3_scores::{Stage3Inputs, run_stage3};
use kira_pathwayburden::pipeline::stage4_report::{Stage4Input, write_reports};

#[derive(Debug, Parser)]
#[command(name = "kira-pathwayburden", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every patient against every pathway in a directory.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Directory of pathway definition files.
    #[arg(long)]
    pathways: PathBuf,
    /// Sequencing results CSV.
    #[arg(long)]
    mutations: PathBuf,
    /// Patient registry CSV.
    #[arg(long)]
    patients: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Only score patients whose `arm` column equals this value.
    #[arg(long)]
    arm: Option<String>,
    /// JSON scoring profile; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    strategy: Option<StrategyKind>,
    #[arg(long)]
    measure: Option<MeasureKind>,
    /// Multiply measure weights by complex/family ownership weight.
    #[arg(long)]
    complex_factor: bool,
    #[arg(long)]
    technology: Option<String>,
    /// Square gene coexpression matrix to score as one extra pathway.
    #[arg(long, requires = "coexpression_threshold")]
    coexpression: Option<PathBuf>,
    /// Keep gene pairs whose absolute coexpression exceeds this value.
    #[arg(long, requires = "coexpression")]
    coexpression_threshold: Option<f64>,
    /// Per-pathway strategy, as NAME=weighted|baseline. Repeatable.
    #[arg(long = "strategy-for", value_parser = parse_strategy_override)]
    strategy_for: Vec<(String, StrategyKind)>,
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), InputError> {
    match cli.command {
        Command::Run(args) => run_scoring(&args),
    }
}

fn run_scoring(args: &RunArgs) -> Result<(), InputError> {
    let profile = build_profile(args)?;

    let mut stage1 = load_pathway_dir(&args.pathways)?;
    if let (Some(path), Some(threshold)) = (&args.coexpression, args.coexpression_threshold) {
        let matrix = load_coexpression_matrix(path)?;
        let name = threshold_pathway_name(threshold);
        stage1
            .pathways
            .insert(pathway_from_threshold(&name, &matrix, threshold)?)?;
    }
    if stage1.pathways.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "no pathways loaded from {}",
            args.pathways.display()
        )));
    }
    for name in profile.pathway_strategies.keys() {
        if stage1.pathways.get(name).is_none() {
            tracing::warn!("strategy override for unknown pathway {name}");
        }
    }

    let mutations = load_mutations(&args.mutations)?;
    let registry = load_patients(&args.patients)?;
    let patient_ids = match &args.arm {
        Some(arm) => {
            if !registry.has_arms() {
                tracing::warn!("--arm {arm} requested but the registry has no arm column");
            }
            registry.ids_in_arm(arm)
        }
        None => registry.ids(),
    };

    let table = run_stage3(&Stage3Inputs {
        patient_ids: &patient_ids,
        mutations: &mutations,
        pathways: &stage1.pathways,
        profile: &profile,
    });

    let text = write_reports(
        &Stage4Input {
            table: &table,
            profile: &profile,
            failures: &stage1.failures,
            arm: args.arm.as_deref(),
            tool_name: "kira-pathwayburden".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        &args.out,
    )?;
    print!("{text}");

    Ok(())
}

fn build_profile(args: &RunArgs) -> Result<ScoringProfile, InputError> {
    let mut profile = match &args.config {
        Some(path) => ScoringProfile::from_json_file(path)?,
        None => ScoringProfile::default_v1(),
    };
    if let Some(strategy) = args.strategy {
        profile.strategy = strategy;
    }
    if let Some(measure) = args.measure {
        profile.measure = measure;
    }
    if args.complex_factor {
        profile.include_complex_factor = true;
    }
    if let Some(technology) = &args.technology {
        profile.technology = technology.clone();
    }
    for (name, strategy) in &args.strategy_for {
        profile.pathway_strategies.insert(name.clone(), *strategy);
    }
    Ok(profile)
}

fn parse_strategy_override(raw: &str) -> Result<(String, StrategyKind), String> {
    let (name, strategy) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=STRATEGY, got `{raw}`"))?;
    if name.is_empty() {
        return Err(format!("missing pathway name in `{raw}`"));
    }
    Ok((name.to_string(), strategy.parse()?))
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
