//! Evaluate command - run a two-agent tournament with seat swapping

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::ProgressBar;

use dotbox_tournament::{Entrant, EntrantSpec, EvalConfig, EvalReport, Evaluator, MatchConfig};

use crate::registry;

#[derive(Args)]
pub struct EvaluateArgs {
    /// First agent name (moves first in the first half)
    pub first: String,

    /// Second agent name
    pub second: String,

    /// Games per half; each agent leads this many games
    #[arg(long = "num-games", short = 'n', default_value = "100")]
    pub num_games: usize,

    /// Base RNG seed for the built-in agents (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-player decision-time budget for a whole match, in seconds
    #[arg(long, default_value = "24")]
    pub time_budget: u64,

    /// Run the matches of each half in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Worker threads for --parallel (default: rayon's choice)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Print every match's replay and scores instead of a progress bar
    #[arg(long)]
    pub log: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: EvaluateArgs) -> Result<()> {
    if args.log && args.parallel {
        bail!("--log needs sequential execution; drop --parallel");
    }

    let evaluator = Evaluator::new(build_config(&args));
    let base_seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Evaluating {} vs {} ({} games per half)",
        args.first,
        args.second,
        args.num_games
    );

    let report = if args.parallel {
        run_parallel(&evaluator, &args, base_seed)?
    } else {
        run_sequential(&evaluator, &args, base_seed)?
    };

    print_report(&report, &args)
}

fn build_config(args: &EvaluateArgs) -> EvalConfig {
    let match_config =
        MatchConfig::default().with_time_budget(Duration::from_secs(args.time_budget));
    let mut config = EvalConfig::new(args.num_games)
        .with_match_config(match_config)
        .with_parallel(args.parallel);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    config
}

fn run_sequential(
    evaluator: &Evaluator,
    args: &EvaluateArgs,
    base_seed: u64,
) -> Result<EvalReport> {
    let mut first = registry::create_agent(&args.first, base_seed)?;
    let mut second = registry::create_agent(&args.second, base_seed.wrapping_add(1))?;

    if args.log {
        return evaluator.run_with_callback(
            Entrant::new(&args.first, first.as_mut()),
            Entrant::new(&args.second, second.as_mut()),
            |progress| {
                // Flat replay plus final scores, one match per pair of
                // lines, then the rolling result line
                println!("{}", progress.outcome.replay);
                println!(
                    "{} {}",
                    progress.outcome.scores[0], progress.outcome.scores[1]
                );
                println!("{}", progress.line);
            },
        );
    }

    let bar = ProgressBar::new((args.num_games * 2) as u64);
    let report = evaluator.run_with_callback(
        Entrant::new(&args.first, first.as_mut()),
        Entrant::new(&args.second, second.as_mut()),
        |progress| {
            bar.println(progress.line);
            bar.inc(1);
        },
    )?;
    bar.finish_and_clear();
    Ok(report)
}

fn run_parallel(evaluator: &Evaluator, args: &EvaluateArgs, base_seed: u64) -> Result<EvalReport> {
    let first_factory = registry::agent_factory(&args.first, base_seed)?;
    let second_factory = registry::agent_factory(&args.second, base_seed.wrapping_add(1))?;

    evaluator.run_parallel(
        EntrantSpec::new(&args.first, &*first_factory),
        EntrantSpec::new(&args.second, &*second_factory),
    )
}

fn print_report(report: &EvalReport, args: &EvaluateArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(report).context("failed to encode report")?;
        println!("{json}");
    } else {
        println!("{report}");
    }
    Ok(())
}
