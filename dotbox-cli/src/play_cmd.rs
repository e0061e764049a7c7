//! Play command - one match, replay printed

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use dotbox_core::Player;
use dotbox_tournament::{play_match, ForcedReason, MatchConfig, MatchEnd, MatchOutcome};

use crate::registry;

#[derive(Args)]
pub struct PlayArgs {
    /// First-moving agent name
    pub first: String,

    /// Second agent name
    pub second: String,

    /// Base RNG seed for the built-in agents (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-player decision-time budget for the match, in seconds
    #[arg(long, default_value = "24")]
    pub time_budget: u64,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let base_seed = args.seed.unwrap_or_else(rand::random);
    let mut first = registry::create_agent(&args.first, base_seed)?;
    let mut second = registry::create_agent(&args.second, base_seed.wrapping_add(1))?;

    first
        .init()
        .with_context(|| format!("agent '{}' failed to initialize", args.first))?;
    second
        .init()
        .with_context(|| format!("agent '{}' failed to initialize", args.second))?;

    let config =
        MatchConfig::default().with_time_budget(Duration::from_secs(args.time_budget));
    let outcome = play_match(first.as_mut(), second.as_mut(), &config);

    println!("{}", outcome.replay);
    println!("{} {}", outcome.scores[0], outcome.scores[1]);
    println!("{}", describe(&outcome, &args.first, &args.second));
    Ok(())
}

fn describe(outcome: &MatchOutcome, first_name: &str, second_name: &str) -> String {
    let name_of = |seat: Player| match seat {
        Player::First => first_name,
        Player::Second => second_name,
    };
    match outcome.end {
        MatchEnd::Natural => match outcome.winner() {
            Some(seat) => format!(
                "{} wins {}-{}",
                name_of(seat),
                outcome.scores[seat.index()],
                outcome.scores[seat.opponent().index()]
            ),
            None => format!("draw {}-{}", outcome.scores[0], outcome.scores[1]),
        },
        MatchEnd::Forced { winner, reason } => {
            let what = match reason {
                ForcedReason::Timeout => "timeout",
                ForcedReason::InvalidMove => "invalid move",
            };
            format!("{} wins by opponent {}", name_of(winner), what)
        }
    }
}
