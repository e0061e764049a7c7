//! DOTBOX CLI - Command-line interface
//!
//! Commands:
//! - evaluate: Run a two-agent tournament with seat swapping
//! - play: Play a single match and print its replay
//! - agents: List built-in agents

use clap::{Parser, Subcommand};

mod evaluate_cmd;
mod play_cmd;
mod registry;

#[derive(Parser)]
#[command(name = "dotbox")]
#[command(about = "Dots and boxes agent-vs-agent evaluator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a two-agent tournament with seat swapping
    Evaluate(evaluate_cmd::EvaluateArgs),
    /// Play a single match and print its replay
    Play(play_cmd::PlayArgs),
    /// List built-in agents
    Agents,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate(args) => evaluate_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args),
        Commands::Agents => {
            for name in registry::AGENT_NAMES {
                println!("{name}");
            }
            Ok(())
        }
    }
}
