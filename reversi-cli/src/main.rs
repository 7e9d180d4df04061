//! Reversi CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive game against the AI (or another human)
//! - match: AI vs AI series with aggregated statistics

mod match_cmd;
mod play;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reversi")]
#[command(about = "9x7 Othello with an alpha-beta computer opponent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(play::PlayArgs),
    /// Run an AI vs AI match
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Match(args) => match_cmd::run(args),
    }
}
