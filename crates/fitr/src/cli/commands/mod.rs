//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod init;
pub mod inspect;
pub mod recommend;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Recommend(cmd) => recommend::run(ctx, &cmd),
        Commands::Inspect { what } => inspect::run(ctx, what),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
