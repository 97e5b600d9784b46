//! Command-line interface for `fitr`.

use std::{io, process::ExitCode};

use fitr::cli::{
    args::{Commands, parse_cli},
    commands,
    context::CommandContext,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Environment variable holding an explicit log filter.
const LOG_ENV: &str = "FITR_LOG";

/// Installs the stderr log subscriber.
///
/// `FITR_LOG` takes precedence; otherwise the level follows the `-v` count.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn main() -> ExitCode {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(cli.verbose),
        _ => CommandContext::load(cli.verbose),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
