//! Clap argument definitions for the `fitr` CLI.

use std::{env, path::PathBuf, process::exit};

use chrono::NaiveDate;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use fitr_engine::Kind;

/// Parses a posting kind from a string.
fn parse_kind(s: &str) -> Result<Kind, String> {
    s.parse::<Kind>().map_err(|e| e.to_string())
}

/// Parses a `YYYY-MM-DD` date.
fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "fitr")]
#[command(about = "Rank job, training and scholarship postings against a candidate profile")]
pub struct Cli {
    /// Verbosity (-v for info logs and score breakdowns, -vv for debug, -vvv for trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `fitr recommend`.
#[derive(Args, Debug, Clone)]
pub struct RecommendCommand {
    /// Profile JSON file
    pub profile: PathBuf,

    /// Posting corpus JSON file, keyed by kind
    pub postings: PathBuf,

    /// Posting kind: job, training or scholarship
    #[arg(short = 'k', long, default_value = "job", value_parser = parse_kind)]
    pub kind: Kind,

    /// Number of recommendations [default: 10]
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Output the formatted JSON response
    #[arg(long)]
    pub json: bool,

    /// Fail on ranking errors; with --json, print unformatted results with score breakdowns
    #[arg(long)]
    pub raw: bool,

    /// Reference date for recency and deadlines (YYYY-MM-DD) [default: today]
    #[arg(long, value_parser = parse_day)]
    pub today: Option<NaiveDate>,
}

/// Arguments for `fitr init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.fitr.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `fitr` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Rank postings against a profile
    #[command(after_help = "\
INPUT FILES:
  PROFILE     A JSON object with sections such as other_skills, work_experience,
              educational_background, other_training and professional_license
  POSTINGS    A JSON object keyed by kind: {\"jobs\": [...], \"trainings\": [...],
              \"scholarships\": [...]}

EXAMPLES:
  fitr recommend profile.json postings.json
  fitr recommend profile.json postings.json -k training -n 5
  fitr recommend profile.json postings.json -k scholarship --json
  fitr recommend profile.json postings.json -v")]
    Recommend(RecommendCommand),

    /// Show how fitr reads postings or a profile
    Inspect {
        /// What to inspect
        #[command(subcommand)]
        what: InspectWhat,
    },

    /// Initialize fitr configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,

    /// Show effective configuration settings
    Config,
}

/// What to inspect with `fitr inspect`.
#[derive(Clone, Subcommand)]
pub enum InspectWhat {
    /// Show the normalized sections and display keys of postings
    Posting {
        /// Posting corpus JSON file
        postings: PathBuf,

        /// Posting kind: job, training or scholarship
        #[arg(short = 'k', long, default_value = "job", value_parser = parse_kind)]
        kind: Kind,

        /// Only show the posting at this input position
        #[arg(long)]
        index: Option<usize>,
    },
    /// Show the weighted sections of a profile
    Profile {
        /// Profile JSON file
        profile: PathBuf,

        /// Posting kind whose stopwords and section weights apply
        #[arg(short = 'k', long, default_value = "job", value_parser = parse_kind)]
        kind: Kind,
    },
}

/// Parses CLI arguments, printing hierarchical help for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_hierarchical_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints custom help with hierarchical subcommand display.
fn print_hierarchical_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: fitr [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }

        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");

        for subsub in sub.get_subcommands() {
            let subname = subsub.get_name();
            if subname == "help" {
                continue;
            }
            let subabout = subsub
                .get_about()
                .map(|s| s.to_string())
                .unwrap_or_default();
            println!("    {subname:8} {subabout}");
        }
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Increase verbosity");
    println!("  -h, --help        Print help");
}

#[cfg(test)]
mod tests {
    use fitr_config::Settings;

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    /// Verifies that help text names the configured default count.
    #[test]
    fn cli_help_defaults_match_settings() {
        let cmd = Cli::command();
        let default = Settings::default().top_n;

        let top_n_help = get_arg_help(&cmd, "recommend", "top_n");
        assert!(
            top_n_help.contains(&format!("[default: {default}]")),
            "recommend --top-n help should contain default {default}: {top_n_help}"
        );
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_kind_and_date() {
        let cli = Cli::try_parse_from([
            "fitr",
            "recommend",
            "p.json",
            "c.json",
            "-k",
            "scholarships",
            "--today",
            "2025-01-01",
        ])
        .unwrap();
        let Commands::Recommend(cmd) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(cmd.kind, Kind::Scholarship);
        assert_eq!(cmd.today, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert!(Cli::try_parse_from(["fitr", "recommend", "p", "c", "-k", "gig"]).is_err());
    }
}
