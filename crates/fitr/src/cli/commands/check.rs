//! Implementation of `fitr check`.

use std::process::ExitCode;

use fitr_config::{ConfigWarning, discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Lists configuration files and reports validation warnings.
///
/// Exits with failure when any warning is found.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found; using defaults."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("fitr init")
        );
    } else {
        println!("{}", subheader("Config files (highest precedence first):"));
        for path in &config_files {
            let scope = if is_global_config(path) { "global" } else { "local" };
            println!("   {} {}", path.display(), dim(&format!("({scope})")));
        }
        println!();
    }

    let warnings = ctx.config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Returns a hint for resolving a warning.
fn hint(w: &ConfigWarning) -> &'static str {
    match w {
        ConfigWarning::NgramRangeInverted { .. } | ConfigWarning::NgramMinZero => {
            "set [vector] ngram_min to at least 1 and no larger than ngram_max"
        }
        ConfigWarning::MinDocFreqZero => "set [vector] min_df to 1 or more",
        ConfigWarning::MaxFeaturesZero => "raise [vector] max_features",
        ConfigWarning::TopNZero => "set [settings] top_n to 1 or more",
        ConfigWarning::BoostCapBelowOne { .. } => "boost caps should be 1.0 or more",
        ConfigWarning::NegativeGapScale { .. } => "use a gap_scale of 0 or more",
        ConfigWarning::SectionWeightsAllZero { .. } => {
            "give at least one profile section a non-zero weight"
        }
        ConfigWarning::EmptyCluster { .. } => "add terms to the cluster or remove it",
    }
}

/// Prints deduplicated hints for the warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<_> = warnings.iter().map(hint).collect();
    hints.sort_unstable();
    hints.dedup();
    for h in hints {
        println!("{}", dim(&format!("Hint: {h}")));
    }
}
