//! Rendering and JSON serialization for CLI output.

use std::{
    fmt,
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use fitr_engine::{Kind, ProfileFeatures, Recommendation, ScoreBreakdown, TransformedPosting};
pub use fitr_highlight::{Highlighter, dim, error, header, match_level, rule, subheader, warning};
use serde::Serialize;

/// Width of section rules.
const RULE_WIDTH: usize = 40;

/// Prints an `error:` line to stderr, with a red prefix when stderr is a terminal.
pub fn report_error(message: impl fmt::Display) {
    let prefix = if io::stderr().is_terminal() {
        error("error:")
    } else {
        "error:".to_string()
    };
    eprintln!("{prefix} {message}");
}

/// Prints a value as pretty JSON, highlighted when stdout is a terminal.
pub fn output_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) if io::stdout().is_terminal() => {
            println!("{}", Highlighter::new().highlight_json(&json));
            ExitCode::SUCCESS
        }
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(format_args!("failed to serialize JSON: {e}"));
            ExitCode::FAILURE
        }
    }
}

/// Prints ranked recommendations as a table, with score breakdowns when verbose.
pub fn output_recommendations(recs: &[Recommendation], verbose: u8) {
    if recs.is_empty() {
        println!("{}", dim("No recommendations."));
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Score", "Level", "Posting", "ID"]);
    for (rank, rec) in recs.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", rec.score)).set_alignment(CellAlignment::Right),
            Cell::new(rec.explanation.match_level()),
            Cell::new(&rec.key),
            Cell::new(&rec.id),
        ]);
    }
    println!("{table}");

    if verbose == 0 {
        return;
    }
    for rec in recs {
        println!();
        println!(
            "{} {}",
            header(&rec.key),
            match_level(&format!("{:.2}", rec.score), rec.explanation.match_level())
        );
        println!("{}", rule(RULE_WIDTH));
        print_breakdown(&rec.breakdown);
        for factor in rec.explanation.primary_factors() {
            println!("  {}", dim(&format!("- {factor}")));
        }
    }
}

/// Prints the components of one score.
fn print_breakdown(b: &ScoreBreakdown) {
    let a = &b.adjustments;
    println!("  base similarity:  {:.4}", b.base_similarity);
    println!("  semantic boost:   {:.4}", a.semantic_boost);
    println!("  deadline boost:   {:.4}", a.deadline_boost);
    println!("  gap penalty:      {:.4}", a.gap_penalty);
    println!("  opportunity:      {:.4}", a.opportunity_boost);
    println!("  matched terms:    {}", term_list(&a.matched_terms));
    println!("  gap terms:        {}", term_list(&a.gap_terms));
}

/// Joins terms for display.
fn term_list(terms: &[String]) -> String {
    if terms.is_empty() {
        dim("(none)")
    } else {
        terms.join(", ")
    }
}

/// Prints one posting's display key and marked sections.
pub fn output_transformed_posting(posting: &TransformedPosting) {
    println!("{}", header(&posting.key));
    println!(
        "{}",
        dim(&format!("id {} · index {}", posting.id, posting.index))
    );
    println!("{}", rule(RULE_WIDTH));
    let marked = posting.flat.marked();
    if marked.is_empty() {
        println!("  {}", dim("(no text)"));
    } else {
        for line in marked.lines() {
            println!("  {line}");
        }
    }
    println!();
}

/// Prints a profile's weighted sections.
pub fn output_profile_features(features: &ProfileFeatures, kind: Kind) {
    println!("{}", subheader(&format!("Profile sections ({kind} weights):")));
    if features.is_empty() {
        println!("  {}", dim("(empty profile)"));
        return;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Section", "Weight", "Tokens"]);
    for section in &features.sections {
        table.add_row(vec![
            Cell::new(section.section),
            Cell::new(section.weight).set_alignment(CellAlignment::Right),
            Cell::new(section.tokens.join(" ")),
        ]);
    }
    println!("{table}");
    println!(
        "{}",
        dim(&format!("{} distinct terms", features.unigrams().len()))
    );
}
