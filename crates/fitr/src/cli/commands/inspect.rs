//! Implementation of `fitr inspect`.

use std::process::ExitCode;

use fitr_text::Lexicon;

use crate::cli::{
    args::InspectWhat,
    context::CommandContext,
    output::{dim, output_profile_features, output_transformed_posting, report_error},
};

/// Shows how fitr reads postings or a profile.
pub fn run(ctx: &CommandContext, what: InspectWhat) -> ExitCode {
    let lexicon = Lexicon::load();
    let engine = match ctx.engine(&lexicon) {
        Ok(engine) => engine,
        Err(code) => return code,
    };

    match what {
        InspectWhat::Posting {
            postings,
            kind,
            index,
        } => {
            let corpus = match ctx.read_corpus(&postings) {
                Ok(corpus) => corpus,
                Err(code) => return code,
            };
            let transformed = engine.transform(corpus.postings(kind), kind);
            if transformed.is_empty() {
                println!("{}", dim(&format!("No {kind} postings found.")));
                return ExitCode::SUCCESS;
            }
            if let Some(i) = index {
                let Some(posting) = transformed.postings.get(i) else {
                    report_error(format_args!(
                        "index {i} is out of range ({} {kind} postings)",
                        transformed.len()
                    ));
                    return ExitCode::FAILURE;
                };
                output_transformed_posting(posting);
                return ExitCode::SUCCESS;
            }
            for posting in &transformed.postings {
                output_transformed_posting(posting);
            }
            ExitCode::SUCCESS
        }
        InspectWhat::Profile { profile, kind } => {
            let profile = match ctx.read_profile(&profile) {
                Ok(profile) => profile,
                Err(code) => return code,
            };
            let features = engine.profile_features(&profile, kind);
            output_profile_features(&features, kind);
            ExitCode::SUCCESS
        }
    }
}
