//! Implementation of `fitr recommend`.

use std::process::ExitCode;

use fitr_text::Lexicon;

use crate::cli::{
    args::RecommendCommand,
    context::CommandContext,
    output::{output_json, output_recommendations, report_error, warning},
};

/// Ranks the postings of one kind against a profile.
pub fn run(ctx: &CommandContext, cmd: &RecommendCommand) -> ExitCode {
    let profile = match ctx.read_profile(&cmd.profile) {
        Ok(profile) => profile,
        Err(code) => return code,
    };
    let corpus = match ctx.read_corpus(&cmd.postings) {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let lexicon = Lexicon::load();
    let mut engine = match ctx.engine(&lexicon) {
        Ok(engine) => engine,
        Err(code) => return code,
    };
    if let Some(today) = cmd.today {
        engine = engine.with_now(today);
    }

    let top_n = cmd.top_n.unwrap_or_else(|| engine.top_n());
    let postings = corpus.postings(cmd.kind);

    if cmd.raw {
        return match engine.recommend(&profile, postings, cmd.kind, top_n) {
            Ok(recommendations) if cmd.json => output_json(&recommendations),
            Ok(recommendations) => {
                output_recommendations(&recommendations, ctx.verbose);
                ExitCode::SUCCESS
            }
            Err(e) => {
                report_error(e);
                ExitCode::FAILURE
            }
        };
    }

    let response = engine.respond(&profile, postings, cmd.kind, top_n);
    if cmd.json {
        return output_json(&response);
    }
    if let Some(error) = &response.error {
        println!("{}", warning(&format!("Ranking failed: {error}")));
        return ExitCode::SUCCESS;
    }
    output_recommendations(&response.recommendations, ctx.verbose);
    ExitCode::SUCCESS
}
