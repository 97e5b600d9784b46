//! The recommendation engine.

use chrono::{Local, NaiveDate};
use fitr_config::{Config, ScoringSettings, VectorSettings};
use fitr_text::Lexicon;
use tracing::{debug, info, warn};

use crate::{
    EngineError, Explanation, Kind, KindProfile, Posting, Profile, ProfileFeatures, RarityIndex,
    Recommendation, Response, ScoreBreakdown, TransformedCorpus,
    enhance::Enhancer,
    rank::{final_score, rank, round2},
    transform::{section_extractor, transform_corpus},
    vector::VectorSpace,
};

/// Scores one profile against a list of postings of one kind.
///
/// The engine holds no per-request state; every call rebuilds the vocabulary and rarity index
/// from the postings it is given.
pub struct Engine<'a> {
    /// One strategy per kind, in [`Kind::ALL`] order.
    kinds: [KindProfile<'a>; 3],
    /// Vectorizer settings.
    vector: VectorSettings,
    /// Scoring constants.
    scoring: ScoringSettings,
    /// Default number of recommendations.
    top_n: usize,
    /// Fixed reference date, or `None` for the local date at call time.
    now: Option<NaiveDate>,
}

impl<'a> Engine<'a> {
    /// Builds an engine from a lexicon and a merged configuration.
    pub fn new(lexicon: &'a Lexicon, config: &Config) -> Result<Self, EngineError> {
        let vector = config.vector.clone();
        if vector.ngram_max == 0 {
            return Err(EngineError::InvalidSettings(
                "vector.ngram_max must be at least 1".to_string(),
            ));
        }
        if vector.ngram_min > vector.ngram_max {
            return Err(EngineError::InvalidSettings(format!(
                "vector.ngram_min ({}) is greater than vector.ngram_max ({})",
                vector.ngram_min, vector.ngram_max
            )));
        }
        let kinds = Kind::ALL.map(|kind| KindProfile::new(lexicon, kind, kind.settings(&config.kinds)));
        Ok(Self {
            kinds,
            vector,
            scoring: config.scoring.clone(),
            top_n: config.settings.top_n,
            now: None,
        })
    }

    /// Fixes the reference date used for recency and deadlines.
    pub fn with_now(mut self, now: NaiveDate) -> Self {
        self.now = Some(now);
        self
    }

    /// Returns the configured default number of recommendations.
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Returns the strategy for a kind.
    pub fn kind(&self, kind: Kind) -> &KindProfile<'a> {
        match kind {
            Kind::Job => &self.kinds[0],
            Kind::Training => &self.kinds[1],
            Kind::Scholarship => &self.kinds[2],
        }
    }

    /// Returns the reference date.
    fn today(&self) -> NaiveDate {
        self.now.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Transforms postings the way a request would.
    pub fn transform(&self, postings: &[Posting], kind: Kind) -> TransformedCorpus {
        transform_corpus(postings, &self.kind(kind).normalizer, section_extractor(kind))
    }

    /// Extracts profile features the way a request would.
    pub fn profile_features(&self, profile: &Profile, kind: Kind) -> ProfileFeatures {
        let strategy = self.kind(kind);
        ProfileFeatures::extract(profile, &strategy.normalizer, &strategy.section_weights)
    }

    /// Ranks `postings` for `profile`, returning at most `top_n` recommendations.
    ///
    /// An empty posting list yields an empty result. Fails when no term survives the
    /// document-frequency cut.
    pub fn recommend(
        &self,
        profile: &Profile,
        postings: &[Posting],
        kind: Kind,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, EngineError> {
        if postings.is_empty() {
            info!(%kind, "no postings to rank");
            return Ok(Vec::new());
        }
        let strategy = self.kind(kind);
        let corpus = self.transform(postings, kind);
        let features = self.profile_features(profile, kind);

        let (ngram_min, ngram_max) = (self.vector.ngram_min, self.vector.ngram_max);
        let mut documents = Vec::with_capacity(corpus.len() + 1);
        documents.push(features.term_counts(ngram_min, ngram_max));
        documents.extend(
            corpus
                .postings
                .iter()
                .map(|p| p.flat.term_counts(ngram_min, ngram_max)),
        );
        let space = VectorSpace::fit(&documents, &self.vector)?;
        let rarity = RarityIndex::build(corpus.postings.iter().map(|p| p.flat.unigrams()));

        let profile_vector = space.vector(0);
        let profile_terms: Vec<&str> = profile_vector
            .indices()
            .map(|i| space.vocabulary().term(i))
            .collect();
        let enhancer = Enhancer::new(
            strategy,
            &self.scoring,
            profile,
            &profile_terms,
            &features,
            &rarity,
            self.today(),
        );

        let mut ranked = Vec::with_capacity(corpus.len());
        for (doc, transformed) in corpus.postings.iter().enumerate() {
            let vector = space.vector(doc + 1);
            let base = profile_vector.cosine(vector);
            let matched = profile_vector
                .shared(vector)
                .into_iter()
                .map(|i| space.vocabulary().term(i).to_string())
                .collect();
            let index = corpus
                .resolve(&transformed.key)
                .map_or(transformed.index, |target| target.index);
            let posting = &postings[index];
            let adjustments = enhancer.adjust(posting, &transformed.flat, matched);
            let score = round2(final_score(base, &adjustments));
            debug!(
                key = %transformed.key,
                base,
                semantic = adjustments.semantic_boost,
                deadline = adjustments.deadline_boost,
                gap = adjustments.gap_penalty,
                opportunity = adjustments.opportunity_boost,
                score,
                "scored posting"
            );
            ranked.push(Recommendation {
                kind,
                id: transformed.id.clone(),
                key: transformed.key.clone(),
                index,
                score,
                posting: posting.raw.clone(),
                explanation: Explanation::for_score(kind, score),
                breakdown: ScoreBreakdown {
                    base_similarity: base,
                    adjustments,
                },
            });
        }

        rank(&mut ranked, top_n, |r| r.score);
        info!(
            %kind,
            postings = postings.len(),
            vocabulary = space.vocabulary().len(),
            returned = ranked.len(),
            "ranked postings"
        );
        Ok(ranked)
    }

    /// Like [`Engine::recommend`], but failures become a `success: false` response.
    pub fn respond(
        &self,
        profile: &Profile,
        postings: &[Posting],
        kind: Kind,
        top_n: usize,
    ) -> Response {
        match self.recommend(profile, postings, kind, top_n) {
            Ok(recommendations) => Response::success(recommendations),
            Err(e) => {
                warn!(%kind, error = %e, "recommendation failed");
                Response::failure(e.to_string())
            }
        }
    }
}
