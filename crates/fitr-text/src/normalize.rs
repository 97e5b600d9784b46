//! The normalization pipeline.

use rust_stemmers::{Algorithm, Stemmer};

use crate::Stopwords;

/// Shared, immutable normalization resources.
///
/// Building a lexicon loads the generic stopword list and the stemmer; it is done once per
/// process and the lexicon is then borrowed by every [`Normalizer`].
pub struct Lexicon {
    /// Snowball English stemmer.
    stemmer: Stemmer,
    /// Generic stopwords.
    stopwords: Stopwords,
}

impl Lexicon {
    /// Loads the English stemmer and generic stopword set.
    pub fn load() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stopwords: Stopwords::english(),
        }
    }

    /// Stems a single lowercase word.
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    /// Returns the generic stopword set.
    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Creates a normalizer with no domain stopwords.
    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(self, Stopwords::default())
    }
}

/// Normalizes text for one domain.
///
/// Stopwords are matched against whole lowercase words before stemming, so a domain stopword
/// `program` drops `program` but keeps `programming`.
pub struct Normalizer<'a> {
    /// Shared resources.
    lexicon: &'a Lexicon,
    /// Domain stopwords.
    domain: Stopwords,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer that drops `domain` words in addition to the generic stopwords.
    pub fn new(lexicon: &'a Lexicon, domain: Stopwords) -> Self {
        Self { lexicon, domain }
    }

    /// Checks whether a lowercase word is a generic or domain stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.lexicon.stopwords.contains(word) || self.domain.contains(word)
    }

    /// Normalizes text into stemmed tokens with stopwords removed.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        words(text)
            .filter(|w| !self.is_stopword(w))
            .map(|w| self.lexicon.stem(&w))
            .collect()
    }

    /// Normalizes text into stemmed tokens, keeping stopwords.
    ///
    /// Used for titles, where short function words can be part of the name.
    pub fn tokens_keep_stopwords(&self, text: &str) -> Vec<String> {
        words(text).map(|w| self.lexicon.stem(&w)).collect()
    }

    /// Normalizes text and joins the tokens with single spaces.
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}

/// Splits text into lowercase alphabetic words.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_non_letters() {
        let lexicon = Lexicon::load();
        let norm = lexicon.normalizer();
        assert_eq!(norm.tokens("PYTHON3, Flask/SQL!"), vec!["python", "flask", "sql"]);
    }

    #[test]
    fn removes_generic_stopwords() {
        let lexicon = Lexicon::load();
        let norm = lexicon.normalizer();
        assert_eq!(norm.tokens("the python and the flask"), vec!["python", "flask"]);
    }

    #[test]
    fn stems_tokens() {
        let lexicon = Lexicon::load();
        let norm = lexicon.normalizer();
        assert_eq!(norm.tokens("nursing"), norm.tokens("nurses"));
        assert_eq!(norm.tokens("databases"), vec!["databas"]);
    }

    #[test]
    fn domain_stopwords_match_whole_words() {
        let lexicon = Lexicon::load();
        let norm = Normalizer::new(&lexicon, Stopwords::from_words(["program"]));
        assert_eq!(norm.tokens("Program for kotlin"), vec!["kotlin"]);
        assert_eq!(norm.tokens("programming"), vec!["program"]);
        assert_eq!(lexicon.normalizer().tokens("program"), vec!["program"]);
    }

    #[test]
    fn keep_stopwords_variant() {
        let lexicon = Lexicon::load();
        let norm = Normalizer::new(&lexicon, Stopwords::from_words(["kotlin"]));
        assert!(norm.tokens("The Kotlin").is_empty());
        assert_eq!(
            norm.tokens_keep_stopwords("The Kotlin"),
            vec!["the", "kotlin"]
        );
    }

    #[test]
    fn empty_and_symbol_only_text() {
        let lexicon = Lexicon::load();
        let norm = lexicon.normalizer();
        assert!(norm.tokens("").is_empty());
        assert!(norm.tokens("123 -- 456 !!").is_empty());
        assert_eq!(norm.normalize("kotlin   swift"), "kotlin swift");
    }

    #[test]
    fn lexicon_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Lexicon>();
    }
}
