//! Stopword sets.
//!
//! The generic set combines the English list from the `stop-words` crate with words that
//! appear in nearly every résumé or posting and carry no matching signal.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// A set of lowercase words ignored during normalization.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    /// Lowercased words.
    words: HashSet<String>,
}

impl Stopwords {
    /// Creates the generic English stopword set.
    pub fn english() -> Self {
        let mut sw = Self::default();
        sw.extend(stop_words::get(LANGUAGE::English).iter().copied());
        sw.extend(BOILERPLATE.iter().copied());
        sw
    }

    /// Creates a set from arbitrary words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sw = Self::default();
        sw.extend(words);
        sw
    }

    /// Adds words to the set. Words are trimmed and lowercased; empty words are skipped.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                self.words.insert(word);
            }
        }
    }

    /// Checks if a word is a stopword. The check is case-insensitive.
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    /// Iterates over the words in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Returns the number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Résumé and posting boilerplate.
static BOILERPLATE: &[&str] = &[
    "ability",
    "able",
    "duties",
    "eg",
    "etc",
    "ie",
    "including",
    "related",
    "responsibilities",
    "responsible",
    "various",
];
