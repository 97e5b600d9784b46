//! Lexical normalization for fitr.
//!
//! Text from profiles and postings passes through a single pipeline before it is compared:
//!
//! 1. Lowercase
//! 2. Replace every non-letter with whitespace
//! 3. Split on whitespace
//! 4. Drop generic and domain stopwords
//! 5. Stem with the Snowball English stemmer
//!
//! The expensive shared resources (stemmer and generic stopword set) live in a [`Lexicon`]
//! that callers build once with [`Lexicon::load`] and borrow for every request. A
//! [`Normalizer`] layers one posting kind's domain stopwords on top of a borrowed lexicon.

#![warn(missing_docs)]

mod ngram;
mod normalize;
mod stopwords;
mod term;

pub use ngram::{ngrams, ngrams_into};
pub use normalize::{Lexicon, Normalizer};
pub use stopwords::Stopwords;
pub use term::TermCounts;
