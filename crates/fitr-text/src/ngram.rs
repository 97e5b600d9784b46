//! Contiguous n-gram expansion.
//!
//! N-grams are built inside one token sequence. Callers that hold several sections expand each
//! section separately so no n-gram spans a section boundary.

/// Expands `tokens` into every n-gram with `min <= n <= max`, joined by single spaces.
///
/// Output is ordered by n, then by position. A `min` of zero is treated as one.
pub fn ngrams(tokens: &[String], min: usize, max: usize) -> Vec<String> {
    let mut out = Vec::new();
    ngrams_into(tokens, min, max, |gram| out.push(gram));
    out
}

/// Expands `tokens` like [`ngrams`], handing each n-gram to `sink`.
pub fn ngrams_into(tokens: &[String], min: usize, max: usize, mut sink: impl FnMut(String)) {
    let min = min.max(1);
    for n in min..=max.min(tokens.len()) {
        for window in tokens.windows(n) {
            sink(window.join(" "));
        }
    }
}
