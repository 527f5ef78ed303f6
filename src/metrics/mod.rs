//! Per-message scoring: word count, two sentiment scores, and tone.
//!
//! Two independent scorers run over every body:
//!
//! - **lexicon-sum** ([`Scorer::lexicon_score`]) adds the valence of every
//!   known word and flips it when the previous word is a negator
//!   ("not happy" scores negative).
//! - **stemmed** ([`Scorer::stemmed_score`]) reduces every token to its
//!   Snowball stem and looks the stem up, so "happiness" and "happily" hit
//!   the entry for "happy". No negation handling.
//!
//! Both raw scores are kept. [`tone`] folds them into one bounded value.
//!
//! # Example
//!
//! ```
//! use commpack::metrics::Scorer;
//!
//! let scorer = Scorer::new();
//! let metrics = scorer.score("Thanks, that works great for the kids");
//!
//! assert_eq!(metrics.word_count, 7);
//! assert!(metrics.sentiment > 0.0);
//! assert!((-1.0..=1.0).contains(&metrics.tone));
//! ```

mod lexicon;

use std::collections::HashMap;
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use lexicon::LEXICON;

/// Divisor applied to the lexicon-sum score before clamping into tone.
pub const SENTIMENT_SCALE: f64 = 10.0;

/// Divisor applied to the stemmed score before clamping into tone.
pub const NATURAL_SCALE: f64 = 5.0;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "doesn't", "didn't", "isn't", "wasn't", "aren't",
    "won't", "can't", "cannot", "couldn't", "shouldn't", "wouldn't",
];

/// Derived numeric metrics for one message body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageMetrics {
    /// Whitespace-delimited non-empty tokens.
    pub word_count: usize,
    /// Raw lexicon-sum score.
    pub sentiment: f64,
    /// Raw stemmed-lexicon score.
    pub sentiment_natural: f64,
    /// `sentiment / max(1, word_count)`.
    pub sentiment_per_word: f64,
    /// `sentiment_natural / max(1, word_count)`.
    pub sentiment_natural_per_word: f64,
    /// Composite in `[-1, 1]`.
    pub tone: f64,
}

/// Lexicon-backed sentiment scorer.
///
/// Build one per run and pass it by reference. Construction re-keys the
/// lexicon by stem, so it is not free.
pub struct Scorer {
    lexicon: HashMap<&'static str, i32>,
    stems: HashMap<String, i32>,
    stemmer: Stemmer,
}

impl Scorer {
    /// Creates a scorer over the embedded lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(LEXICON)
    }

    /// Creates a scorer over a caller-supplied lexicon.
    ///
    /// When two entries reduce to the same stem the first one wins.
    pub fn with_lexicon(entries: &[(&'static str, i32)]) -> Self {
        let stemmer = Stemmer::create(Algorithm::English);
        let mut lexicon = HashMap::with_capacity(entries.len());
        let mut stems = HashMap::with_capacity(entries.len());

        for &(word, valence) in entries {
            lexicon.entry(word).or_insert(valence);
            stems
                .entry(stemmer.stem(word).into_owned())
                .or_insert(valence);
        }

        Self {
            lexicon,
            stems,
            stemmer,
        }
    }

    /// Sums lexicon valences, flipping a word that follows a negator.
    pub fn lexicon_score(&self, text: &str) -> f64 {
        let mut total = 0i64;
        let mut negated = false;

        for token in tokens(text) {
            if let Some(&valence) = self.lexicon.get(token.as_str()) {
                total += i64::from(if negated { -valence } else { valence });
            }
            negated = NEGATORS.contains(&token.as_str());
        }

        total as f64
    }

    /// Sums valences of stemmed tokens.
    pub fn stemmed_score(&self, text: &str) -> f64 {
        tokens(text)
            .filter_map(|token| self.stems.get(self.stemmer.stem(&token).as_ref()))
            .map(|&valence| f64::from(valence))
            .sum()
    }

    /// Computes every metric for a message body.
    pub fn score(&self, body: &str) -> MessageMetrics {
        let word_count = word_count(body);
        let sentiment = self.lexicon_score(body);
        let sentiment_natural = self.stemmed_score(body);
        let denominator = word_count.max(1) as f64;

        MessageMetrics {
            word_count,
            sentiment,
            sentiment_natural,
            sentiment_per_word: finite_or_zero(sentiment / denominator),
            sentiment_natural_per_word: finite_or_zero(sentiment_natural / denominator),
            tone: tone(sentiment, sentiment_natural),
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorer")
            .field("lexicon", &self.lexicon.len())
            .field("stems", &self.stems.len())
            .finish_non_exhaustive()
    }
}

/// Counts whitespace-delimited non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Composite tone from the two raw scores, always within `[-1, 1]`.
///
/// Each score is scaled and clamped on its own before averaging, so one
/// extreme score can move tone by at most half the range.
pub fn tone(sentiment: f64, sentiment_natural: f64) -> f64 {
    let lexical = clamp_unit(sentiment / SENTIMENT_SCALE);
    let natural = clamp_unit(sentiment_natural / NATURAL_SCALE);
    clamp_unit((lexical + natural) / 2.0)
}

/// Clamps to `[-1, 1]`; non-finite input maps to 0.
pub fn clamp_unit(value: f64) -> f64 {
    finite_or_zero(value).clamp(-1.0, 1.0)
}

/// Replaces `NaN` and infinities with 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Lowercase runs of letters and apostrophes.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphabetic() || c == '\'' || c == '\u{2019}'))
        .map(|raw| raw.replace('\u{2019}', "'").to_lowercase())
        .map(|token| token.trim_matches('\'').to_string())
        .filter(|token| !token.is_empty())
}
