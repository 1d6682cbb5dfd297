//! Token counting and candidate filtering.
//!
//! `TokenCounts` accumulates occurrences; `into_candidates` keeps the tokens
//! that pass `FilterSettings` and emits one `Candidate` per distinct word.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::settings::{settings, FilterSettings};

/// A word that passed the frequency filter, not yet committed to a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Candidate {
    pub word: String,
    pub frequency: u32,
}

#[derive(Debug, Default, Clone)]
pub struct TokenCounts {
    counts: HashMap<String, u32>,
    total: usize,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(n) => *n = n.saturating_add(1),
            None => {
                self.counts.insert(token.to_string(), 1);
            }
        }
        self.total += 1;
    }

    pub fn count(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of tokens seen, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Filter the counted tokens. The result is sorted by word.
    pub fn into_candidates(self, filter: &FilterSettings) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = self
            .counts
            .into_iter()
            .filter(|(word, count)| filter.accepts(word, *count))
            .map(|(word, frequency)| Candidate { word, frequency })
            .collect();
        out.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        out
    }
}

impl<S: AsRef<str>> Extend<S> for TokenCounts {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for token in iter {
            self.add(token.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = Self::new();
        counts.extend(iter);
        counts
    }
}

/// Count `tokens` and keep the ones passing the configured filter.
pub fn aggregate<I, S>(tokens: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate_with(tokens, &settings().filter)
}

pub fn aggregate_with<I, S>(tokens: I, filter: &FilterSettings) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let _span = debug_span!("aggregate").entered();
    let counts: TokenCounts = tokens.into_iter().collect();
    let (total, distinct) = (counts.total(), counts.distinct());
    let candidates = counts.into_candidates(filter);
    debug!(total, distinct, kept = candidates.len());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(word: &str, frequency: u32) -> Candidate {
        Candidate {
            word: word.to_string(),
            frequency,
        }
    }

    #[test]
    fn counts_and_filters_example() {
        let tokens = ["cat", "cat", "cat", "dog", "dog", "dog", "dog", "bird"];
        let got = aggregate_with(tokens, &FilterSettings::default());
        assert_eq!(got, vec![cand("cat", 3), cand("dog", 4)]);
    }

    #[test]
    fn count_must_exceed_two() {
        let got = aggregate_with(["fox", "fox"], &FilterSettings::default());
        assert!(got.is_empty());
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let short = "ab";
        let min = "abc";
        let max = "abcdefghijklmno";
        let long = "abcdefghijklmnop";
        let tokens: Vec<&str> = [short, min, max, long]
            .iter()
            .flat_map(|w| std::iter::repeat(*w).take(3))
            .collect();
        let got = aggregate_with(tokens, &FilterSettings::default());
        assert_eq!(got, vec![cand(min, 3), cand(max, 3)]);
    }

    #[test]
    fn length_counts_characters() {
        // 3 characters, 6 bytes
        let tokens = ["жук", "жук", "жук"];
        assert_eq!(
            aggregate_with(tokens, &FilterSettings::default()),
            vec![cand("жук", 3)]
        );
    }

    #[test]
    fn order_independent() {
        let a = ["one", "two", "one", "two", "one", "two"];
        let b = ["two", "two", "two", "one", "one", "one"];
        let filter = FilterSettings::default();
        assert_eq!(aggregate_with(a, &filter), aggregate_with(b, &filter));
    }

    #[test]
    fn custom_filter() {
        let filter = FilterSettings {
            min_count: 2,
            min_len: 2,
            max_len: 4,
        };
        let got = aggregate_with(["ox", "ox", "yak", "emus", "emus", "horse", "horse"], &filter);
        assert_eq!(got, vec![cand("emus", 2), cand("ox", 2)]);
    }

    #[test]
    fn token_counts_accessors() {
        let mut counts = TokenCounts::new();
        counts.extend(["a", "b", "a"]);
        counts.add("c");
        assert_eq!(counts.count("a"), 2);
        assert_eq!(counts.count("z"), 0);
        assert_eq!(counts.distinct(), 3);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn counts_accumulate_across_batches() {
        let mut counts = TokenCounts::new();
        counts.extend(["word", "word"]);
        counts.extend(vec!["word".to_string()]);
        assert_eq!(
            counts.into_candidates(&FilterSettings::default()),
            vec![cand("word", 3)]
        );
    }
}
