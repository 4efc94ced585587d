//! Helpers to compare languages by brute force, mostly used by tests.

use std::{collections::BTreeSet, iter::repeat_n};

use itertools::Itertools;

pub mod same_language;

/// Every word over `alphabet` of length at most `max_word_length`, shortest
/// first, starting with the empty word.
pub fn words(alphabet: &BTreeSet<char>, max_word_length: usize) -> impl Iterator<Item = String> + '_ {
    std::iter::once(String::new()).chain((1..=max_word_length).flat_map(move |length| {
        repeat_n(alphabet.iter(), length)
            .multi_cartesian_product()
            .map(|word| word.into_iter().collect::<String>())
    }))
}
