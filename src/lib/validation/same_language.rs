use std::collections::BTreeSet;

use crate::{automaton::Language, validation::words};

fn common_alphabet(a: &impl Language, b: &impl Language) -> BTreeSet<char> {
    a.alphabet().union(b.alphabet()).copied().collect()
}

/// Checks if two automata accept the same words up to a certain length.
/// Words are built over the union of both alphabets, so symbols one of the
/// automata does not know are covered as well.
pub fn same_language(a: &impl Language, b: &impl Language, max_word_length: usize) -> bool {
    let alphabet = common_alphabet(a, b);

    for word in words(&alphabet, max_word_length) {
        if a.accepts(&word) != b.accepts(&word) {
            tracing::debug!("languages differ on {:?}", word);
            return false;
        }
    }

    true
}

pub fn assert_same_language(a: &impl Language, b: &impl Language, max_word_length: usize) {
    let alphabet = common_alphabet(a, b);

    for word in words(&alphabet, max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both and
/// no word is accepted by none.
pub fn assert_inverse_language(a: &impl Language, b: &impl Language, max_word_length: usize) {
    let alphabet = common_alphabet(a, b);

    for word in words(&alphabet, max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, true) => {
                panic!(
                    "{:?} is accepted by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            (false, false) => {
                panic!(
                    "{:?} is accepted by neither automaton `a` nor automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that `automaton` accepts exactly the words over `alphabet` the
/// `oracle` accepts, up to a certain length.
pub fn assert_language_matches(
    automaton: &impl Language,
    oracle: impl Fn(&str) -> bool,
    alphabet: impl IntoIterator<Item = char>,
    max_word_length: usize,
) {
    let alphabet = alphabet.into_iter().collect::<BTreeSet<_>>();

    for word in words(&alphabet, max_word_length) {
        let expected = oracle(&word);
        assert_eq!(
            automaton.accepts(&word),
            expected,
            "{:?} should {}be accepted",
            word,
            if expected { "" } else { "not " }
        );
    }
}
