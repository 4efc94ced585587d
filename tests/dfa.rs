use finite_automata::{
    automaton::{Alphabet, Automaton, Language, dfa::DFA},
    error::{AutomatonError, TransitionError},
    validation::same_language::{
        assert_inverse_language, assert_language_matches, assert_same_language,
    },
};

fn ends_in_a() -> DFA {
    let mut dfa = DFA::new();
    let s0 = dfa.add_state("s0", false);
    let s1 = dfa.add_state("s1", true);
    dfa.set_start(Some(s0));

    dfa.add_transition(s0, 'a', s1).unwrap();
    dfa.add_transition(s0, 'b', s0).unwrap();
    dfa.add_transition(s1, 'a', s1).unwrap();
    dfa.add_transition(s1, 'b', s0).unwrap();

    dfa
}

fn even_length() -> DFA {
    let mut dfa = DFA::new();
    let e0 = dfa.add_state("e0", true);
    let e1 = dfa.add_state("e1", false);
    dfa.set_start(Some(e0));

    for symbol in ['a', 'b'] {
        dfa.add_transition(e0, symbol, e1).unwrap();
        dfa.add_transition(e1, symbol, e0).unwrap();
    }

    dfa
}

#[test]
fn test_dfa() {
    let mut dfa = DFA::new();
    let q0 = dfa.add_state("q0", false);
    let q1 = dfa.add_state("q1", false);
    let q2 = dfa.add_state("q2", true);
    dfa.set_start(Some(q0));

    dfa.add_transition(q0, 'a', q1).unwrap();
    dfa.add_transition(q1, 'b', q2).unwrap();
    dfa.add_transition(q2, 'a', q1).unwrap();

    assert!(dfa.accepts("ababab"));
    assert!(!dfa.accepts("ababa"));
    assert!(!dfa.accepts(""));
    assert!(!dfa.accepts("b"));
    assert!(!dfa.accepts("abc"));

    assert_eq!(dfa.next_state(q0, 'a'), Some(q1));
    assert_eq!(dfa.next_state(q0, 'b'), None);
}

#[test]
fn test_dfa_rejects_second_transition() {
    let mut dfa = DFA::new();
    let q0 = dfa.add_state("q0", false);
    let q1 = dfa.add_state("q1", true);
    let q2 = dfa.add_state("q2", false);

    dfa.add_transition(q0, 'a', q1).unwrap();

    assert_eq!(
        dfa.add_transition(q0, 'a', q2),
        Err(TransitionError::Nondeterministic {
            from: "q0".to_string(),
            symbol: 'a',
            to: "q2".to_string(),
        })
    );
    assert!(dfa.add_transition(q0, 'a', q1).is_err());

    assert_eq!(dfa.transition_count(), 1);
    assert_eq!(dfa.next_state(q0, 'a'), Some(q1));
}

#[test]
fn test_dfa_rejects_epsilon() {
    let mut dfa = DFA::new();
    let q0 = dfa.add_state("q0", false);
    let q1 = dfa.add_state("q1", true);

    assert_eq!(
        dfa.add_transition(q0, '@', q1),
        Err(TransitionError::EpsilonInDfa {
            from: "q0".to_string()
        })
    );

    assert_eq!(dfa.transition_count(), 0);
    assert!(dfa.alphabet().is_empty());
}

#[test]
fn test_dfa_without_start() {
    let mut dfa = DFA::new();
    dfa.add_state("q0", true);

    assert!(!dfa.accepts(""));
    assert_eq!(dfa.try_accepts(""), Err(AutomatonError::MissingStart));
}

#[test]
fn test_dfa_intersection() {
    let intersection = ends_in_a().intersect_with(&even_length());

    assert!(intersection.accepts("aa"));
    assert!(intersection.accepts("ba"));
    assert!(!intersection.accepts("a"));
    assert!(!intersection.accepts("ab"));
    assert!(!intersection.accepts(""));

    assert_language_matches(
        &intersection,
        |word| word.ends_with('a') && word.len() % 2 == 0,
        ['a', 'b'],
        6,
    );

    assert_eq!(intersection.state(intersection.get_start().unwrap()).name, "s0_e0");
    assert!(intersection.state_count() <= 4);
}

#[test]
fn test_dfa_intersection_common_alphabet() {
    let mut only_a = DFA::new();
    let q0 = only_a.add_state("q0", true);
    only_a.set_start(Some(q0));
    only_a.add_transition(q0, 'a', q0).unwrap();

    let intersection = only_a.intersect_with(&even_length());

    assert_eq!(
        intersection.alphabet().iter().copied().collect::<Vec<_>>(),
        vec!['a']
    );
    assert_language_matches(
        &intersection,
        |word| word.chars().all(|c| c == 'a') && word.len() % 2 == 0,
        ['a', 'b'],
        5,
    );
}

#[test]
fn test_dfa_intersection_alphabet_only_used_symbols() {
    let mut other = DFA::new();
    let p0 = other.add_state("p0", false);
    let p1 = other.add_state("p1", true);
    let p2 = other.add_state("p2", false);
    other.set_start(Some(p0));
    other.add_transition(p0, 'a', p1).unwrap();
    other.add_transition(p2, 'b', p2).unwrap();

    let intersection = ends_in_a().intersect_with(&other);

    assert_eq!(
        intersection.alphabet().iter().copied().collect::<Vec<_>>(),
        vec!['a']
    );
    assert_eq!(intersection.transition_count(), 1);
    assert!(intersection.accepts("a"));
}

#[test]
fn test_dfa_intersection_without_start() {
    let intersection = ends_in_a().intersect_with(&DFA::new());

    assert_eq!(intersection.get_start(), None);
    assert_eq!(intersection.state_count(), 0);
}

#[test]
fn test_dfa_complement() {
    let dfa = ends_in_a();
    let complement = dfa.complement();

    assert_inverse_language(&dfa, &complement, 6);
    assert_eq!(complement.state_count(), dfa.state_count());
    assert_eq!(complement.state(complement.get_start().unwrap()).name, "s0");

    // the operand is left untouched
    assert!(dfa.accepts("a"));
}

#[test]
fn test_dfa_complement_needs_complete_dfa() {
    let mut dfa = DFA::new();
    let q0 = dfa.add_state("q0", false);
    let q1 = dfa.add_state("q1", true);
    dfa.set_start(Some(q0));
    dfa.add_transition(q0, 'a', q1).unwrap();
    dfa.add_transition(q0, 'b', q0).unwrap();

    // "ab" falls off the partial automaton, flipping finals does not help
    assert!(!dfa.accepts("ab"));
    assert!(!dfa.complement().accepts("ab"));

    let completed = dfa.completed();
    assert!(completed.is_complete());
    assert_same_language(&dfa, &completed, 5);
    assert_inverse_language(&dfa, &completed.complement(), 5);
}

#[test]
fn test_dfa_completed_is_noop_when_complete() {
    let dfa = ends_in_a();

    assert!(dfa.is_complete());
    assert_eq!(dfa.completed().state_count(), dfa.state_count());
}

#[test]
fn test_dfa_to_nfa() {
    let dfa = ends_in_a();
    let nfa = dfa.to_nfa();

    assert_eq!(nfa.state_count(), dfa.state_count());
    assert_eq!(nfa.transition_count(), dfa.transition_count());
    assert_same_language(&dfa, &nfa, 6);
}
