use finite_automata::automaton::{
    Alphabet, Automaton, Language, StateId, Symbol, dfa::DFA, nfa::NFA,
};

fn alternating_dfa() -> (DFA, StateId, StateId) {
    let mut dfa = DFA::new();
    let q0 = dfa.add_state("q0", false);
    let q1 = dfa.add_state("q1", true);
    dfa.set_start(Some(q0));

    dfa.add_transition(q0, 'a', q1).unwrap();
    dfa.add_transition(q1, 'b', q0).unwrap();

    (dfa, q0, q1)
}

#[test]
fn test_next_states_in_insertion_order() {
    let mut nfa = NFA::new();
    let q0 = nfa.add_state("q0", false);
    let q1 = nfa.add_state("q1", false);
    let q2 = nfa.add_state("q2", true);

    nfa.add_transition(q0, 'a', q2).unwrap();
    nfa.add_transition(q0, 'a', q1).unwrap();
    nfa.add_transition(q0, '@', q1).unwrap();

    assert_eq!(nfa.next_states(q0, 'a'), vec![q2, q1]);
    assert_eq!(nfa.next_states(q0, Symbol::Epsilon), vec![q1]);
    assert!(nfa.next_states(q1, 'a').is_empty());
    assert!(nfa.has_transition(q0, '@'));
    assert!(!nfa.has_transition(q2, 'a'));

    assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['a']);
    assert_eq!(nfa.state_count(), 3);
    assert_eq!(nfa.transition_count(), 3);
}

#[test]
fn test_start_state_is_optional() {
    let mut nfa = NFA::new();
    let q0 = nfa.add_state("q0", true);

    assert_eq!(nfa.get_start(), None);
    assert!(!nfa.accepts(""));

    nfa.set_start(Some(q0));
    assert_eq!(nfa.get_start(), Some(q0));
    assert!(nfa.accepts(""));

    nfa.set_start(None);
    assert!(!nfa.accepts(""));
}

#[test]
fn test_explicit_alphabet_symbols() {
    let mut dfa = DFA::new();
    dfa.add_symbol_to_alphabet('z');
    dfa.add_symbol_to_alphabet('@');

    assert_eq!(dfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['z']);
}

#[test]
fn test_copy_states_then_transitions() {
    let (dfa, q0, q1) = alternating_dfa();

    let mut nfa = NFA::new();
    let existing = nfa.add_state("existing", false);

    let mut pairs = vec![];
    let state_map = dfa.copy_states_into(&mut nfa, |target, original, copy| {
        // no transition is copied before all states exist
        assert_eq!(target.transition_count(), 0);
        pairs.push((original, copy));
    });

    assert_eq!(pairs.len(), 2);
    assert_eq!(state_map[q0], Some(pairs[0].1));
    assert_eq!(state_map[q1], Some(pairs[1].1));
    assert_ne!(state_map[q0], Some(existing));

    let copy0 = pairs[0].1;
    let copy1 = pairs[1].1;
    assert_eq!(nfa.state(copy0).name, "q0");
    assert!(!nfa.is_accepting(copy0));
    assert_eq!(nfa.state(copy1).name, "q1");
    assert!(nfa.is_accepting(copy1));

    dfa.copy_transitions_into(&mut nfa, &state_map);

    assert_eq!(nfa.transition_count(), 2);
    assert_eq!(nfa.next_states(copy0, 'a'), vec![copy1]);
    assert_eq!(nfa.next_states(copy1, 'b'), vec![copy0]);
    assert_eq!(nfa.alphabet(), dfa.alphabet());

    // the start state is up to the caller
    assert_eq!(nfa.get_start(), None);
}

#[test]
fn test_clear_states_and_alphabet_independently() {
    let (mut dfa, _, _) = alternating_dfa();

    dfa.clear_states();

    assert_eq!(dfa.state_count(), 0);
    assert_eq!(dfa.transition_count(), 0);
    assert_eq!(dfa.get_start(), None);
    assert_eq!(dfa.alphabet().len(), 2);

    dfa.clear_alphabet();
    assert!(dfa.alphabet().is_empty());
}

#[test]
fn test_describe() {
    let (mut dfa, _, _) = alternating_dfa();
    dfa.add_state("q2", false);

    assert_eq!(
        dfa.describe(),
        "State: q0 (Start)\nTransitions:\nq0--a-->q1\n\n\
         State: q1 (Final)\nTransitions:\nq1--b-->q0\n\n\
         State: q2\nTransitions:\nNone\n\n"
    );
    assert_eq!(dfa.to_string(), dfa.describe());
}

#[test]
fn test_describe_lists_epsilon_last() {
    let mut nfa = NFA::new();
    let q0 = nfa.add_state("q0", true);
    nfa.set_start(Some(q0));
    nfa.add_transition(q0, '@', q0).unwrap();
    nfa.add_transition(q0, 'x', q0).unwrap();

    assert_eq!(
        nfa.describe(),
        "State: q0 (Start) (Final)\nTransitions:\nq0--x-->q0\nq0--@-->q0\n\n"
    );
}

#[test]
fn test_graphviz() {
    let (dfa, _, _) = alternating_dfa();
    let dot = dfa.to_graphviz();

    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("q0 [ label = \"q0\", shape = circle ];"));
    assert!(dot.contains("q1 [ label = \"q1\", shape = doublecircle ];"));
    assert!(dot.contains("__start -> q0;"));
    assert!(dot.contains("q0 -> q1 [ label = \"a\" ];"));
    assert!(dot.contains("q1 -> q0 [ label = \"b\" ];"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_graphviz_epsilon_and_no_start() {
    let mut nfa = NFA::new();
    let q0 = nfa.add_state("q0", false);
    let q1 = nfa.add_state("q1", true);
    nfa.add_transition(q0, '@', q1).unwrap();

    let dot = nfa.to_graphviz();

    assert!(dot.contains("q0 -> q1 [ label = \"@\" ];"));
    assert!(!dot.contains("__start ->"));
}
