use finite_automata::{
    automaton::{Alphabet, Automaton, Language, dfa::DFA, nfa::NFA},
    error::SerializationError,
    regex::from_regex,
    serialization::{AutomatonSerializer, BinarySerializer, JsonSerializer},
    validation::same_language::assert_same_language,
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

#[test]
fn test_binary_round_trip() {
    let dfa = ends_in_a();

    let mut buffer: Vec<u8> = vec![];
    dfa.save(&mut buffer).unwrap();

    let mut loaded = DFA::new();
    loaded.load(buffer.as_slice()).unwrap();

    assert_eq!(loaded.state_count(), dfa.state_count());
    assert_eq!(loaded.transition_count(), dfa.transition_count());
    assert_eq!(loaded.alphabet(), dfa.alphabet());
    assert_eq!(loaded.state(loaded.get_start().unwrap()).name, "s0");
    assert_same_language(&dfa, &loaded, 6);
}

#[test]
fn test_binary_file_round_trip() {
    let dfa = from_regex("(a+b)*.a.b").unwrap().determinize().minimize();
    let path = std::env::temp_dir().join(format!("fa_round_trip_{}.bin", std::process::id()));

    dfa.save_to_file(&path).unwrap();

    let mut loaded = DFA::new();
    let result = loaded.load_from_file(&path);
    std::fs::remove_file(&path).ok();
    result.unwrap();

    assert_eq!(loaded.state_count(), dfa.state_count());
    assert_same_language(&dfa, &loaded, 6);
}

#[test]
fn test_binary_round_trip_nfa_with_epsilon() {
    let nfa = from_regex("a*.b").unwrap();

    let mut buffer: Vec<u8> = vec![];
    nfa.save(&mut buffer).unwrap();
    let loaded: NFA = BinarySerializer::deserialize(buffer.as_slice()).unwrap();

    assert_eq!(loaded.state_count(), nfa.state_count());
    assert_eq!(loaded.transition_count(), nfa.transition_count());
    assert!(!loaded.alphabet().contains(&'@'));
    assert_same_language(&nfa, &loaded, 5);
}

#[test]
fn test_binary_without_start() {
    let mut dfa = DFA::new();
    dfa.add_state("lonely", true);

    let mut buffer: Vec<u8> = vec![];
    dfa.save(&mut buffer).unwrap();

    let mut loaded = DFA::new();
    loaded.load(buffer.as_slice()).unwrap();

    assert_eq!(loaded.state_count(), 1);
    assert_eq!(loaded.get_start(), None);
}

#[test]
fn test_load_replaces_content() {
    let mut buffer: Vec<u8> = vec![];
    ends_in_a().save(&mut buffer).unwrap();

    let mut target = DFA::new();
    let x = target.add_state("x", true);
    target.set_start(Some(x));
    target.add_transition(x, 'z', x).unwrap();

    target.load(buffer.as_slice()).unwrap();

    assert_eq!(target.state_count(), 2);
    assert!(!target.alphabet().contains(&'z'));
    assert!(!target.iter_states().any(|state| target.state(state).name == "x"));
}

#[test]
fn test_failed_load_leaves_target_untouched() {
    let mut buffer: Vec<u8> = vec![];
    ends_in_a().save(&mut buffer).unwrap();
    buffer.truncate(buffer.len() - 3);

    let mut target = DFA::new();
    let x = target.add_state("x", true);
    target.set_start(Some(x));

    let error = target.load(buffer.as_slice()).unwrap_err();

    assert!(matches!(error, SerializationError::Io(_)));
    assert_eq!(target.state_count(), 1);
    assert_eq!(target.state(target.get_start().unwrap()).name, "x");
}

#[test]
fn test_load_rejects_out_of_range_start() {
    let mut bytes = vec![];
    bytes.extend(0u64.to_le_bytes()); // alphabet
    bytes.extend(1u64.to_le_bytes()); // states
    bytes.extend(2u64.to_le_bytes());
    bytes.extend(b"q0");
    bytes.push(1);
    bytes.extend(5u64.to_le_bytes()); // start
    bytes.extend(0u64.to_le_bytes()); // transitions

    let mut target = DFA::new();
    let error = target.load(bytes.as_slice()).unwrap_err();

    assert!(matches!(
        error,
        SerializationError::InvalidStateIndex { index: 5, count: 1 }
    ));
    assert_eq!(target.state_count(), 0);
}

#[test]
fn test_load_skips_epsilon_into_dfa() {
    let mut nfa = NFA::new();
    let q0 = nfa.add_state("q0", false);
    let q1 = nfa.add_state("q1", true);
    nfa.set_start(Some(q0));
    nfa.add_transition(q0, '@', q1).unwrap();
    nfa.add_transition(q0, 'a', q1).unwrap();

    let mut buffer: Vec<u8> = vec![];
    nfa.save(&mut buffer).unwrap();

    let mut dfa = DFA::new();
    dfa.load(buffer.as_slice()).unwrap();

    assert_eq!(dfa.transition_count(), 1);
    assert!(dfa.accepts("a"));
    assert!(!dfa.accepts(""));
}

#[test]
fn test_load_missing_file() {
    let path = std::env::temp_dir().join("fa_this_file_does_not_exist.bin");

    let error = DFA::new().load_from_file(&path).unwrap_err();

    assert!(matches!(error, SerializationError::Io(_)));
}

#[test]
fn test_json_round_trip() {
    let dfa = ends_in_a();

    let mut buffer: Vec<u8> = vec![];
    JsonSerializer::serialize(&dfa, &mut buffer).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["alphabet"], serde_json::json!(["a", "b"]));
    assert_eq!(value["states"][0]["name"], "s0");
    assert_eq!(value["states"][1]["accepting"], true);
    assert_eq!(value["start"], 0);
    assert_eq!(
        value["transitions"][0],
        serde_json::json!({ "from": 0, "symbol": "a", "to": 1 })
    );

    let loaded: DFA = JsonSerializer::deserialize(buffer.as_slice()).unwrap();
    assert_eq!(loaded.state_count(), dfa.state_count());
    assert_same_language(&dfa, &loaded, 6);
}

#[test]
fn test_json_rejects_epsilon_in_alphabet() {
    let json = r#"{ "alphabet": ["@"], "states": [], "start": null, "transitions": [] }"#;

    let error = JsonSerializer::deserialize::<NFA, _>(json.as_bytes()).unwrap_err();

    assert!(matches!(error, SerializationError::EpsilonInAlphabet));
}

#[test]
fn test_json_rejects_out_of_range_transition() {
    let json = r#"{
        "alphabet": ["a"],
        "states": [{ "name": "q0", "accepting": true }],
        "start": 0,
        "transitions": [{ "from": 0, "symbol": "a", "to": 3 }]
    }"#;

    let error = JsonSerializer::deserialize::<DFA, _>(json.as_bytes()).unwrap_err();

    assert!(matches!(
        error,
        SerializationError::InvalidStateIndex { index: 3, count: 1 }
    ));
}
