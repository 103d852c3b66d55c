// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end checks of the compilation pipeline: every scenario is
//! evaluated on the epsilon-NFA, the subset-construction DFA, and the
//! minimized DFA, and the three must agree.

use proptest::prelude::*;

use regex_fsm::dfa::Dfa;
use regex_fsm::enfa::{Enfa, EnfaBuilder, StateSet, Symbol};
use regex_fsm::minimizer::minimize;
use regex_fsm::regular_expressions::Regex;
use regex_fsm::subset::subset;
use regex_fsm::thompson;

const A: Symbol = 'a' as u32;
const B: Symbol = 'b' as u32;
const C: Symbol = 'c' as u32;

fn word(s: &str) -> Vec<Symbol> {
    s.chars().map(u32::from).collect()
}

fn machines(pattern: &str) -> (Enfa, Dfa, Dfa) {
    let re = Regex::parse(pattern).expect("pattern should parse");
    let enfa = thompson::compile(&re);
    let dfa = subset(&enfa);
    let min = minimize(&dfa);
    (enfa, dfa, min)
}

fn check(pattern: &str, input: &str, expected: bool) {
    let (enfa, dfa, min) = machines(pattern);
    let w = word(input);
    assert_eq!(enfa.accepts(&w), expected, "enfa: {pattern} on {input:?}");
    assert_eq!(dfa.accepts(&w), expected, "dfa: {pattern} on {input:?}");
    assert_eq!(min.accepts(&w), expected, "minimized: {pattern} on {input:?}");
}

#[test]
fn alternation() {
    check("(a|b)", "a", true);
    check("(a|b)", "b", true);
    check("(a|b)", "c", false);
    check("(a|b)", "", false);
}

#[test]
fn star_then_literal() {
    check("(a*b)", "", false);
    check("(a*b)", "b", true);
    check("(a*b)", "ab", true);
    check("(a*b)", "bb", false);
    check("(a*b)", "aaaaab", true);
}

#[test]
fn union_of_stars() {
    check("(a*|b*)", "", true);
    check("(a*|b*)", "ab", false);
    check("(a*|b*)", &"a".repeat(100), true);
    check("(a*|b*)", &"b".repeat(100), true);
}

#[test]
fn dead_state_is_non_accepting_and_absorbing() {
    let (_, dfa, _) = machines("(a*b)");
    let dead = StateSet::new();
    assert!(dfa.states().contains(&dead));
    assert!(!dfa.is_final(&dead));
    for a in dfa.alphabet() {
        assert_eq!(dfa.transition(&dead, a), Some(&dead));
    }
}

//
// Exhaustive minimality check for small automata: two states are
// distinguishable iff some word of length < |Q| separates them, so
// comparing acceptance over all words up to that length decides
// equivalence exactly.
//
fn pairwise_distinguishable(dfa: &Dfa) -> bool {
    let states: Vec<&StateSet> = dfa.states().into_iter().collect();
    let alphabet: Vec<Symbol> = dfa.alphabet().into_iter().collect();
    let words = words_up_to(&alphabet, dfa.num_states());
    let profiles: Vec<Vec<bool>> = states
        .iter()
        .map(|q| {
            words
                .iter()
                .map(|w| matches!(dfa.run_from(q, w), Some(t) if dfa.is_final(t)))
                .collect()
        })
        .collect();
    for i in 0..profiles.len() {
        for j in i + 1..profiles.len() {
            if profiles[i] == profiles[j] {
                return false;
            }
        }
    }
    true
}

fn words_up_to(alphabet: &[Symbol], max_len: usize) -> Vec<Vec<Symbol>> {
    let mut words: Vec<Vec<Symbol>> = vec![Vec::new()];
    let mut layer: Vec<Vec<Symbol>> = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next_layer = Vec::new();
        for w in &layer {
            for &a in alphabet {
                let mut extended = w.clone();
                extended.push(a);
                next_layer.push(extended);
            }
        }
        words.extend(next_layer.iter().cloned());
        layer = next_layer;
    }
    words
}

#[test]
fn scenario_machines_are_minimal() {
    for pattern in ["(a|b)", "(a*b)", "(a*|b*)", "(a|b)*c", ""] {
        let (_, _, min) = machines(pattern);
        assert!(pairwise_distinguishable(&min), "pattern {pattern}");
    }
}

// Random epsilon-NFAs over the symbols a and b, up to 5 states, with
// state 0 as start.
fn arb_enfa() -> impl Strategy<Value = Enfa> {
    (1u32..=5)
        .prop_flat_map(|n| {
            let edges = prop::collection::vec(
                (0..n, prop::option::of(prop::sample::select(vec![A, B])), 0..n),
                0..=12,
            );
            let finals = prop::collection::btree_set(0..n, 0..=(n as usize));
            (Just(n), edges, finals)
        })
        .prop_map(|(n, edges, finals)| {
            let mut builder = EnfaBuilder::new();
            builder.set_start(0);
            for s in 0..n {
                builder.add_state(s);
            }
            for (from, label, to) in edges {
                match label {
                    Some(symbol) => builder.add_transition(from, symbol, to),
                    None => builder.add_epsilon(from, to),
                };
            }
            for s in finals {
                builder.mark_final(s);
            }
            builder.build().expect("start state was set")
        })
}

// Words over a, b, and the out-of-alphabet symbol c.
fn arb_word() -> impl Strategy<Value = Vec<Symbol>> {
    prop::collection::vec(prop::sample::select(vec![A, B, C]), 0..=8)
}

proptest! {
    #[test]
    fn closure_is_reflexive_and_transitive(enfa in arb_enfa()) {
        let closures = enfa.closures();
        for (s, closure) in closures.iter() {
            prop_assert!(closure.contains(&s));
            for &t in closure {
                for &u in closures.of(t) {
                    prop_assert!(closure.contains(&u));
                }
            }
        }
    }

    #[test]
    fn subset_output_is_a_function_of_the_input(enfa in arb_enfa()) {
        prop_assert_eq!(subset(&enfa), subset(&enfa));
    }

    #[test]
    fn determinization_preserves_the_language(enfa in arb_enfa(), w in arb_word()) {
        let dfa = subset(&enfa);
        prop_assert_eq!(enfa.accepts(&w), dfa.accepts(&w));
    }

    #[test]
    fn minimization_preserves_the_language(enfa in arb_enfa(), w in arb_word()) {
        let dfa = subset(&enfa);
        let min = minimize(&dfa);
        prop_assert_eq!(dfa.accepts(&w), min.accepts(&w));
    }

    #[test]
    fn minimize_is_idempotent(enfa in arb_enfa()) {
        let min = minimize(&subset(&enfa));
        prop_assert_eq!(minimize(&min), min);
    }

    #[test]
    fn minimized_states_are_pairwise_distinguishable(enfa in arb_enfa()) {
        let min = minimize(&subset(&enfa));
        // the exhaustive check enumerates |A|^|Q| words; keep it to
        // automata where that is cheap
        if min.num_states() <= 8 {
            prop_assert!(pairwise_distinguishable(&min));
        }
    }
}
