// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Thompson's construction
//!
//! Compiles a regular expression syntax tree into an epsilon-NFA. Every
//! sub-expression becomes a fragment with one entry state and one accepting
//! state; the connectives wire fragments together with epsilon transitions.
//! The resulting automaton has exactly one final state.
//!

use crate::enfa::{Enfa, EnfaBuilder, StateId};
use crate::regular_expressions::Regex;

///
/// Compile a regular expression to an epsilon-NFA
///
/// # Example
///
/// ```
/// use regex_fsm::regular_expressions::Regex;
/// use regex_fsm::thompson;
///
/// let re = Regex::parse("(a|b)*").unwrap();
/// let enfa = thompson::compile(&re);
///
/// let word: Vec<u32> = "abba".chars().map(u32::from).collect();
/// assert!(enfa.accepts(&word));
/// assert!(enfa.accepts(&[]));
/// assert!(!enfa.accepts(&['c' as u32]));
/// ```
pub fn compile(re: &Regex) -> Enfa {
    let mut builder = EnfaBuilder::new();
    let (entry, accept) = fragment(&mut builder, re);
    builder.set_start(entry);
    builder.mark_final(accept);
    builder.build_unchecked()
}

// Build the fragment for e and return its (entry, accept) states.
fn fragment(b: &mut EnfaBuilder, e: &Regex) -> (StateId, StateId) {
    match e {
        Regex::Epsilon => {
            let entry = b.fresh_state();
            let accept = b.fresh_state();
            b.add_epsilon(entry, accept);
            (entry, accept)
        }
        Regex::Literal(c) => {
            let entry = b.fresh_state();
            let accept = b.fresh_state();
            b.add_transition(entry, *c, accept);
            (entry, accept)
        }
        Regex::Concat(l, r) => {
            let (entry, mid) = fragment(b, l);
            let (mid2, accept) = fragment(b, r);
            b.add_epsilon(mid, mid2);
            (entry, accept)
        }
        Regex::Union(l, r) => {
            let entry = b.fresh_state();
            let (l_entry, l_accept) = fragment(b, l);
            let (r_entry, r_accept) = fragment(b, r);
            let accept = b.fresh_state();
            b.add_epsilon(entry, l_entry)
                .add_epsilon(entry, r_entry)
                .add_epsilon(l_accept, accept)
                .add_epsilon(r_accept, accept);
            (entry, accept)
        }
        Regex::Star(inner) => {
            let entry = b.fresh_state();
            let (i_entry, i_accept) = fragment(b, inner);
            let accept = b.fresh_state();
            b.add_epsilon(entry, i_entry)
                .add_epsilon(entry, accept)
                .add_epsilon(i_accept, i_entry)
                .add_epsilon(i_accept, accept);
            (entry, accept)
        }
    }
}
