// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Subset construction
//!
//! Determinizes an epsilon-NFA. Each state of the resulting DFA is the
//! set of epsilon-NFA states the machine could be in; the construction
//! starts from the closure of the start state and explores with a
//! worklist, so every state of the result is reachable.
//!
//! The empty set is a legal state of the result (the dead state). It
//! appears when no epsilon-NFA state has a move on some symbol; it loops
//! to itself on every symbol and is never accepting.
//!

use std::collections::{BTreeMap, BTreeSet};

use crate::bfs_queues::BfsQueue;
use crate::dfa::Dfa;
use crate::enfa::{Enfa, StateSet};

///
/// Determinize an epsilon-NFA
///
/// The resulting DFA has a transition for every pair of a reachable state
/// and an alphabet symbol, and a state is final iff it contains a final
/// state of the epsilon-NFA. The construction is deterministic: two runs
/// on the same input produce equal DFAs.
///
/// # Example
///
/// ```
/// use regex_fsm::regular_expressions::Regex;
/// use regex_fsm::subset::subset;
/// use regex_fsm::thompson;
///
/// let re = Regex::parse("(a*b)").unwrap();
/// let dfa = subset(&thompson::compile(&re));
///
/// let word: Vec<u32> = "aab".chars().map(u32::from).collect();
/// assert!(dfa.accepts(&word));
/// ```
pub fn subset(enfa: &Enfa) -> Dfa {
    let closures = enfa.closures();
    let alphabet = enfa.alphabet();
    let start = closures.of(enfa.start()).clone();

    let mut trans = BTreeMap::new();
    let mut finals = BTreeSet::new();
    let mut queue = BfsQueue::new();
    queue.push(start.clone());
    while let Some(q) = queue.pop() {
        if enfa.contains_final(&q) {
            finals.insert(q.clone());
        }
        for &a in &alphabet {
            // successors of q on a: symbol moves followed by closures
            let mut next = StateSet::new();
            for &s in &q {
                for t in enfa.symbol_targets(s, a) {
                    next.extend(closures.of(t).iter().copied());
                }
            }
            queue.push(next.clone());
            trans.insert((q.clone(), a), next);
        }
    }

    Dfa::new(trans, start, finals)
}
