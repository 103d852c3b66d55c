// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Minimization of deterministic finite-state automata
//!

use std::collections::{BTreeMap, BTreeSet};

use crate::dfa::Dfa;
use crate::enfa::{StateSet, Symbol};

//
// The automaton is defined by
// - a set of states Q (sets of epsilon-NFA states)
// - an alphabet A (the symbols that occur in the transition map)
// - a partial transition function delta: Q x A -> Q
// - a set of final states F
//
// Pair refinement
// ---------------
// - maintain a relation R of unordered pairs of states that may still be
//   equivalent
// - initially R holds every pair of distinct final states and every pair
//   of distinct non-final states, over the states that have outgoing
//   transitions; a pair crossing the final/non-final boundary is
//   distinguished by the empty word and never enters R
// - refinement step: keep (p, q) in R only if for every symbol a the
//   successors delta(p, a) and delta(q, a) are equal or form a pair of R
// - repeat until R stops shrinking; R is then the indistinguishability
//   relation, and it is transitively closed
//
// Quotient
// --------
// Every class collapses to its largest member: key each surviving pair by
// its smaller member, keep the largest value per key, and map every state
// component of the automaton through the resulting table. For a class
// {a, b, c} with a < b < c, the surviving pairs (a,b), (a,c), (b,c)
// produce the table a -> c, b -> c.
//
// The transition function may be partial. The refinement step needs a
// total function, so the working copy is completed with the empty state
// set as a dead sink first. The rewrite is applied to the caller's
// original components, so a partial input yields a partial output.
//
// Pairs are stored sorted as (smaller, larger); the relation is symmetric
// in membership tests, which normalize before lookup.
//

type PairSet = BTreeSet<(StateSet, StateSet)>;

#[derive(Debug)]
struct Minimizer<'a> {
    dfa: &'a Dfa,
    alphabet: Vec<Symbol>,
    // completed transition function
    trans: BTreeMap<(StateSet, Symbol), StateSet>,
    // pairs of states that may still be equivalent
    pairs: PairSet,
}

impl<'a> Minimizer<'a> {
    fn new(dfa: &'a Dfa) -> Self {
        let alphabet: Vec<Symbol> = dfa.alphabet().into_iter().collect();

        // complete the transition function with the empty set as dead sink
        let mut trans: BTreeMap<(StateSet, Symbol), StateSet> = dfa
            .transitions()
            .map(|(q, a, t)| ((q.clone(), a), t.clone()))
            .collect();
        let dead = StateSet::new();
        let mut need_sink = false;
        for q in dfa.states() {
            for &a in &alphabet {
                let key = (q.clone(), a);
                if !trans.contains_key(&key) {
                    trans.insert(key, dead.clone());
                    need_sink = true;
                }
            }
        }
        if need_sink {
            for &a in &alphabet {
                trans.entry((dead.clone(), a)).or_insert_with(StateSet::new);
            }
        }

        // initial relation: pairs of distinct states on the same side of
        // the final/non-final boundary, over the upper triangle of the
        // sorted state list
        let sources: Vec<StateSet> = trans
            .keys()
            .map(|(q, _)| q.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut pairs = PairSet::new();
        for (i, p) in sources.iter().enumerate() {
            for q in &sources[i + 1..] {
                if dfa.is_final(p) == dfa.is_final(q) {
                    pairs.insert((p.clone(), q.clone()));
                }
            }
        }

        Minimizer {
            dfa,
            alphabet,
            trans,
            pairs,
        }
    }

    // Successor over the completed transition function.
    fn next(&self, q: &StateSet, a: Symbol) -> &StateSet {
        &self.trans[&(q.clone(), a)]
    }

    // x and y are related iff they are equal or form a pair of R.
    fn related(pairs: &PairSet, x: &StateSet, y: &StateSet) -> bool {
        if x == y {
            return true;
        }
        let (l, r) = if x < y { (x, y) } else { (y, x) };
        pairs.contains(&(l.clone(), r.clone()))
    }

    //
    // Shrink the relation until it reaches a fixed point. Termination:
    // the relation is finite and each step removes pairs or stops.
    //
    fn refine(&mut self) {
        loop {
            let retained: PairSet = self
                .pairs
                .iter()
                .filter(|(p, q)| {
                    self.alphabet
                        .iter()
                        .all(|&a| Self::related(&self.pairs, self.next(p, a), self.next(q, a)))
                })
                .cloned()
                .collect();
            if retained.len() == self.pairs.len() {
                break;
            }
            self.pairs = retained;
        }
    }

    //
    // Collapse each equivalence class to its largest member and rewrite
    // the original automaton's components.
    //
    fn quotient(&self) -> Dfa {
        let mut rewrite: BTreeMap<StateSet, StateSet> = BTreeMap::new();
        for (l, r) in &self.pairs {
            match rewrite.get(l) {
                Some(current) if current >= r => {}
                _ => {
                    rewrite.insert(l.clone(), r.clone());
                }
            }
        }
        let apply = |q: &StateSet| rewrite.get(q).cloned().unwrap_or_else(|| q.clone());

        let trans = self
            .dfa
            .transitions()
            .map(|(q, a, t)| ((apply(q), a), apply(t)))
            .collect();
        let start = apply(self.dfa.start());
        let finals = self.dfa.finals().map(apply).collect();
        Dfa::new(trans, start, finals)
    }
}

///
/// Minimize a DFA
///
/// The result accepts exactly the same language and has no two distinct
/// states that accept the same set of suffixes. Equivalent states collapse
/// to the largest member of their equivalence class, so the output is a
/// function of the input alone: minimizing twice yields equal automata,
/// and minimizing an already-minimal automaton returns it unchanged.
///
/// # Example
///
/// ```
/// use regex_fsm::minimizer::minimize;
/// use regex_fsm::regular_expressions::Regex;
/// use regex_fsm::subset::subset;
/// use regex_fsm::thompson;
///
/// let re = Regex::parse("(a*|b*)").unwrap();
/// let dfa = subset(&thompson::compile(&re));
/// let min = minimize(&dfa);
///
/// assert!(min.num_states() <= dfa.num_states());
/// let word: Vec<u32> = "aaa".chars().map(u32::from).collect();
/// assert_eq!(dfa.accepts(&word), min.accepts(&word));
/// ```
pub fn minimize(dfa: &Dfa) -> Dfa {
    let mut minimizer = Minimizer::new(dfa);
    minimizer.refine();
    minimizer.quotient()
}
