// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Deterministic finite-state automata
//!
//! A DFA state is a set of epsilon-NFA states ([StateSet]). That is the
//! natural state type for automata produced by the subset construction,
//! and minimization preserves it: each state of a minimized automaton is
//! the representative of an equivalence class of such sets.
//!
//! All components use ordered containers, so two DFAs compare equal
//! exactly when they have the same transition map, the same start state,
//! and the same final states. A missing entry in the transition map means
//! there is no transition on that symbol from that state.
//!

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use crate::enfa::{symbol_char, StateSet, Symbol};

///
/// Deterministic finite-state automaton over set-valued states
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    // (state, symbol) -> successor state
    trans: BTreeMap<(StateSet, Symbol), StateSet>,
    // the initial state
    start: StateSet,
    // set of final states
    finals: BTreeSet<StateSet>,
}

impl Dfa {
    ///
    /// Assemble a DFA from its components
    ///
    /// A missing entry in `trans` means there is no transition on that
    /// symbol from that state.
    ///
    pub fn new(
        trans: BTreeMap<(StateSet, Symbol), StateSet>,
        start: StateSet,
        finals: BTreeSet<StateSet>,
    ) -> Self {
        Dfa {
            trans,
            start,
            finals,
        }
    }

    /// Get the start state
    pub fn start(&self) -> &StateSet {
        &self.start
    }

    /// Iterator to go through the final states
    pub fn finals(&self) -> impl Iterator<Item = &StateSet> {
        self.finals.iter()
    }

    /// Check whether state q is final
    pub fn is_final(&self, q: &StateSet) -> bool {
        self.finals.contains(q)
    }

    /// Every state mentioned by the automaton
    pub fn states(&self) -> BTreeSet<&StateSet> {
        let mut set: BTreeSet<&StateSet> = BTreeSet::new();
        set.insert(&self.start);
        set.extend(self.finals.iter());
        for ((q, _), t) in &self.trans {
            set.insert(q);
            set.insert(t);
        }
        set
    }

    /// Number of states
    pub fn num_states(&self) -> usize {
        self.states().len()
    }

    /// Symbols with at least one transition
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.trans.keys().map(|(_, a)| *a).collect()
    }

    /// Successor of state q on symbol a
    pub fn transition(&self, q: &StateSet, a: Symbol) -> Option<&StateSet> {
        self.trans.get(&(q.clone(), a))
    }

    /// Iterator to go through the transitions as (state, symbol, successor)
    pub fn transitions(&self) -> impl Iterator<Item = (&StateSet, Symbol, &StateSet)> {
        self.trans.iter().map(|((q, a), t)| (q, *a, t))
    }

    ///
    /// Run a word from an arbitrary state
    ///
    /// Return the state reached after consuming the whole word, or None
    /// if some symbol has no transition from the current state.
    ///
    pub fn run_from<'a>(&'a self, q: &'a StateSet, input: &[Symbol]) -> Option<&'a StateSet> {
        let mut current = q;
        for &c in input {
            current = self.transition(current, c)?;
        }
        Some(current)
    }

    ///
    /// Check whether a word is accepted
    ///
    /// Starting at the start state, consume the input one symbol at a
    /// time. The word is accepted iff the run ends in a final state; a
    /// symbol with no transition from the current state rejects
    /// immediately.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_fsm::regular_expressions::Regex;
    /// use regex_fsm::subset::subset;
    /// use regex_fsm::thompson;
    ///
    /// let re = Regex::parse("(a|b)").unwrap();
    /// let dfa = subset(&thompson::compile(&re));
    ///
    /// assert!(dfa.accepts(&['a' as u32]));
    /// assert!(dfa.accepts(&['b' as u32]));
    /// assert!(!dfa.accepts(&['c' as u32]));
    /// assert!(!dfa.accepts(&[]));
    /// ```
    pub fn accepts(&self, input: &[Symbol]) -> bool {
        match self.run_from(&self.start, input) {
            Some(q) => self.is_final(q),
            None => false,
        }
    }
}

// Print a state as its set of epsilon-NFA states.
fn write_state(f: &mut std::fmt::Formatter<'_>, q: &StateSet) -> std::fmt::Result {
    write!(f, "{{")?;
    for s in q {
        write!(f, " {s}")?;
    }
    write!(f, " }}")
}

impl Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} states", self.num_states())?;
        write!(f, "start state: ")?;
        write_state(f, &self.start)?;
        writeln!(f)?;
        write!(f, "final states:")?;
        for q in &self.finals {
            write!(f, " ")?;
            write_state(f, q)?;
        }
        writeln!(f)?;
        writeln!(f, "transitions:")?;
        for ((q, a), t) in &self.trans {
            write!(f, "  \u{03B4}(")?;
            write_state(f, q)?;
            write!(f, ", {}) = ", symbol_char(*a))?;
            write_state(f, t)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn q(ids: &[u32]) -> StateSet {
        ids.iter().copied().collect()
    }

    // a DFA for a(b*) with no transitions out of the dead cases
    fn partial_dfa() -> Dfa {
        let a = 'a' as u32;
        let b = 'b' as u32;
        let mut trans = BTreeMap::new();
        trans.insert((q(&[0]), a), q(&[1]));
        trans.insert((q(&[1]), b), q(&[1]));
        Dfa::new(trans, q(&[0]), [q(&[1])].into_iter().collect())
    }

    #[test]
    fn accepts_follows_transitions() {
        let dfa = partial_dfa();
        let a = 'a' as u32;
        let b = 'b' as u32;
        assert!(dfa.accepts(&[a]));
        assert!(dfa.accepts(&[a, b, b, b]));
        assert!(!dfa.accepts(&[b]));
        assert!(!dfa.accepts(&[a, a]));
    }

    #[test]
    fn empty_word_accepted_iff_start_is_final() {
        let dfa = partial_dfa();
        assert!(!dfa.accepts(&[]));

        let accepting_start = Dfa::new(BTreeMap::new(), q(&[0]), [q(&[0])].into_iter().collect());
        assert!(accepting_start.accepts(&[]));
    }

    #[test]
    fn unknown_symbol_rejects() {
        let dfa = partial_dfa();
        assert!(!dfa.accepts(&['z' as u32]));
    }

    #[test]
    fn run_from_reports_stuck_runs() {
        let dfa = partial_dfa();
        let start = q(&[0]);
        assert_eq!(dfa.run_from(&start, &['a' as u32]), Some(&q(&[1])));
        assert_eq!(dfa.run_from(&start, &['b' as u32]), None);
    }

    #[test]
    fn states_include_all_components() {
        let dfa = partial_dfa();
        let states = dfa.states();
        assert_eq!(states.len(), 2);
        assert!(states.contains(&q(&[0])));
        assert!(states.contains(&q(&[1])));
    }
}
