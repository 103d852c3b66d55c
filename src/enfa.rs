// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Epsilon-NFAs
//!
//! States are identified by u32 integers and input symbols are u32 code
//! points. Transitions are labeled by `Option<Symbol>`, where `None` is an
//! epsilon transition. An [Enfa] is an immutable value: it is assembled
//! with an [EnfaBuilder] or produced by
//! [thompson::compile](crate::thompson::compile), and every operation on
//! it is a pure function.
//!
//! The module also computes the two derived structures that the subset
//! construction consumes: the alphabet (see [alphabet](Enfa::alphabet)),
//! i.e. the set of non-epsilon symbols mentioned in the transitions, and
//! the epsilon-closure table (see [closures](Enfa::closures)), which maps
//! every state to the set of states reachable from it by zero or more
//! epsilon transitions.
//!

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use crate::bfs_queues::BfsQueue;
use crate::errors::Error;

/// State identifier
pub type StateId = u32;

/// Input symbol (a Unicode scalar value)
pub type Symbol = u32;

/// A set of epsilon-NFA states
///
/// Sets of states are ordered values: two sets compare by their sorted
/// element sequences, and the empty set is the smallest set. This is the
/// state type of DFAs produced by the subset construction.
pub type StateSet = BTreeSet<StateId>;

// Render a symbol when printing automata and regular expressions.
pub(crate) fn symbol_char(s: Symbol) -> char {
    char::from_u32(s).unwrap_or(char::REPLACEMENT_CHARACTER)
}

///
/// Nondeterministic finite-state automaton with epsilon transitions
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enfa {
    // set of all states
    states: BTreeSet<StateId>,
    // the initial state
    start: StateId,
    // set of final states
    finals: BTreeSet<StateId>,
    // trans[s][None] = epsilon successors of s
    // trans[s][Some(c)] = successors of s on symbol c
    // an absent key means no such transitions
    trans: BTreeMap<StateId, BTreeMap<Option<Symbol>, BTreeSet<StateId>>>,
}

///
/// Epsilon-closure table
///
/// Maps every state of an automaton to its epsilon-closure: the set of
/// states reachable by zero or more epsilon transitions. The closure of a
/// state always contains the state itself and is closed under the epsilon
/// relation.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureTable {
    map: BTreeMap<StateId, StateSet>,
}

impl ClosureTable {
    ///
    /// Epsilon-closure of state s
    ///
    /// # Panics
    ///
    /// If s is not a state of the automaton this table was computed from.
    ///
    pub fn of(&self, s: StateId) -> &StateSet {
        &self.map[&s]
    }

    /// Iterate through the pairs (state, closure of the state)
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &StateSet)> {
        self.map.iter().map(|(&s, c)| (s, c))
    }
}

impl Enfa {
    /// Get the start state
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Number of states
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Iterator to go through the states
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }

    /// Iterator to go through the final states
    pub fn finals(&self) -> impl Iterator<Item = StateId> + '_ {
        self.finals.iter().copied()
    }

    /// Check whether state s is final
    pub fn is_final(&self, s: StateId) -> bool {
        self.finals.contains(&s)
    }

    /// Check whether a set of states contains a final state
    pub fn contains_final(&self, set: &StateSet) -> bool {
        set.iter().any(|s| self.finals.contains(s))
    }

    // Successors of s under a label. A target that is not a state of the
    // automaton is ignored, matching the silent-absence convention of the
    // transition tables.
    fn targets(&self, s: StateId, label: Option<Symbol>) -> impl Iterator<Item = StateId> + '_ {
        let states = &self.states;
        self.trans
            .get(&s)
            .and_then(|edges| edges.get(&label))
            .into_iter()
            .flatten()
            .copied()
            .filter(move |t| states.contains(t))
    }

    /// Successors of state s by one epsilon transition
    pub fn epsilon_targets(&self, s: StateId) -> impl Iterator<Item = StateId> + '_ {
        self.targets(s, None)
    }

    /// Successors of state s on symbol a
    pub fn symbol_targets(&self, s: StateId, a: Symbol) -> impl Iterator<Item = StateId> + '_ {
        self.targets(s, Some(a))
    }

    ///
    /// Alphabet of the automaton
    ///
    /// The set of non-epsilon symbols mentioned anywhere in the
    /// transitions. The alphabet of an automaton with no symbol
    /// transitions is empty.
    ///
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.trans
            .values()
            .flat_map(|edges| edges.keys())
            .filter_map(|label| *label)
            .collect()
    }

    ///
    /// Compute the epsilon-closure table
    ///
    /// For every state s, the table holds the set of states reachable
    /// from s by zero or more epsilon transitions (including s itself).
    ///
    pub fn closures(&self) -> ClosureTable {
        let mut map = BTreeMap::new();
        for &s in &self.states {
            let mut queue = BfsQueue::new();
            let mut closure = StateSet::new();
            queue.push(s);
            while let Some(t) = queue.pop() {
                closure.insert(t);
                for u in self.epsilon_targets(t) {
                    queue.push(u);
                }
            }
            map.insert(s, closure);
        }
        ClosureTable { map }
    }

    ///
    /// Check whether a word is accepted
    ///
    /// Simulates the automaton by maintaining the set of possible states:
    /// start at the closure of the start state, then for each input symbol
    /// take the symbol transitions followed by their closures. The word is
    /// accepted iff the resulting set contains a final state.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_fsm::enfa::EnfaBuilder;
    ///
    /// // (ab)* as a hand-written epsilon-NFA
    /// let mut builder = EnfaBuilder::new();
    /// builder
    ///     .set_start(0)
    ///     .mark_final(0)
    ///     .add_transition(0, 'a' as u32, 1)
    ///     .add_transition(1, 'b' as u32, 2)
    ///     .add_epsilon(2, 0);
    /// let enfa = builder.build().unwrap();
    ///
    /// let word: Vec<u32> = "abab".chars().map(u32::from).collect();
    /// assert!(enfa.accepts(&word));
    /// assert!(!enfa.accepts(&['a' as u32]));
    /// ```
    pub fn accepts(&self, input: &[Symbol]) -> bool {
        let closures = self.closures();
        let mut current = closures.of(self.start).clone();
        for &c in input {
            let mut next = StateSet::new();
            for &s in &current {
                for t in self.symbol_targets(s, c) {
                    next.extend(closures.of(t).iter().copied());
                }
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        self.contains_final(&current)
    }
}

impl Display for Enfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} states", self.num_states())?;
        writeln!(f, "start state: {}", self.start)?;
        write!(f, "final states:")?;
        for s in &self.finals {
            write!(f, " {s}")?;
        }
        writeln!(f)?;
        writeln!(f, "transitions:")?;
        for (s, edges) in &self.trans {
            for (label, targets) in edges {
                for t in targets {
                    match label {
                        None => writeln!(f, "  \u{03B4}({s}, \u{03B5}) = {t}")?,
                        Some(c) => writeln!(f, "  \u{03B4}({s}, {}) = {t}", symbol_char(*c))?,
                    }
                }
            }
        }
        Ok(())
    }
}

///
/// Builder for [Enfa] values
///
/// States are u32 identifiers chosen by the caller or allocated with
/// [fresh_state](Self::fresh_state). Any state mentioned in a transition
/// or marked final is registered automatically, so the resulting
/// automaton's transition targets always belong to its state set.
///
#[derive(Debug, Default)]
pub struct EnfaBuilder {
    next_id: StateId,
    states: BTreeSet<StateId>,
    start: Option<StateId>,
    finals: BTreeSet<StateId>,
    trans: BTreeMap<StateId, BTreeMap<Option<Symbol>, BTreeSet<StateId>>>,
}

impl EnfaBuilder {
    ///
    /// Create a new builder with no states
    ///
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Allocate a state with an id not used so far
    ///
    pub fn fresh_state(&mut self) -> StateId {
        let s = self.next_id;
        self.add_state(s);
        s
    }

    ///
    /// Register a state
    ///
    pub fn add_state(&mut self, s: StateId) -> &mut Self {
        self.states.insert(s);
        self.next_id = self.next_id.max(s + 1);
        self
    }

    ///
    /// Choose the start state
    ///
    pub fn set_start(&mut self, s: StateId) -> &mut Self {
        self.add_state(s);
        self.start = Some(s);
        self
    }

    ///
    /// Mark a final state
    ///
    pub fn mark_final(&mut self, s: StateId) -> &mut Self {
        self.add_state(s);
        self.finals.insert(s);
        self
    }

    ///
    /// Add a transition on a symbol
    ///
    pub fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) -> &mut Self {
        self.add_edge(from, Some(symbol), to)
    }

    ///
    /// Add an epsilon transition
    ///
    pub fn add_epsilon(&mut self, from: StateId, to: StateId) -> &mut Self {
        self.add_edge(from, None, to)
    }

    fn add_edge(&mut self, from: StateId, label: Option<Symbol>, to: StateId) -> &mut Self {
        self.add_state(from);
        self.add_state(to);
        self.trans
            .entry(from)
            .or_default()
            .entry(label)
            .or_default()
            .insert(to);
        self
    }

    ///
    /// Construct the automaton
    ///
    /// # Errors
    ///
    /// [Error::MissingStartState] if no start state was chosen.
    ///
    pub fn build(self) -> Result<Enfa, Error> {
        let start = self.start.ok_or(Error::MissingStartState)?;
        Ok(Enfa {
            states: self.states,
            start,
            finals: self.finals,
            trans: self.trans,
        })
    }

    ///
    /// Construct the automaton without checking
    ///
    /// # Panics
    ///
    /// If no start state was chosen.
    ///
    pub fn build_unchecked(self) -> Enfa {
        let start = self.start.unwrap();
        Enfa {
            states: self.states,
            start,
            finals: self.finals,
            trans: self.trans,
        }
    }
}
