// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Compilation of regular expressions to finite-state automata
//!
//! # Overview
//!
//! This crate compiles a textual regular expression into three automaton
//! forms, produced in sequence: an epsilon-NFA built by Thompson's
//! construction, a DFA obtained by the subset construction, and a minimal
//! DFA obtained by equivalence refinement. Each form can be simulated
//! against input words, and all three accept the same language.
//!
//! The [regular_expressions](crate::regular_expressions) module defines the
//! abstract syntax of regular expressions and a parser for the textual
//! form. [thompson](crate::thompson) turns a syntax tree into an
//! epsilon-NFA. [enfa](crate::enfa) defines the epsilon-NFA value type
//! together with alphabet extraction, epsilon-closure tables, and
//! nondeterministic simulation. [subset](crate::subset) determinizes an
//! epsilon-NFA. [minimizer](crate::minimizer) collapses indistinguishable
//! DFA states. [dfa](crate::dfa) defines the DFA value type and
//! deterministic simulation.
//!
//! # Example
//!
//! ```
//! use regex_fsm::minimizer::minimize;
//! use regex_fsm::regular_expressions::Regex;
//! use regex_fsm::subset::subset;
//! use regex_fsm::thompson;
//!
//! let re = Regex::parse("(a*b)").unwrap();
//! let enfa = thompson::compile(&re);
//! let dfa = subset(&enfa);
//! let min = minimize(&dfa);
//!
//! let word: Vec<u32> = "aaab".chars().map(u32::from).collect();
//! assert!(enfa.accepts(&word));
//! assert!(dfa.accepts(&word));
//! assert!(min.accepts(&word));
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod dfa;
pub mod enfa;
pub mod errors;
pub mod minimizer;
pub mod regular_expressions;
pub mod subset;
pub mod thompson;

mod bfs_queues;
