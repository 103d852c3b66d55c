// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Regular expressions
//!
//! This module defines the abstract syntax of regular expressions ([Regex])
//! and a parser for the textual form. The connectives are union `|`,
//! concatenation by juxtaposition, Kleene star `*`, and grouping with
//! parentheses; any other character is a literal symbol. An empty
//! alternative, as in `(|a)` or the empty pattern, denotes the empty
//! string.
//!
//! Regular expressions compile to epsilon-NFAs with
//! [thompson::compile](crate::thompson::compile).
//!

use std::fmt::Display;
use std::iter::Peekable;
use std::str::Chars;

use crate::enfa::{symbol_char, Symbol};
use crate::errors::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
///
/// Abstract syntax for regular expressions
///
pub enum Regex {
    /// The language that contains only the empty string
    Epsilon,

    /// Words of length one: a single symbol
    Literal(Symbol),

    /// Concatenation of two languages
    Concat(Box<Regex>, Box<Regex>),

    /// Union of two languages
    Union(Box<Regex>, Box<Regex>),

    /// Zero or more repetitions of a language
    Star(Box<Regex>),
}

fn is_meta(c: char) -> bool {
    matches!(c, '(' | ')' | '|' | '*')
}

impl Regex {
    ///
    /// Parse the textual form of a regular expression
    ///
    /// # Errors
    ///
    /// - [Error::UnexpectedChar] for a `*` with nothing in front of it
    /// - [Error::UnbalancedParenthesis] for an unmatched `(` or `)`
    /// - [Error::UnexpectedEnd] for a pattern that ends inside a group
    ///
    /// # Example
    ///
    /// ```
    /// use regex_fsm::regular_expressions::Regex;
    ///
    /// let re = Regex::parse("(a|b)*c").unwrap();
    /// assert_eq!(re.to_string(), "(a|b)*c");
    ///
    /// assert!(Regex::parse("(a").is_err());
    /// ```
    pub fn parse(pattern: &str) -> Result<Regex, Error> {
        let mut parser = Parser {
            chars: pattern.chars().peekable(),
        };
        let e = parser.union()?;
        match parser.chars.next() {
            None => Ok(e),
            Some(')') => Err(Error::UnbalancedParenthesis),
            Some(c) => Err(Error::UnexpectedChar(c)),
        }
    }
}

// Recursive descent over the grammar
//   union  := concat ('|' concat)*
//   concat := postfix*         (empty concatenation is epsilon)
//   postfix := atom '*'*
//   atom   := literal | '(' union ')'
#[derive(Debug)]
struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn union(&mut self) -> Result<Regex, Error> {
        let mut e = self.concat()?;
        while let Some('|') = self.chars.peek() {
            self.chars.next();
            let r = self.concat()?;
            e = Regex::Union(Box::new(e), Box::new(r));
        }
        Ok(e)
    }

    fn concat(&mut self) -> Result<Regex, Error> {
        let mut e: Option<Regex> = None;
        loop {
            match self.chars.peek() {
                None | Some('|') | Some(')') => break,
                Some(_) => {
                    let f = self.postfix()?;
                    e = Some(match e {
                        None => f,
                        Some(e) => Regex::Concat(Box::new(e), Box::new(f)),
                    });
                }
            }
        }
        Ok(e.unwrap_or(Regex::Epsilon))
    }

    fn postfix(&mut self) -> Result<Regex, Error> {
        let mut e = self.atom()?;
        while let Some('*') = self.chars.peek() {
            self.chars.next();
            e = Regex::Star(Box::new(e));
        }
        Ok(e)
    }

    fn atom(&mut self) -> Result<Regex, Error> {
        match self.chars.next() {
            Some('(') => {
                let e = self.union()?;
                match self.chars.next() {
                    Some(')') => Ok(e),
                    Some(c) => Err(Error::UnexpectedChar(c)),
                    None => Err(Error::UnbalancedParenthesis),
                }
            }
            Some(c) if !is_meta(c) => Ok(Regex::Literal(u32::from(c))),
            Some(c) => Err(Error::UnexpectedChar(c)),
            None => Err(Error::UnexpectedEnd),
        }
    }
}

impl Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // write either e or '(e)' when e is a sub-expression that binds
        // looser than its context
        fn write_sub(f: &mut std::fmt::Formatter<'_>, e: &Regex) -> std::fmt::Result {
            match e {
                Regex::Union(..) | Regex::Concat(..) => write!(f, "({e})"),
                _ => write!(f, "{e}"),
            }
        }

        match self {
            Regex::Epsilon => write!(f, "()"),
            Regex::Literal(c) => write!(f, "{}", symbol_char(*c)),
            Regex::Concat(l, r) => {
                // concatenation chains print without parentheses
                match l.as_ref() {
                    Regex::Concat(..) => write!(f, "{l}")?,
                    _ => write_sub(f, l)?,
                }
                write_sub(f, r)
            }
            Regex::Union(l, r) => {
                match l.as_ref() {
                    Regex::Union(..) => write!(f, "{l}")?,
                    _ => write_sub(f, l)?,
                }
                write!(f, "|")?;
                write_sub(f, r)
            }
            Regex::Star(e) => {
                write_sub(f, e)?;
                write!(f, "*")
            }
        }
    }
}
