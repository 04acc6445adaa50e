// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

//! Rewriting of an axiom by a set of production rules.
//!
//! The grammar is open: any symbol without a rule rewrites to itself. Every symbol of a
//! generation is rewritten independently, symbols produced during a step are not rewritten
//! again in the same step.


use crate::LSystemError;
use rustc_hash::FxHashMap;
use std::{
    str::Chars,
    time::{Duration, Instant},
};

/// What a single symbol turns into during one rewriting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production<'a> {
    /// the symbol has a rule
    Rewrite(&'a str),
    /// no rule, the symbol is its own replacement
    Identity(char),
}

/// The production rules of an L-system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules {
    rules: FxHashMap<char, String>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder variant of [`Rules::insert`]
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        let _ = self.insert(symbol, replacement);
        self
    }

    /// Adds or replaces a rule, returns the replacement that was previously registered
    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) -> Option<String> {
        self.rules.insert(symbol, replacement.into())
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.rules.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule for `symbol`, with the identity rule as the total default.
    #[inline]
    pub fn production(&self, symbol: char) -> Production<'_> {
        match self.rules.get(&symbol) {
            Some(replacement) => Production::Rewrite(replacement),
            None => Production::Identity(symbol),
        }
    }

    /// Rewrites every symbol of `current` once, appending the result to `next`.
    fn rewrite_into(&self, current: &str, next: &mut String) {
        for symbol in current.chars() {
            match self.production(symbol) {
                Production::Rewrite(replacement) => next.push_str(replacement),
                Production::Identity(symbol) => next.push(symbol),
            }
        }
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for Rules {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

/// Guards against run-away grammars, the string length grows geometrically for most rule sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Abort the expansion once this much wall clock time has been spent
    pub timeout: Option<Duration>,
    /// Abort the expansion if a generation would hold more symbols than this
    pub max_symbols: Option<usize>,
}

impl ExpansionLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_symbols(mut self, max_symbols: usize) -> Self {
        self.max_symbols = Some(max_symbols);
        self
    }
}

/// Expands the rules over the axiom `iterations` times.
///
/// `iterations == 0` returns the axiom unchanged.
/// ```
/// use lsystem_turtle::grammar::{Rules, expand};
/// let rules = Rules::new().with_rule('A', "AB").with_rule('B', "A");
/// assert_eq!(expand("A", &rules, 5), "ABAABABAABAAB");
/// ```
pub fn expand(axiom: &str, rules: &Rules, iterations: u32) -> String {
    let mut current = axiom.to_string();
    for _ in 0..iterations {
        let mut next = String::with_capacity(current.len() * 2);
        rules.rewrite_into(&current, &mut next);
        current = next;
    }
    current
}

/// Same as [`expand`] but gives up with an error when one of the `limits` is exceeded.
pub fn expand_with_limits(
    axiom: &str,
    rules: &Rules,
    iterations: u32,
    limits: &ExpansionLimits,
) -> Result<String, LSystemError> {
    let start_time = Instant::now();
    let mut current = axiom.to_string();
    for i in 0..iterations {
        if let Some(timeout) = limits.timeout {
            if start_time.elapsed() >= timeout {
                return Err(LSystemError::Timeout(format!(
                    "gave up after {:?} while expanding iteration {}/{}",
                    timeout,
                    i + 1,
                    iterations
                )));
            }
        }
        if let Some(max_symbols) = limits.max_symbols {
            // count symbol by symbol so a too large generation is never allocated
            let next_len = current
                .chars()
                .map(|symbol| match rules.production(symbol) {
                    Production::Rewrite(replacement) => replacement.chars().count(),
                    Production::Identity(_) => 1,
                })
                .try_fold(0_usize, |acc, n| {
                    acc.checked_add(n).filter(|sum| *sum <= max_symbols)
                });
            if next_len.is_none() {
                return Err(LSystemError::Overflow(format!(
                    "iteration {}/{} would produce more than {} symbols",
                    i + 1,
                    iterations,
                    max_symbols
                )));
            }
        }
        let mut next = String::with_capacity(current.len() * 2);
        rules.rewrite_into(&current, &mut next);
        current = next;
    }
    tracing::debug!(
        "expanded {} iterations into {} symbols in {:?}",
        iterations,
        current.len(),
        start_time.elapsed()
    );
    Ok(current)
}

/// Streams the symbols of generation `iterations` without building the intermediate
/// generations. The order of the produced symbols is identical to [`expand`].
///
/// ```
/// use lsystem_turtle::grammar::{Rules, expand, expand_lazy};
/// let rules = Rules::new().with_rule('F', "F+F-F-F+F");
/// let lazy: String = expand_lazy("F", &rules, 3).collect();
/// assert_eq!(lazy, expand("F", &rules, 3));
/// ```
pub fn expand_lazy<'a>(axiom: &'a str, rules: &'a Rules, iterations: u32) -> Expansion<'a> {
    Expansion {
        rules,
        stack: vec![(axiom.chars(), iterations)],
    }
}

/// Depth first iterator over the symbols of one generation, see [`expand_lazy`].
///
/// Memory use is bounded by the iteration count, not by the length of the output.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    rules: &'a Rules,
    /// pending symbols, and how many rewriting steps they still have to go through
    stack: Vec<(Chars<'a>, u32)>,
}

impl Iterator for Expansion<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let rules = self.rules;
        loop {
            let (chars, remaining) = self.stack.last_mut()?;
            let remaining = *remaining;
            let Some(symbol) = chars.next() else {
                let _ = self.stack.pop();
                continue;
            };
            if remaining == 0 {
                return Some(symbol);
            }
            match rules.production(symbol) {
                Production::Rewrite(replacement) => {
                    self.stack.push((replacement.chars(), remaining - 1))
                }
                // an identity rewrite stays the same symbol at every depth
                Production::Identity(symbol) => return Some(symbol),
            }
        }
    }
}
