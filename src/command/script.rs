// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

//! A tiny text format for L-system definitions:
//! ```text
//! axiom("F")
//! rule("F", "F[+F]F[-F]F")   # comments run to the end of the line
//! angle(25)
//! iterations(3)
//! timeout(10)                # seconds, optional
//! max_symbols(1000000)       # optional
//! ```
//! Spaces inside quoted strings are removed.

use super::LSystemDefinition;
use crate::{
    LSystemError,
    grammar::{ExpansionLimits, Rules},
};
use logos::Logos;
use std::time::Duration;

/// remove empty space and comments
pub fn trim_lsystem_string(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for line in input.lines() {
        // Remove comments (everything after #)
        let line_without_comments = line.split('#').next().unwrap_or("").trim();

        // Skip empty lines
        if line_without_comments.is_empty() {
            continue;
        }

        result.push_str(line_without_comments);
        result.push('\n');
    }

    result
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\f\r(),;]+")]
enum ParseToken {
    #[regex("\\.?axiom")]
    Axiom,

    #[regex("\\.?rule")]
    Rule,

    #[regex("\\.?angle")]
    Angle,

    #[regex("\\.?iterations")]
    Iterations,

    #[regex("\\.?timeout")]
    Timeout,

    #[regex("\\.?max_symbols")]
    MaxSymbols,

    #[token("\n")]
    Eol,

    #[regex("-?[0-9]+(\\.[0-9]+)?")]
    Number,

    #[regex(r#""[^"\n]*""#)]
    QuotedText,
}

#[derive(Debug, PartialEq)]
enum ParseState {
    Start,
    Axiom,
    Rule(Option<char>),
    Angle,
    Iterations,
    Timeout,
    MaxSymbols,
}

/// Parses a script (see the module documentation) into a [`LSystemDefinition`].
///
/// `axiom` and `angle` are mandatory, `iterations` defaults to 0.
pub fn parse_definition(script: &str) -> Result<LSystemDefinition, LSystemError> {
    let mut axiom: Option<String> = None;
    let mut angle: Option<f64> = None;
    let mut iterations = 0_u32;
    let mut rules = Rules::new();
    let mut limits = ExpansionLimits::default();

    let mut lex = ParseToken::lexer(script);
    let mut state = ParseState::Start;
    let mut line = 1_u32;

    while let Some(token) = lex.next() {
        let token = token.map_err(|_| {
            LSystemError::ParseError(format!(
                "Unexpected text '{}' at line {}",
                lex.slice(),
                line
            ))
        })?;
        match token {
            ParseToken::Axiom
            | ParseToken::Rule
            | ParseToken::Angle
            | ParseToken::Iterations
            | ParseToken::Timeout
            | ParseToken::MaxSymbols => {
                if state != ParseState::Start {
                    return Err(LSystemError::ParseError(format!(
                        "Expected to be in Start state, was in state:{:?} when reading:{} at line {}.",
                        state,
                        lex.slice(),
                        line
                    )));
                }
                state = match token {
                    ParseToken::Axiom => ParseState::Axiom,
                    ParseToken::Rule => ParseState::Rule(None),
                    ParseToken::Angle => ParseState::Angle,
                    ParseToken::Iterations => ParseState::Iterations,
                    ParseToken::Timeout => ParseState::Timeout,
                    _ => ParseState::MaxSymbols,
                };
            }
            ParseToken::QuotedText => {
                let slice = lex.slice();
                let text: String = slice[1..slice.len() - 1]
                    .chars()
                    .filter(|c| *c != ' ')
                    .collect();
                match state {
                    ParseState::Axiom => {
                        if axiom.is_some() {
                            return Err(LSystemError::ParseError(format!(
                                "already contains an axiom, got {text} at line {line}"
                            )));
                        }
                        tracing::trace!("Got axiom(\"{}\")", text);
                        axiom = Some(text);
                        state = ParseState::Start;
                    }
                    ParseState::Rule(None) => {
                        let mut chars = text.chars();
                        let rule_id = match (chars.next(), chars.next()) {
                            (Some(rule_id), None) => rule_id,
                            _ => {
                                return Err(LSystemError::ParseError(format!(
                                    "Rule id must be one single char, got '{text}' at line {line}"
                                )));
                            }
                        };
                        state = ParseState::Rule(Some(rule_id));
                    }
                    ParseState::Rule(Some(rule_id)) => {
                        if text.is_empty() {
                            return Err(LSystemError::ParseError(format!(
                                "Rule too short {rule_id} at line {line}"
                            )));
                        }
                        tracing::trace!("Got rule('{}', \"{}\")", rule_id, text);
                        if rules.insert(rule_id, text).is_some() {
                            return Err(LSystemError::ParseError(format!(
                                "Rule {rule_id} overwriting previous rule at line {line}"
                            )));
                        }
                        state = ParseState::Start;
                    }
                    _ => {
                        return Err(LSystemError::ParseError(format!(
                            "Bad state for QuotedText:{state:?} at line {line}"
                        )));
                    }
                }
            }
            ParseToken::Number => {
                let value = lex.slice().parse::<f64>().map_err(|e| {
                    LSystemError::ParseError(format!(
                        "Could not parse number :{} at line {}. {:?}",
                        lex.slice(),
                        line,
                        e
                    ))
                })?;
                match state {
                    ParseState::Angle => {
                        if !value.is_finite() {
                            return Err(LSystemError::ParseError(format!(
                                "angle must be a finite number, got {} at line {line}",
                                lex.slice()
                            )));
                        }
                        angle = Some(value)
                    }
                    ParseState::Iterations => iterations = whole_number(value, line)?,
                    ParseState::MaxSymbols => {
                        limits.max_symbols = Some(whole_number(value, line)? as usize)
                    }
                    ParseState::Timeout => {
                        let timeout = Duration::try_from_secs_f64(value).map_err(|e| {
                            LSystemError::ParseError(format!(
                                "Invalid timeout {} at line {line}: {e}",
                                lex.slice()
                            ))
                        })?;
                        limits.timeout = Some(timeout);
                    }
                    _ => {
                        return Err(LSystemError::ParseError(format!(
                            "Bad state for Number:{state:?} at line {line}"
                        )));
                    }
                }
                state = ParseState::Start;
            }
            ParseToken::Eol => {
                if state != ParseState::Start {
                    return Err(LSystemError::ParseError(format!(
                        "Incomplete statement, state:{state:?} at line {line}"
                    )));
                }
                line += 1;
            }
        }
    }
    if state != ParseState::Start {
        return Err(LSystemError::ParseError(format!(
            "Incomplete statement at end of input, state:{state:?}"
        )));
    }

    let axiom =
        axiom.ok_or_else(|| LSystemError::MissingParameter("The axiom was missing".to_string()))?;
    let angle =
        angle.ok_or_else(|| LSystemError::MissingParameter("The angle was missing".to_string()))?;
    Ok(LSystemDefinition {
        axiom,
        rules,
        angle,
        iterations,
        limits,
    })
}

/// a non-negative integer that fits in an u32
fn whole_number(value: f64, line: u32) -> Result<u32, LSystemError> {
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(LSystemError::ParseError(format!(
            "Expected a non-negative whole number, got {value} at line {line}"
        )));
    }
    Ok(value as u32)
}
