// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2023, 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible,
    non_camel_case_types,
    unused_parens,
    non_upper_case_globals,
    unused_qualifications,
    unused_results,
    unused_imports,
    unused_variables,
    bare_trait_objects,
    ellipsis_inclusive_range_patterns,
    elided_lifetimes_in_paths
)]
#![warn(clippy::explicit_into_iter_loop)]

//! L-system expansion and turtle interpretation.
//!
//! An axiom is rewritten by a set of production rules for a number of iterations
//! ([`grammar`]), and the resulting symbol string is walked by a 2D or 3D turtle
//! ([`turtle`]) that emits line segments. The 3D path additionally reduces its segments to a
//! vertex/edge [`mesh::Mesh`] that can be written as wavefront `v`/`l` lines.
//!
//! Design guideline: every operation is stateless, everything needed for a run is passed in
//! as parameters and everything produced is handed back to the caller. Rendering, animation
//! and command line handling are left to the caller.

pub mod command;
pub mod grammar;
pub mod mesh;
pub mod turtle;
pub mod utils;

pub mod prelude {
    pub use crate::{
        LSystemError,
        command::{
            CommandResult, FinalModel, GrowthFrame, LSystemDefinition, final_3d, growth_2d,
            process_batch, process_command,
        },
        grammar::{ExpansionLimits, Rules, expand, expand_lazy},
        mesh::Mesh,
        turtle::{
            OrientationModel, Segment2D, Segment3D, interpret_2d, interpret_3d, interpret_3d_with,
        },
    };
}

#[derive(thiserror::Error, Debug)]
pub enum LSystemError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(
        "Stack underflow: ']' at symbol index {index} has no matching '['{}",
        describe_iteration(.iteration)
    )]
    StackUnderflow {
        /// 0-based position of the offending `]` in the interpreted string
        index: usize,
        /// the expansion depth, when known
        iteration: Option<u32>,
    },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Overflow error: {0}")]
    Overflow(String),

    #[error("Invalid float value: {0}")]
    FloatNotFinite(String),

    #[error("Invalid input data: {0}")]
    InvalidParameter(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Could not parse L-Systems: {0}")]
    ParseError(String),
}

fn describe_iteration(iteration: &Option<u32>) -> String {
    match iteration {
        Some(iteration) => format!(" (iteration {iteration})"),
        None => String::new(),
    }
}

impl LSystemError {
    /// Attach the expansion depth to a stack underflow, other errors pass through untouched.
    pub fn at_iteration(self, depth: u32) -> Self {
        match self {
            Self::StackUnderflow { index, .. } => Self::StackUnderflow {
                index,
                iteration: Some(depth),
            },
            other => other,
        }
    }
}
