// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2023, 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

//! Drivers that combine expansion and interpretation.
//!
//! Two ways of running a definition are offered: [`growth_2d`] interprets every depth from 0
//! to N (one frame per depth, for animating growth) and [`final_3d`] only interprets depth N.
//! [`process_command`] runs either of them from a string keyed configuration, and
//! [`process_batch`] runs independent configurations in parallel.

mod impls;
mod script;
#[cfg(test)]
mod tests;

use crate::{
    LSystemError,
    grammar::{ExpansionLimits, Rules, expand_with_limits},
    mesh::Mesh,
    turtle::{OrientationModel, Segment2D, Segment3D, interpret_2d, interpret_3d_with},
    utils::iteration_file_stem,
};
use rayon::prelude::*;
pub use script::{parse_definition, trim_lsystem_string};
use std::{collections::HashMap, time::Instant};

/// The key holding the L-system script, see [`parse_definition`]
pub const TURTLE_SCRIPT_TAG: &str = "🐢";
/// The key selecting the driver, `"lsystem_2d"` or `"lsystem_3d"`
pub const COMMAND_TAG: &str = "command";
/// The key holding the identifier used for the output file stems
pub const IDENTIFIER_TAG: &str = "identifier";
/// The key selecting the 3D [`OrientationModel`], `"frame"` or `"euler"`
pub const ORIENTATION_TAG: &str = "orientation";
/// Optional key overriding the iteration count of the script
pub const ITERATIONS_TAG: &str = "iterations";

const DEFAULT_IDENTIFIER: &str = "lsystem";

pub trait Options {
    /// Will return an option parsed as a `T` or an Err
    fn get_mandatory_parsed_option<T: std::str::FromStr>(
        &self,
        key: &str,
        default: Option<T>,
    ) -> Result<T, LSystemError>;

    /// Will return an option parsed as a `T` or None.
    /// If the option is missing None is returned, if it there but if it can't be parsed an error
    /// will be returned.
    fn get_parsed_option<T: std::str::FromStr>(&self, key: &str)
    -> Result<Option<T>, LSystemError>;

    /// Returns the &str value of an option, or an Err is it does not exists
    fn get_mandatory_option(&self, key: &str) -> Result<&str, LSystemError>;

    /// Returns true if the option exists
    fn does_option_exist(&self, key: &str) -> bool;
}

pub type ConfigType = HashMap<String, String>;

/// Everything needed to run an L-system
#[derive(Debug, Clone, PartialEq)]
pub struct LSystemDefinition {
    pub axiom: String,
    pub rules: Rules,
    /// turning angle in degrees
    pub angle: f64,
    pub iterations: u32,
    pub limits: ExpansionLimits,
}

impl LSystemDefinition {
    pub fn new(axiom: impl Into<String>, rules: Rules, angle: f64, iterations: u32) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
            angle,
            iterations,
            limits: ExpansionLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ExpansionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// the limits left for a run that started at `start_time`
    fn remaining_limits(&self, start_time: Instant) -> ExpansionLimits {
        ExpansionLimits {
            timeout: self
                .limits
                .timeout
                .map(|timeout| timeout.saturating_sub(start_time.elapsed())),
            max_symbols: self.limits.max_symbols,
        }
    }
}

/// The 2D interpretation of one expansion depth
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthFrame {
    pub iteration: u32,
    /// `<identifier>_iteration_<N>`
    pub file_stem: String,
    /// length of the interpreted string
    pub symbol_count: usize,
    pub segments: Vec<Segment2D>,
}

/// The 3D interpretation of the final expansion depth
#[derive(Debug, Clone, PartialEq)]
pub struct FinalModel {
    pub iteration: u32,
    /// `<identifier>_iteration_<N>`
    pub file_stem: String,
    pub segments: Vec<Segment3D>,
    pub mesh: Mesh,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Growth2D(Vec<GrowthFrame>),
    Model3D(FinalModel),
}

/// Interprets every expansion depth `0..=iterations` in 2D.
///
/// Each depth is derived from the previous one, so the whole run costs one expansion.
/// A stack underflow is reported with the depth it happened at.
pub fn growth_2d(
    definition: &LSystemDefinition,
    identifier: &str,
) -> Result<Vec<GrowthFrame>, LSystemError> {
    let start_time = Instant::now();
    let mut frames = Vec::with_capacity((definition.iterations as usize).min(64) + 1);
    let mut current = definition.axiom.clone();
    for iteration in 0..=definition.iterations {
        if iteration > 0 {
            current = expand_with_limits(
                &current,
                &definition.rules,
                1,
                &definition.remaining_limits(start_time),
            )?;
        }
        let segments = interpret_2d(&current, definition.angle)
            .map_err(|err| err.at_iteration(iteration))?;
        tracing::debug!(
            "{} iteration {}: {} symbols, {} segments",
            identifier,
            iteration,
            current.chars().count(),
            segments.len()
        );
        frames.push(GrowthFrame {
            iteration,
            file_stem: iteration_file_stem(identifier, iteration),
            symbol_count: current.chars().count(),
            segments,
        });
    }
    Ok(frames)
}

/// Expands `definition.iterations` times and interprets the result once in 3D.
pub fn final_3d(
    definition: &LSystemDefinition,
    identifier: &str,
    model: OrientationModel,
) -> Result<FinalModel, LSystemError> {
    let iteration = definition.iterations;
    let symbols = expand_with_limits(
        &definition.axiom,
        &definition.rules,
        iteration,
        &definition.limits,
    )?;
    let (segments, mesh) = interpret_3d_with(&symbols, definition.angle, model)
        .map_err(|err| err.at_iteration(iteration))?;
    tracing::debug!(
        "{} iteration {}: {} segments, {} vertices",
        identifier,
        iteration,
        segments.len(),
        mesh.vertices.len()
    );
    Ok(FinalModel {
        iteration,
        file_stem: iteration_file_stem(identifier, iteration),
        segments,
        mesh,
    })
}

/// Runs one job described by a string keyed configuration.
///
/// Recognized keys: [`COMMAND_TAG`] (mandatory), [`TURTLE_SCRIPT_TAG`] (mandatory),
/// [`IDENTIFIER_TAG`], [`ORIENTATION_TAG`] and [`ITERATIONS_TAG`].
pub fn process_command(config: &ConfigType) -> Result<CommandResult, LSystemError> {
    let now = Instant::now();
    let command = config.get_mandatory_option(COMMAND_TAG)?;
    let mut definition = {
        let script = config.get_mandatory_option(TURTLE_SCRIPT_TAG)?;
        parse_definition(&trim_lsystem_string(script))?
    };
    if let Some(iterations) = config.get_parsed_option::<u32>(ITERATIONS_TAG)? {
        definition.iterations = iterations;
    }
    let identifier = if config.does_option_exist(IDENTIFIER_TAG) {
        config.get_mandatory_option(IDENTIFIER_TAG)?
    } else {
        DEFAULT_IDENTIFIER
    };

    let rv = match command {
        "lsystem_2d" => CommandResult::Growth2D(growth_2d(&definition, identifier)?),
        "lsystem_3d" => {
            let model = config.get_mandatory_parsed_option::<OrientationModel>(
                ORIENTATION_TAG,
                Some(OrientationModel::default()),
            )?;
            CommandResult::Model3D(final_3d(&definition, identifier, model)?)
        }
        illegal_command => Err(LSystemError::InvalidParameter(format!(
            "Invalid command:{illegal_command}"
        )))?,
    };
    tracing::debug!("{} {} duration: {:?}", command, identifier, now.elapsed());
    Ok(rv)
}

/// Runs independent jobs in parallel, the results are returned in the order of `configs`.
pub fn process_batch(configs: &[ConfigType]) -> Vec<Result<CommandResult, LSystemError>> {
    configs
        .par_iter()
        .map(|config| {
            let rv = process_command(config);
            if let Err(err) = &rv {
                tracing::warn!("job {:?} failed: {}", config.get(IDENTIFIER_TAG), err);
            }
            rv
        })
        .collect()
}
