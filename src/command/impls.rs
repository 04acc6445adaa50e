// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2023, 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

//! [`Options`] for the plain string map used as job configuration.

use crate::{LSystemError, command::Options};
use std::{collections::HashMap, str::FromStr};

/// Parses a (trimmed) configuration value, naming the key in the error
fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, LSystemError> {
    value.trim().parse().map_err(|_| {
        LSystemError::InvalidParameter(format!("Invalid value for parameter \"{key}\": \"{value}\""))
    })
}

impl Options for HashMap<String, String> {
    fn get_mandatory_parsed_option<T: FromStr>(
        &self,
        key: &str,
        default: Option<T>,
    ) -> Result<T, LSystemError> {
        match (self.get_parsed_option(key)?, default) {
            (Some(value), _) | (None, Some(value)) => Ok(value),
            (None, None) => Err(LSystemError::MissingParameter(format!(
                "The mandatory parameter \"{key}\" was missing"
            ))),
        }
    }

    fn get_parsed_option<T: FromStr>(&self, key: &str) -> Result<Option<T>, LSystemError> {
        self.get(key).map(|value| parse_value(key, value)).transpose()
    }

    fn get_mandatory_option(&self, key: &str) -> Result<&str, LSystemError> {
        self.get(key).map(String::as_str).ok_or_else(|| {
            LSystemError::MissingParameter(format!("The parameter \"{key}\" was missing"))
        })
    }

    fn does_option_exist(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}
