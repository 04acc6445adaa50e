// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2023, 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

//! The `<identifier>_iteration_<N>.<ext>` naming convention shared with whatever renders and
//! animates the per-iteration output.


use itertools::Itertools;

const ITERATION_MARKER: &str = "_iteration_";

/// The file stem of one iteration, `<identifier>_iteration_<N>`
pub fn iteration_file_stem(identifier: &str, iteration: u32) -> String {
    format!("{identifier}{ITERATION_MARKER}{iteration}")
}

/// The full file name of one iteration, `<identifier>_iteration_<N>.<extension>`
pub fn iteration_file_name(identifier: &str, iteration: u32, extension: &str) -> String {
    format!(
        "{}.{}",
        iteration_file_stem(identifier, iteration),
        extension.trim_start_matches('.')
    )
}

/// Extracts `N` from a `<identifier>_iteration_<N>.<extension>` file name.
///
/// Returns None if the name belongs to another identifier, has another extension or
/// does not carry an iteration number.
pub fn parse_iteration_number(identifier: &str, extension: &str, file_name: &str) -> Option<u32> {
    let extension = extension.trim_start_matches('.');
    file_name
        .strip_prefix(identifier)?
        .strip_prefix(ITERATION_MARKER)?
        .strip_suffix(extension)?
        .strip_suffix('.')?
        .parse()
        .ok()
}

/// Keeps the file names of `identifier` and sorts them by their iteration number, ascending.
pub fn order_iteration_files<'a, I>(identifier: &str, extension: &str, file_names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    file_names
        .into_iter()
        .filter_map(|name| parse_iteration_number(identifier, extension, name).map(|n| (n, name)))
        .sorted_by_key(|(n, _)| *n)
        .map(|(_, name)| name)
        .collect()
}
