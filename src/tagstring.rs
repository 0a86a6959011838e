// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::catalog::Tag;

/// Serialize tags into the canonical comma-separated edit string.
///
/// Names containing a comma or a space are wrapped in double quotes. The
/// names are sorted so equal tag sets always produce the same string.
pub fn edit_string_for_tags(tags: &[Tag]) -> String {
    let mut names: Vec<String> = tags
        .iter()
        .map(|tag| {
            if tag.name.contains(',') || tag.name.contains(' ') {
                format!("\"{}\"", tag.name)
            } else {
                tag.name.clone()
            }
        })
        .collect();
    names.sort();
    names.join(", ")
}

/// Recover tag names from a submitted edit string.
///
/// Tokens that are empty before trimming are dropped; the rest lose their
/// surrounding spaces and double quotes.
pub fn parse_tag_input(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|token| !token.is_empty())
        .map(|token| token.trim_matches([' ', '"']).to_string())
        .collect()
}
