// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

pub const DEFAULT_TAG_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub group: Option<TagGroup>,
}

impl Tag {
    pub fn ungrouped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
        }
    }

    pub fn grouped(
        name: impl Into<String>,
        group_name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group: Some(TagGroup {
                name: group_name.into(),
                color: color.into(),
            }),
        }
    }

    /// Display color for the tag's label.
    ///
    /// The black fallback applies only when the group is absent. An empty
    /// color string on a present group is passed through unchanged.
    pub fn display_color(&self) -> &str {
        match &self.group {
            Some(group) => &group.color,
            None => DEFAULT_TAG_COLOR,
        }
    }
}

/// Read contract for the tag catalog backing a widget.
///
/// Implementations return every known tag ordered by group. The widget
/// performs a single read per render and never mutates the catalog.
pub trait TagCatalog: Send + Sync {
    fn list_tags(&self) -> Vec<Tag>;
}

#[derive(Debug)]
pub struct CatalogError {
    message: String,
}

impl CatalogError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CatalogError {}

/// Catalog over an owned list of tags.
#[derive(Debug, Clone)]
pub struct InMemoryTagCatalog {
    tags: Vec<Tag>,
}

impl InMemoryTagCatalog {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }
}

impl TagCatalog for InMemoryTagCatalog {
    fn list_tags(&self) -> Vec<Tag> {
        let mut tags = self.tags.clone();
        sort_by_group(&mut tags);
        tags
    }
}

/// Catalog loaded once from a YAML tag file.
///
/// A missing or empty file degrades to an empty catalog so a fresh install
/// renders a bare widget instead of failing.
#[derive(Debug, Clone)]
pub struct YamlTagCatalog {
    tags: Vec<Tag>,
}

impl YamlTagCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            warn!(
                "Tag catalog file {} not found, starting with an empty catalog",
                path.display()
            );
            return Ok(Self { tags: Vec::new() });
        }
        let content = fs::read_to_string(path)
            .map_err(|err| CatalogError::new(format!("Failed to read tag catalog file: {}", err)))?;
        if content.trim().is_empty() {
            return Ok(Self { tags: Vec::new() });
        }
        let tags: Vec<Tag> = serde_yaml::from_str(&content)
            .map_err(|err| CatalogError::new(format!("Failed to parse tag catalog file: {}", err)))?;
        Ok(Self { tags })
    }
}

impl TagCatalog for YamlTagCatalog {
    fn list_tags(&self) -> Vec<Tag> {
        let mut tags = self.tags.clone();
        sort_by_group(&mut tags);
        tags
    }
}

// Ungrouped tags sort first; ties keep insertion order.
fn sort_by_group(tags: &mut [Tag]) {
    tags.sort_by(|left, right| group_key(left).cmp(&group_key(right)));
}

fn group_key(tag: &Tag) -> Option<&str> {
    tag.group.as_ref().map(|group| group.name.as_str())
}
