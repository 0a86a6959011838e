// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod catalog;
pub mod markup;
pub mod tagstring;
pub mod widget;

// Re-export commonly used items for convenience
pub use catalog::{
    CatalogError, DEFAULT_TAG_COLOR, InMemoryTagCatalog, Tag, TagCatalog, TagGroup, YamlTagCatalog,
};
pub use markup::TrustedHtml;
pub use widget::{
    FieldValue, LABEL_WIDGET_CSS, LABEL_WIDGET_JS, LabelWidget, SelectionState, TagLabel,
    TagRelation, TextInput, WidgetMedia,
};
