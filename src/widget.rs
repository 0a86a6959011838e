// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::catalog::{Tag, TagCatalog};
use crate::markup::{TrustedHtml, flat_attrs, html_escape};
use crate::tagstring::{edit_string_for_tags, parse_tag_input};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const LABEL_WIDGET_CSS: &str = "/builtin/taglabels/taglabels.css";
pub const LABEL_WIDGET_JS: &str = "/builtin/taglabels/taglabels.js";

const DEFAULT_LIST_CLASS: &str = "tags";

/// Front-end assets a page embedding the widget must include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetMedia {
    pub css: &'static [&'static str],
    pub js: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Selected,
    Unselected,
}

impl SelectionState {
    pub fn css_class(self) -> &'static str {
        match self {
            SelectionState::Selected => "selected",
            SelectionState::Unselected => "n",
        }
    }
}

/// One catalog tag annotated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLabel {
    pub name: String,
    pub state: SelectionState,
    pub color: String,
}

/// A persisted tag relation, as handed over by the host's storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRelation {
    pub tag: Tag,
}

impl TagRelation {
    pub fn new(tag: Tag) -> Self {
        Self { tag }
    }
}

/// The three shapes a field value can arrive in at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// New or empty form.
    Absent,
    /// Submitted but not yet saved, e.g. an invalid form round trip.
    Submitted(String),
    /// Relations loaded from saved tags.
    Saved(Vec<TagRelation>),
}

/// Base text input rendered with a fixed input type.
#[derive(Debug, Clone)]
pub struct TextInput {
    input_type: &'static str,
}

impl TextInput {
    pub fn hidden() -> Self {
        Self {
            input_type: "hidden",
        }
    }

    pub fn render(&self, name: &str, value: &str, attrs: &BTreeMap<String, String>) -> String {
        format!(
            "<input type=\"{}\" name=\"{}\" value=\"{}\"{}>",
            self.input_type,
            html_escape(name),
            html_escape(value),
            flat_attrs(attrs)
        )
    }
}

/// Widget rendering an item's tags, and every catalog tag, as selectable
/// labels over a hidden text input.
pub struct LabelWidget {
    catalog: Arc<dyn TagCatalog>,
    input: TextInput,
}

impl LabelWidget {
    /// The catalog source is injected; callers may supply any implementation
    /// of the read contract.
    pub fn new(catalog: Arc<dyn TagCatalog>) -> Self {
        Self {
            catalog,
            input: TextInput::hidden(),
        }
    }

    /// Canonical comma-separated string for the current value.
    ///
    /// Submitted strings pass through unchanged; saved relations are
    /// serialized through the edit-string rules. There is no error path:
    /// malformed input degrades to best-effort formatting.
    pub fn format_value(&self, value: &FieldValue) -> Option<String> {
        match value {
            FieldValue::Absent => None,
            FieldValue::Submitted(raw) => Some(raw.clone()),
            FieldValue::Saved(relations) => {
                let tags: Vec<Tag> = relations
                    .iter()
                    .map(|relation| relation.tag.clone())
                    .collect();
                Some(edit_string_for_tags(&tags))
            }
        }
    }

    /// Annotate every catalog tag with its selection state and color.
    ///
    /// Works on string names rather than the tags themselves so it also
    /// serves selections recovered from forms that were never fully
    /// submitted.
    pub fn tag_list(&self, current: &[String]) -> Vec<TagLabel> {
        self.catalog
            .list_tags()
            .into_iter()
            .map(|tag| {
                let state = if current.iter().any(|name| name == &tag.name) {
                    SelectionState::Selected
                } else {
                    SelectionState::Unselected
                };
                let color = tag.display_color().to_string();
                TagLabel {
                    name: tag.name,
                    state,
                    color,
                }
            })
            .collect()
    }

    /// Render the tag list followed by the hidden input as one trusted
    /// fragment.
    pub fn render(
        &self,
        name: &str,
        value: &FieldValue,
        attrs: &BTreeMap<String, String>,
    ) -> TrustedHtml {
        let (current_tags, formatted_value) = match value {
            // New form: nothing selected yet.
            FieldValue::Absent => (Vec::new(), String::new()),
            // Submitted but not saved, e.g. an invalid form round trip; the
            // raw string passes through so the user's input is not rewritten.
            FieldValue::Submitted(raw) => (parse_tag_input(raw), raw.clone()),
            // Loaded from saved tags.
            FieldValue::Saved(relations) => {
                let names = relations
                    .iter()
                    .map(|relation| relation.tag.name.clone())
                    .collect();
                (names, self.format_value(value).unwrap_or_default())
            }
        };
        let labels = self.tag_list(&current_tags);

        let input_field = self.input.render(name, &formatted_value, attrs);

        let mut list_attrs = attrs.clone();
        list_attrs
            .entry("class".to_string())
            .or_insert_with(|| DEFAULT_LIST_CLASS.to_string());

        let mut items = String::new();
        for label in &labels {
            // Tag names come from the operator-managed catalog, not from
            // visitor input, and are emitted unescaped to keep the fragment
            // shape stable.
            items.push_str(&format!(
                "<li data-tag-name='{0}' class={1} style='border-top: .2rem solid {2}'>{0}</li>",
                label.name,
                label.state.css_class(),
                label.color
            ));
        }
        let list = format!("<ul{}>{}</ul>", flat_attrs(&list_attrs), items);

        TrustedHtml::new(format!("{}{}", list, input_field))
    }

    pub fn media(&self) -> WidgetMedia {
        WidgetMedia {
            css: &[LABEL_WIDGET_CSS],
            js: &[LABEL_WIDGET_JS],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryTagCatalog;

    fn build_widget() -> LabelWidget {
        let catalog = InMemoryTagCatalog::new(vec![
            Tag::grouped("rust", "lang", "#b7410e"),
            Tag::grouped("python", "lang", "#3572a5"),
            Tag::ungrouped("draft"),
            Tag::grouped("release", "workflow", "#2e8b57"),
        ]);
        LabelWidget::new(Arc::new(catalog))
    }

    fn selected_names(labels: &[TagLabel]) -> Vec<String> {
        labels
            .iter()
            .filter(|label| label.state == SelectionState::Selected)
            .map(|label| label.name.clone())
            .collect()
    }

    #[test]
    fn tag_list_empty_selection_marks_everything_unselected() {
        let widget = build_widget();
        let labels = widget.tag_list(&[]);
        assert_eq!(labels.len(), 4);
        assert!(
            labels
                .iter()
                .all(|label| label.state == SelectionState::Unselected)
        );
    }

    #[test]
    fn tag_list_marks_exactly_the_named_tags() {
        let widget = build_widget();
        let current = vec!["python".to_string(), "release".to_string()];
        let labels = widget.tag_list(&current);
        assert_eq!(selected_names(&labels), vec!["python", "release"]);
    }

    #[test]
    fn tag_list_follows_group_ordering() {
        let widget = build_widget();
        let names: Vec<String> = widget
            .tag_list(&[])
            .into_iter()
            .map(|label| label.name)
            .collect();
        assert_eq!(names, vec!["draft", "rust", "python", "release"]);
    }

    #[test]
    fn format_value_absent_is_none() {
        let widget = build_widget();
        assert_eq!(widget.format_value(&FieldValue::Absent), None);
    }

    #[test]
    fn format_value_passes_submitted_string_through() {
        let widget = build_widget();
        let value = FieldValue::Submitted("a, b".to_string());
        assert_eq!(widget.format_value(&value), Some("a, b".to_string()));
    }

    #[test]
    fn format_value_serializes_saved_relations() {
        let widget = build_widget();
        let value = FieldValue::Saved(vec![
            TagRelation::new(Tag::grouped("rust", "lang", "#b7410e")),
            TagRelation::new(Tag::ungrouped("draft")),
        ]);
        assert_eq!(widget.format_value(&value), Some("draft, rust".to_string()));
    }

    #[test]
    fn render_submitted_string_recovers_quoted_names() {
        let widget = build_widget();
        let value = FieldValue::Submitted("rust, \"draft\", python".to_string());
        let html = widget.render("tags", &value, &BTreeMap::new()).to_string();

        assert!(html.contains("<li data-tag-name='rust' class=selected"));
        assert!(html.contains("<li data-tag-name='draft' class=selected"));
        assert!(html.contains("<li data-tag-name='python' class=selected"));
        assert!(html.contains("<li data-tag-name='release' class=n"));
        // The submitted string passes through unchanged, escaped for the
        // value attribute.
        assert!(html.contains("value=\"rust, &quot;draft&quot;, python\""));
    }

    #[test]
    fn render_absent_value_selects_nothing() {
        let widget = build_widget();
        let html = widget
            .render("tags", &FieldValue::Absent, &BTreeMap::new())
            .to_string();
        assert_eq!(html.matches("class=selected").count(), 0);
        assert_eq!(html.matches("class=n").count(), 4);
        assert!(html.contains("<input type=\"hidden\" name=\"tags\" value=\"\">"));
    }

    #[test]
    fn render_defaults_list_class_to_tags() {
        let widget = build_widget();
        let html = widget
            .render("tags", &FieldValue::Absent, &BTreeMap::new())
            .to_string();
        assert!(html.starts_with("<ul class=\"tags\">"));
    }

    #[test]
    fn render_keeps_caller_class_attribute() {
        let widget = build_widget();
        let mut attrs = BTreeMap::new();
        attrs.insert("class".to_string(), "custom".to_string());
        let html = widget
            .render("tags", &FieldValue::Absent, &attrs)
            .to_string();
        assert!(html.starts_with("<ul class=\"custom\">"));
        assert!(html.contains("<input type=\"hidden\" name=\"tags\" value=\"\" class=\"custom\">"));
    }

    #[test]
    fn render_passes_extra_attrs_to_list_and_input() {
        let widget = build_widget();
        let mut attrs = BTreeMap::new();
        attrs.insert("id".to_string(), "id_tags".to_string());
        let html = widget
            .render("tags", &FieldValue::Absent, &attrs)
            .to_string();
        assert!(html.starts_with("<ul class=\"tags\" id=\"id_tags\">"));
        assert!(html.contains("<input type=\"hidden\" name=\"tags\" value=\"\" id=\"id_tags\">"));
    }

    #[test]
    fn render_uses_group_color_and_black_fallback() {
        let widget = build_widget();
        let html = widget
            .render("tags", &FieldValue::Absent, &BTreeMap::new())
            .to_string();
        assert!(html.contains(
            "<li data-tag-name='draft' class=n style='border-top: .2rem solid #000000'>draft</li>"
        ));
        assert!(html.contains(
            "<li data-tag-name='rust' class=n style='border-top: .2rem solid #b7410e'>rust</li>"
        ));
    }

    #[test]
    fn render_saved_relations_formats_canonical_value() {
        let widget = build_widget();
        let value = FieldValue::Saved(vec![
            TagRelation::new(Tag::grouped("rust", "lang", "#b7410e")),
            TagRelation::new(Tag::ungrouped("draft")),
        ]);
        let html = widget.render("tags", &value, &BTreeMap::new()).to_string();
        assert!(html.contains("<li data-tag-name='rust' class=selected"));
        assert!(html.contains("<li data-tag-name='draft' class=selected"));
        assert!(html.contains("value=\"draft, rust\""));
    }

    #[test]
    fn render_round_trips_saved_value_through_submission() {
        let widget = build_widget();
        let saved = FieldValue::Saved(vec![
            TagRelation::new(Tag::grouped("rust", "lang", "#b7410e")),
            TagRelation::new(Tag::ungrouped("draft")),
        ]);
        let formatted = widget.format_value(&saved).expect("formatted value");
        let resubmitted = FieldValue::Submitted(formatted);

        let saved_html = widget.render("tags", &saved, &BTreeMap::new()).to_string();
        let resubmitted_html = widget
            .render("tags", &resubmitted, &BTreeMap::new())
            .to_string();
        for name in ["rust", "draft"] {
            let li = format!("<li data-tag-name='{}' class=selected", name);
            assert!(saved_html.contains(&li));
            assert!(resubmitted_html.contains(&li));
        }
    }

    #[test]
    fn render_empty_catalog_yields_just_the_input() {
        let widget = LabelWidget::new(Arc::new(InMemoryTagCatalog::new(Vec::new())));
        let html = widget
            .render("tags", &FieldValue::Absent, &BTreeMap::new())
            .to_string();
        assert_eq!(
            html,
            "<ul class=\"tags\"></ul><input type=\"hidden\" name=\"tags\" value=\"\">"
        );
    }

    #[test]
    fn media_declares_one_stylesheet_and_one_script() {
        let widget = build_widget();
        let media = widget.media();
        assert_eq!(media.css, [LABEL_WIDGET_CSS]);
        assert_eq!(media.js, [LABEL_WIDGET_JS]);
    }
}
