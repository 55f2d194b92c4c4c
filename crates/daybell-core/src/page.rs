//! Notion page model.
//!
//! A page's `properties` is a loosely typed bag keyed by property name. The
//! accessors here never fail; each documents what it returns when a property
//! is missing or has an unexpected shape.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Title used when a page has no usable title text.
pub const UNTITLED: &str = "(no title)";

/// A single entry (row) in the Notion database.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Stable page ID, used to address updates.
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Page {
    /// Concatenated `plain_text` of every fragment in the title property.
    ///
    /// Returns [`UNTITLED`] when the property is absent, has no `title`
    /// array, or the fragments join to an empty string.
    pub fn title(&self, property: &str) -> String {
        let text: String = self
            .properties
            .get(property)
            .and_then(|p| p.get("title"))
            .and_then(Value::as_array)
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|t| t.get("plain_text").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            UNTITLED.to_string()
        } else {
            text
        }
    }

    /// Value of the checkbox property, `false` when absent or not a boolean.
    pub fn is_notified(&self, property: &str) -> bool {
        self.properties
            .get(property)
            .and_then(|p| p.get("checkbox"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
