//! Schema-driven extraction with CSS selectors
//!
//! A schema maps field names to either a selector string (first match's
//! text) or a one-element array holding a selector string (text of every
//! match). Any other shape, including a selector that does not parse, is
//! kept as [`SelectorSpec::Invalid`] and yields `null` for its field.

use crate::error::CrawlError;
use crate::text::element_text;
use crate::types::StructuredResult;
use scraper::{Html, Selector};
use serde_json::{Map, Value};

/// Resolved shape of one schema field
#[derive(Debug, Clone)]
pub enum SelectorSpec {
    /// First match's text, or empty string
    Scalar(Selector),
    /// Non-empty text of every match
    List(Selector),
    /// Unrecognized shape; always extracts to `null`
    Invalid,
}

impl SelectorSpec {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(css) => Selector::parse(css)
                .map(SelectorSpec::Scalar)
                .unwrap_or(SelectorSpec::Invalid),
            Value::Array(items) => match items.as_slice() {
                [Value::String(css)] => Selector::parse(css)
                    .map(SelectorSpec::List)
                    .unwrap_or(SelectorSpec::Invalid),
                _ => SelectorSpec::Invalid,
            },
            _ => SelectorSpec::Invalid,
        }
    }

    fn extract(&self, document: &Html) -> Value {
        match self {
            SelectorSpec::Scalar(selector) => Value::String(
                document
                    .select(selector)
                    .next()
                    .map(element_text)
                    .unwrap_or_default(),
            ),
            SelectorSpec::List(selector) => Value::Array(
                document
                    .select(selector)
                    .map(element_text)
                    .filter(|t| !t.is_empty())
                    .map(Value::String)
                    .collect(),
            ),
            SelectorSpec::Invalid => Value::Null,
        }
    }
}

/// Ordered field → selector mapping
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, SelectorSpec)>,
}

impl Schema {
    /// Parse a schema from its JSON text
    ///
    /// Fails only when the text is not a JSON object; bad field shapes are
    /// tolerated.
    pub fn parse(schema_json: &str) -> Result<Self, CrawlError> {
        let value: Value = serde_json::from_str(schema_json)
            .map_err(|e| CrawlError::InvalidSchema(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(CrawlError::InvalidSchema(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            fields: map
                .iter()
                .map(|(name, value)| (name.clone(), SelectorSpec::from_value(value)))
                .collect(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &SelectorSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Apply every field to `html`
    pub fn extract(&self, html: &str, url: &str) -> StructuredResult {
        let document = Html::parse_document(html);
        let fields = self
            .fields
            .iter()
            .map(|(name, spec)| (name.clone(), spec.extract(&document)))
            .collect();
        StructuredResult {
            url: url.to_string(),
            fields,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAGE: &str = r#"<html><body>
        <h1>X</h1>
        <span class="price"> $10 </span><span class="price">$20</span>
        <ul class="feature"><li>One</li><li>  </li><li>Two   words</li></ul>
    </body></html>"#;

    #[test]
    fn test_scalar_field() {
        let schema = Schema::parse(r#"{"title": "h1"}"#).unwrap();
        let result = schema.extract("<h1>X</h1>", "https://example.com");
        assert_eq!(result.url, "https://example.com");
        assert_eq!(json!(result.fields), json!({"title": "X"}));
    }

    #[test]
    fn test_mixed_schema_preserves_order() {
        let schema = Schema::parse(
            r#"{"price": ".price", "items": [".feature li"], "title": "h1", "missing": ".nope"}"#,
        )
        .unwrap();
        let result = schema.extract(PAGE, "u");
        let keys: Vec<_> = result.fields.keys().cloned().collect();
        assert_eq!(keys, vec!["price", "items", "title", "missing"]);
        assert_eq!(result.fields["price"], json!("$10"));
        assert_eq!(result.fields["items"], json!(["One", "Two words"]));
        assert_eq!(result.fields["missing"], json!(""));
    }

    #[test]
    fn test_invalid_shapes_yield_null() {
        let schema = Schema::parse(
            r#"{"num": 3, "empty": [], "pair": ["h1", "h2"], "nested": {"a": "h1"}, "nonstr": [1], "bad": "h1[["}"#,
        )
        .unwrap();
        assert_eq!(schema.len(), 6);
        assert!(schema
            .fields()
            .all(|(_, spec)| matches!(spec, SelectorSpec::Invalid)));

        let result = schema.extract(PAGE, "u");
        assert!(result.fields.values().all(Value::is_null));
    }

    #[test]
    fn test_list_field_no_matches_is_empty_list() {
        let schema = Schema::parse(r#"{"items": ["table td"]}"#).unwrap();
        let result = schema.extract(PAGE, "u");
        assert_eq!(result.fields["items"], json!([]));
    }

    #[test]
    fn test_non_object_schema_is_rejected() {
        assert!(matches!(
            Schema::parse(r#"["h1"]"#),
            Err(CrawlError::InvalidSchema(_))
        ));
        assert!(matches!(
            Schema::parse("not json"),
            Err(CrawlError::InvalidSchema(_))
        ));
        assert!(Schema::parse("{}").unwrap().is_empty());
    }
}
