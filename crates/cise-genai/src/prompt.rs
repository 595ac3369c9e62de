//! Structured prompt requests.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde_json::Value;

/// A named prompt template plus the values to fill it with and the JSON
/// Schema the output must conform to.
///
/// Templates reference parameters as `{{name}}`. Unknown placeholders are
/// left in place so a missing parameter is visible in the rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub name: &'static str,
    pub template: &'static str,
    pub params: BTreeMap<&'static str, String>,
    pub output_schema: Value,
}

impl PromptRequest {
    /// Create a request whose output must deserialize into `T`.
    pub fn new<T: JsonSchema>(name: &'static str, template: &'static str) -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            name,
            template,
            params: BTreeMap::new(),
            output_schema: serde_json::to_value(schema).unwrap_or(Value::Null),
        }
    }

    /// Add a named string parameter.
    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Substitute parameters into the template.
    ///
    /// A single pass over the template: substituted values are never
    /// scanned again, so a value containing `{{name}}` stays literal.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                rest = &rest[open..];
                break;
            };

            let key = &after[..close];
            match self.params.get(key) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str("{{");
                    out.push_str(key);
                    out.push_str("}}");
                }
            }
            rest = &after[close + 2..];
        }

        out.push_str(rest);
        out
    }
}
