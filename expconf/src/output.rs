//! Rendering of resolved configuration documents.
//!
//! This module provides the output formats used to print a resolved
//! document: YAML, pretty-printed JSON and TOML.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::Value;

/// Trait for rendering a document into text.
pub trait OutputFormatter {
    /// Render `value`.
    ///
    /// # Errors
    ///
    /// Returns `Serialize` if the format cannot represent the document
    /// (TOML has no null, for instance).
    fn format(&self, value: &Value) -> Result<String>;
}

/// YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, value: &Value) -> Result<String> {
        serde_yaml::to_string(value).map_err(|e| serialize_error("yaml", e))
    }
}

/// Pretty-printed JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, value: &Value) -> Result<String> {
        serde_json::to_string_pretty(value)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| serialize_error("json", e))
    }
}

/// TOML output.
pub struct TomlFormatter;

impl OutputFormatter for TomlFormatter {
    fn format(&self, value: &Value) -> Result<String> {
        toml::to_string_pretty(value).map_err(|e| serialize_error("toml", e))
    }
}

fn serialize_error(format: &str, err: impl fmt::Display) -> Error {
    Error::Serialize {
        format: format.to_string(),
        message: err.to_string(),
    }
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
    /// TOML.
    Toml,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Yaml => Box::new(YamlFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Toml => Box::new(TomlFormatter),
        }
    }

    /// Render `value` in this format.
    ///
    /// # Errors
    ///
    /// See [`OutputFormatter::format`].
    pub fn render(&self, value: &Value) -> Result<String> {
        self.create_formatter().format(value)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(format!("invalid output format: {s} (expected yaml, json or toml)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_formats() {
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("toml".parse::<OutputFormat>().unwrap(), OutputFormat::Toml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_display_round_trips_parse() {
        for format in [OutputFormat::Yaml, OutputFormat::Json, OutputFormat::Toml] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_yaml_output_keeps_key_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": [1, 2]}));
        let text = OutputFormat::Yaml.render(&value).unwrap();
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_json_output_parses_back() {
        let value = Value::from(json!({"a": {"b": [1, 2.5, "c", null]}}));
        let text = OutputFormat::Json.render(&value).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({"a": {"b": [1, 2.5, "c", null]}}));
    }

    #[test]
    fn test_toml_output() {
        let value = Value::from(json!({"name": "run", "train": {"epochs": 3}}));
        let text = OutputFormat::Toml.render(&value).unwrap();
        assert!(text.contains("name = \"run\""));
        assert!(text.contains("[train]"));
        assert!(text.contains("epochs = 3"));
    }

    #[test]
    fn test_toml_rejects_null() {
        let value = Value::from(json!({"missing": null}));
        let err = OutputFormat::Toml.render(&value).unwrap_err();
        assert!(matches!(err, Error::Serialize { ref format, .. } if format == "toml"));
    }
}
