//! Render options loaded from TOML
//!
//! Display policies that sit outside the template language itself. Every
//! field has a default so a missing or empty options file is valid.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Display policies applied during slot resolution
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Fields whose text values are parsed as ISO dates and reformatted.
    /// Opt-in: a field not listed here is never touched.
    pub date_fields: Vec<String>,
    /// chrono format string for reformatted dates
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date_fields: Vec::new(),
            date_format: "%B %e, %Y".to_string(),
        }
    }
}

impl RenderOptions {
    /// Load options from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse options from a TOML string
    pub fn from_str(content: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn is_date_field(&self, field: &str) -> bool {
        self.date_fields.iter().any(|f| f == field)
    }

    /// Builder-style registration of a date field
    pub fn with_date_field(mut self, field: impl Into<String>) -> Self {
        self.date_fields.push(field.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options() {
        let options = RenderOptions::from_str("").expect("Should parse");
        assert!(options.date_fields.is_empty());
        assert_eq!(options.date_format, "%B %e, %Y");
    }

    #[test]
    fn test_full_options() {
        let options = RenderOptions::from_str(
            r#"
            date_fields = ["published", "updated"]
            date_format = "%Y/%m/%d"
            "#,
        )
        .expect("Should parse");
        assert!(options.is_date_field("published"));
        assert!(options.is_date_field("updated"));
        assert!(!options.is_date_field("title"));
        assert_eq!(options.date_format, "%Y/%m/%d");
    }

    #[test]
    fn test_invalid_toml() {
        let result = RenderOptions::from_str("date_fields = 42");
        assert!(matches!(result, Err(OptionsError::Parse(_))));
    }
}
