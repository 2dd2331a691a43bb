//! Lenient shapes for JSON fields that form-driven clients send either typed
//! or as text.

use serde::Deserialize;

use crate::errors::AppError;

/// A number sent as a JSON number or as numeric text (`65` or `"65"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    Number(f64),
    Text(String),
}

impl NumberField {
    /// Blank text counts as absent. Non-numeric text is a validation error
    /// naming `field`.
    pub fn value(&self, field: &str) -> Result<Option<f64>, AppError> {
        match self {
            NumberField::Number(n) => Ok(Some(*n)),
            NumberField::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse::<f64>().map(Some).map_err(|_| {
                    AppError::Validation(format!("{field} must be a number, got '{text}'"))
                })
            }
        }
    }
}

/// A list of strings sent as a JSON array or as comma-separated text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    List(Vec<String>),
    Joined(String),
}

impl ListField {
    /// Trimmed items with blanks dropped.
    pub fn into_items(self) -> Vec<String> {
        let items = match self {
            ListField::List(items) => items,
            ListField::Joined(text) => text.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
