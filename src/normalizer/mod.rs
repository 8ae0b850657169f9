use serde_json::Value;

use crate::app::{DeckError, Result};
use crate::domain::Article;

/// Turns a response body into feed records.
///
/// The body must be a JSON array. Elements are passed through untouched,
/// whatever their shape; id uniqueness is not checked.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, endpoint: &str, body: &[u8]) -> Result<Vec<Article>> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| DeckError::fetch_failed(endpoint, e))?;

        match value {
            Value::Array(elements) => Ok(elements.into_iter().map(Article::new).collect()),
            other => Err(DeckError::fetch_failed(
                endpoint,
                format!("expected a JSON array, got {}", json_kind(&other)),
            )),
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
