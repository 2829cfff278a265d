use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

mod item;

pub use item::Item;

/// Request body sent to the recommendation backend
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PromptRequest {
    pub prompt: String,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Parsed list of recommendations for one prompt
///
/// `results` keeps the backend's relevance order.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Envelope {
    pub results: Vec<Item>,
}

impl Envelope {
    /// Parses a decoded response document
    ///
    /// Fails if `results` is missing or not an array, or if any entry lacks a
    /// string `title` or `explanation`. Malformed optional fields only degrade
    /// that field.
    pub fn parse(raw: Value) -> AppResult<Self> {
        let entries = match raw {
            Value::Object(mut doc) => match doc.remove("results") {
                Some(Value::Array(entries)) => entries,
                Some(_) => {
                    return Err(AppError::Schema("`results` is not an array".to_string()))
                }
                None => return Err(AppError::Schema("`results` is missing".to_string())),
            },
            _ => {
                return Err(AppError::Schema(
                    "response body is not a JSON object".to_string(),
                ))
            }
        };

        let results = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Item::from_wire(index, entry))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { results })
    }

    /// Parses a raw response body
    pub fn from_slice(body: &[u8]) -> AppResult<Self> {
        let raw: Value = serde_json::from_slice(body)?;
        Self::parse(raw)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
