use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Wire keys for each optional field, in precedence order
const EPISODE_KEYS: &[&str] = &["episodeCount", "episodes"];
const RATING_KEYS: &[&str] = &["rating"];
const RANK_KEYS: &[&str] = &["rank", "ranked"];
const AIRED_KEYS: &[&str] = &["airedInfo", "aired"];
const SYNOPSIS_KEYS: &[&str] = &["synopsis"];
const IMAGE_KEYS: &[&str] = &["imageUrl", "imgUrl", "img_url"];

/// One recommended anime as returned for a mood prompt
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    /// Why the backend thinks this matches the prompt
    pub explanation: String,
    pub genres: Vec<String>,
    pub episode_count: Option<f64>,
    pub rating: Option<f64>,
    pub rank: Option<f64>,
    pub aired_info: Option<String>,
    pub synopsis: Option<String>,
    pub image_url: Option<String>,
}

impl Item {
    /// Creates an item with only the required fields set
    pub fn new(title: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            explanation: explanation.into(),
            genres: Vec::new(),
            episode_count: None,
            rating: None,
            rank: None,
            aired_info: None,
            synopsis: None,
            image_url: None,
        }
    }

    /// Normalizes one `results` entry
    ///
    /// Required fields are strict. Optional fields are lenient: a value of the
    /// wrong type is dropped (and logged) instead of failing the entry.
    pub(crate) fn from_wire(index: usize, entry: &Value) -> AppResult<Self> {
        let fields = entry.as_object().ok_or_else(|| {
            AppError::Schema(format!("results[{}] is not an object", index))
        })?;

        Ok(Self {
            title: required_string(index, fields, "title")?,
            explanation: required_string(index, fields, "explanation")?,
            genres: genres(index, fields),
            episode_count: lenient_number(index, fields, EPISODE_KEYS),
            rating: lenient_number(index, fields, RATING_KEYS),
            rank: lenient_number(index, fields, RANK_KEYS),
            aired_info: lenient_string(index, fields, AIRED_KEYS),
            synopsis: lenient_string(index, fields, SYNOPSIS_KEYS),
            image_url: lenient_string(index, fields, IMAGE_KEYS),
        })
    }
}

fn required_string(index: usize, fields: &Map<String, Value>, key: &str) -> AppResult<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AppError::Schema(format!(
            "results[{}].{} is not a string",
            index, key
        ))),
        None => Err(AppError::Schema(format!(
            "results[{}].{} is missing",
            index, key
        ))),
    }
}

/// Returns the first key with a non-null value, with that value
///
/// An explicit `null` counts as absent. A non-null primary key wins even when
/// its value turns out to be unusable.
fn first_present<'a>(
    fields: &'a Map<String, Value>,
    keys: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    keys.iter().find_map(|key| match fields.get(*key) {
        None | Some(Value::Null) => None,
        Some(value) => Some((*key, value)),
    })
}

fn lenient_number(index: usize, fields: &Map<String, Value>, keys: &[&'static str]) -> Option<f64> {
    match first_present(fields, keys)? {
        (_, Value::Number(n)) => n.as_f64(),
        (key, other) => {
            tracing::warn!(
                entry = index,
                field = key,
                value = %other,
                "Ignoring non-numeric value for optional field"
            );
            None
        }
    }
}

fn lenient_string(
    index: usize,
    fields: &Map<String, Value>,
    keys: &[&'static str],
) -> Option<String> {
    match first_present(fields, keys)? {
        (_, Value::String(s)) => Some(s.clone()),
        (key, other) => {
            tracing::warn!(
                entry = index,
                field = key,
                value = %other,
                "Ignoring non-string value for optional field"
            );
            None
        }
    }
}

fn genres(index: usize, fields: &Map<String, Value>) -> Vec<String> {
    match fields.get("genres") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(other) => {
            tracing::warn!(entry = index, value = %other, "Ignoring non-array genres");
            Vec::new()
        }
    }
}
