use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Successful answer of the homework status endpoint, after the shape check.
///
/// Records stay raw here; each one is decoded on its own so a single bad
/// record cannot hold back the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub homeworks: Vec<Value>,
    /// Server time in Unix seconds; becomes the next `from_date`.
    pub current_date: i64,
}

/// One submission whose status changed since `from_date`.
///
/// `None` means the key is absent. A key that is present keeps its raw
/// value, `null` included, so the status translator decides what to do with
/// it.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct HomeworkRecord {
    #[serde(default, deserialize_with = "present")]
    pub homework_name: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub status: Option<Value>,

    // id, reviewer_comment, date_updated, lesson_name, ...
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl HomeworkRecord {
    pub fn new(homework_name: &str, status: &str) -> Self {
        Self {
            homework_name: Some(Value::from(homework_name)),
            status: Some(Value::from(status)),
            extra: HashMap::new(),
        }
    }
}
