use serde_json::{Map, Value};

/// A stored record: a JSON object with at least an integer `id` once created.
pub type Record = Map<String, Value>;

pub const ID_FIELD: &str = "id";

/// Error for request bodies that are not a JSON object.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("Malformed JSON body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Request body must be a JSON object")]
    NotAnObject,
}

/// Parse a request body into a partial record.
///
/// An empty body is an empty record; any other non-object value is rejected.
pub fn parse_body(bytes: &[u8]) -> Result<Record, BodyError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Record::new());
    }

    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(BodyError::NotAnObject),
    }
}

/// The record's id. Numeric strings and integral floats (`1.0`) are accepted
/// for hand-edited data files.
pub fn record_id(record: &Record) -> Option<i64> {
    match record.get(ID_FIELD)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integral(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// Overwrite `base` with every top-level field of `patch` except `id`.
///
/// Nested objects are replaced wholesale, never merged key by key.
pub fn shallow_merge(base: &mut Record, patch: Record) {
    for (key, value) in patch {
        if key == ID_FIELD {
            continue;
        }
        base.insert(key, value);
    }
}
