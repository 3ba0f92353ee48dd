use crate::errors::DecodeError;
use crate::event::ActivityEvent;
use serde_json::Value;

/// Result of decoding a record value. Decoding never fails outright: a bad
/// payload becomes `Undecodable` carrying the reason.
#[derive(Debug)]
pub enum DecodedValue {
    Event(ActivityEvent),
    Undecodable(DecodeError),
}

/// Decode a raw record value as UTF-8 JSON into an [`ActivityEvent`].
pub fn decode_value(payload: Option<&[u8]>) -> DecodedValue {
    match try_decode(payload) {
        Ok(event) => DecodedValue::Event(event),
        Err(e) => DecodedValue::Undecodable(e),
    }
}

fn try_decode(payload: Option<&[u8]>) -> Result<ActivityEvent, DecodeError> {
    let bytes = payload.ok_or(DecodeError::EmptyPayload)?;
    let text = std::str::from_utf8(bytes)?;
    let document: Value = serde_json::from_str(text)?;
    if !document.is_object() {
        return Err(DecodeError::NotAnObject(json_kind(&document)));
    }
    Ok(serde_json::from_value(document)?)
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
