//! Backend response envelopes
//!
//! The backend wraps most answers as `{ success, message, data }` but a few
//! endpoints return the bare entity. Errors carry `message`, an `errors`
//! list (or a validation map of lists) or only plain text.

use reqwest::StatusCode;
use serde_json::Value;

use crate::shared::{AppError, AppResult};

const ENVELOPE_KEYS: &[&str] = &[
    "success",
    "Success",
    "isSuccess",
    "IsSuccess",
    "message",
    "Message",
    "data",
    "Data",
    "errors",
    "Errors",
    "statusCode",
    "StatusCode",
];

const MESSAGE_KEYS: &[&str] = &["message", "Message", "title", "Title", "error", "Error"];
const ERRORS_KEYS: &[&str] = &["errors", "Errors"];

fn first_of<'a>(obj: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k).filter(|v| !v.is_null()))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Flatten `errors` (array of strings/objects, or object of arrays).
fn collect_errors(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => non_empty(s).into_iter().collect(),
        Value::Array(items) => items.iter().flat_map(collect_errors).collect(),
        Value::Object(obj) => match first_of(obj, &["message", "Message", "errorMessage", "ErrorMessage"]) {
            Some(Value::String(s)) => non_empty(s).into_iter().collect(),
            _ => obj.values().flat_map(collect_errors).collect(),
        },
        _ => Vec::new(),
    }
}

/// Message from a parsed JSON body: `message` first, then `errors`.
pub fn message_from_json(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(msg)) = first_of(obj, MESSAGE_KEYS) {
                if let Some(msg) = non_empty(msg) {
                    return Some(msg);
                }
            }
            let errors = collect_errors(first_of(obj, ERRORS_KEYS)?);
            (!errors.is_empty()).then(|| errors.join("; "))
        }
        Value::String(s) => non_empty(s),
        _ => None,
    }
}

/// Human-readable message for a failed response.
///
/// Precedence: `message` → `errors[]` → raw text → status reason.
pub fn extract_error_message(body: &str, status: StatusCode) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => message_from_json(&value),
        Err(_) => non_empty(body),
    }
    .unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("Request failed with status {}", status.as_u16()),
    })
}

fn is_envelope(obj: &serde_json::Map<String, Value>) -> bool {
    let marked = ["success", "Success", "isSuccess", "IsSuccess", "data", "Data"]
        .iter()
        .any(|k| obj.contains_key(*k));
    marked && obj.keys().all(|k| ENVELOPE_KEYS.contains(&k.as_str()))
}

/// Unwrap a successful body to its payload.
///
/// A `success: false` envelope on a 2xx answer is still a failure.
pub fn unwrap_data(value: Value) -> AppResult<Value> {
    let Value::Object(mut obj) = value else {
        return Ok(value);
    };
    if !is_envelope(&obj) {
        return Ok(Value::Object(obj));
    }

    let failed = ["success", "Success", "isSuccess", "IsSuccess"]
        .iter()
        .any(|k| obj.get(*k) == Some(&Value::Bool(false)));
    if failed {
        let message = message_from_json(&Value::Object(obj.clone()))
            .unwrap_or_else(|| "Request was not successful".to_string());
        return Err(AppError::Backend {
            status: 400,
            message,
        });
    }

    Ok(obj
        .remove("data")
        .or_else(|| obj.remove("Data"))
        .unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_wins_over_errors() {
        let body = r#"{"message":"Booking not found","errors":["ignored"]}"#;
        assert_eq!(
            extract_error_message(body, StatusCode::NOT_FOUND),
            "Booking not found"
        );
    }

    #[test]
    fn errors_array_and_validation_map() {
        let arr = r#"{"errors":["Slot is occupied","Battery missing"]}"#;
        assert_eq!(
            extract_error_message(arr, StatusCode::BAD_REQUEST),
            "Slot is occupied; Battery missing"
        );

        let map = r#"{"title":"","errors":{"StationID":["The StationID field is required."]}}"#;
        assert_eq!(
            extract_error_message(map, StatusCode::BAD_REQUEST),
            "The StationID field is required."
        );
    }

    #[test]
    fn raw_text_then_reason() {
        assert_eq!(
            extract_error_message("Invalid booking state", StatusCode::CONFLICT),
            "Invalid booking state"
        );
        assert_eq!(
            extract_error_message("", StatusCode::INTERNAL_SERVER_ERROR),
            "Internal Server Error"
        );
    }

    #[test]
    fn unwraps_data_envelope() {
        let v = unwrap_data(json!({ "success": true, "message": "ok", "data": { "id": 1 } }))
            .unwrap();
        assert_eq!(v, json!({ "id": 1 }));

        let v = unwrap_data(json!({ "Success": true, "Data": [1, 2] })).unwrap();
        assert_eq!(v, json!([1, 2]));
    }

    #[test]
    fn bare_entities_pass_through() {
        let entity = json!({ "BookingID": "BK-1", "Status": "Pending", "data": "x" });
        assert_eq!(unwrap_data(entity.clone()).unwrap(), entity);
        assert_eq!(unwrap_data(json!([1])).unwrap(), json!([1]));
    }

    #[test]
    fn failed_envelope_is_backend_error() {
        let err = unwrap_data(json!({ "success": false, "message": "Slot busy" })).unwrap_err();
        assert!(matches!(err, AppError::Backend { status: 400, ref message } if message == "Slot busy"));
    }
}
