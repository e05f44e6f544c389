//! Alias-table lookups over loosely shaped backend JSON
//!
//! Each resource declares one `FieldTable`: canonical field name → every
//! spelling the backend has been seen to use. Dotted aliases walk nested
//! objects (`User.FullName`). The first alias holding a usable value wins.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::shared::{AppError, AppResult};

pub type FieldTable = &'static [(&'static str, &'static [&'static str])];

pub struct WireRecord<'a> {
    map: &'a Map<String, Value>,
    table: FieldTable,
    resource: &'static str,
}

impl<'a> WireRecord<'a> {
    pub fn new(value: &'a Value, table: FieldTable, resource: &'static str) -> AppResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                table,
                resource,
            }),
            other => Err(AppError::Decode(format!(
                "Expected {} object, got {}",
                resource,
                type_name(other)
            ))),
        }
    }

    fn aliases(&self, field: &'static str) -> &'static [&'static str] {
        self.table
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }

    /// Values present under any alias of `field`, in table order.
    fn candidates(&self, field: &'static str) -> impl Iterator<Item = &'a Value> + '_ {
        let map = self.map;
        self.aliases(field)
            .iter()
            .filter_map(move |alias| walk(map, alias))
    }

    pub fn string(&self, field: &'static str) -> Option<String> {
        self.candidates(field).find_map(value_to_string)
    }

    pub fn required_string(&self, field: &'static str) -> AppResult<String> {
        self.string(field).ok_or_else(|| {
            AppError::Decode(format!("{} payload has no {} field", self.resource, field))
        })
    }

    pub fn number(&self, field: &'static str) -> Option<f64> {
        self.candidates(field).find_map(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn integer(&self, field: &'static str) -> Option<i64> {
        self.candidates(field).find_map(|v| match v {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// RFC 3339, or a naive timestamp which the backend emits in UTC.
    pub fn datetime(&self, field: &'static str) -> Option<DateTime<Utc>> {
        let raw = self.string(field)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

fn walk<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let first = parts.next()?;
    let mut current = map.get(first)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Items of a list response: a bare array, or an array under one of the
/// usual wrapper keys (`items`, `data`, `$values`).
pub fn list_items(value: &Value) -> AppResult<&Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) => ["items", "Items", "data", "Data", "$values", "results"]
            .iter()
            .find_map(|key| map.get(*key))
            .map(list_items)
            .unwrap_or_else(|| Err(AppError::Decode("Expected a list response".into()))),
        other => Err(AppError::Decode(format!(
            "Expected a list response, got {}",
            type_name(other)
        ))),
    }
}

/// Map every item of a list response with `f`.
pub fn map_list<T>(value: &Value, f: impl Fn(&Value) -> AppResult<T>) -> AppResult<Vec<T>> {
    list_items(value)?.iter().map(f).collect()
}
