//! PascalCase → camelCase re-shaping of backend payloads

use serde_json::{Map, Value};

/// Lower-case the first character: `StationID` → `stationID`.
pub fn camel_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rename object keys recursively. When both `Name` and `name` exist the
/// one already in camelCase wins.
pub fn camelize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                let camel = camel_key(&key);
                if camel != key && out.contains_key(&camel) {
                    continue;
                }
                out.insert(camel, camelize_keys(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(camelize_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_keys_are_renamed() {
        let value = json!({
            "BookingID": "BK-1",
            "Customer": { "FullName": "A", "Vehicles": [{ "PlateNumber": "59A" }] },
            "status": "Pending",
        });
        assert_eq!(
            camelize_keys(value),
            json!({
                "bookingID": "BK-1",
                "customer": { "fullName": "A", "vehicles": [{ "plateNumber": "59A" }] },
                "status": "Pending",
            })
        );
    }

    #[test]
    fn existing_camel_key_is_kept() {
        let value = json!({ "name": "kept", "Name": "dropped" });
        assert_eq!(camelize_keys(value), json!({ "name": "kept" }));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(camelize_keys(json!("Text")), json!("Text"));
        assert_eq!(camel_key(""), "");
    }
}
