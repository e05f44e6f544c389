use serde_json::Value;

use super::wire::{FieldTable, WireRecord};
use crate::domain::{AuthTokens, AuthUser, Role};
use crate::shared::AppResult;

pub const USER_FIELDS: FieldTable = &[
    ("id", &["userID", "UserID", "userId", "UserId", "accountId", "AccountID", "id", "Id"]),
    ("email", &["email", "Email"]),
    ("name", &["fullName", "FullName", "name", "Name", "userName", "UserName"]),
    ("phone", &["phone", "Phone", "phoneNumber", "PhoneNumber"]),
    ("role", &["role", "Role", "roleName", "RoleName", "Role.Name"]),
    ("station_id", &["stationID", "StationID", "stationId", "StationId", "Station.StationID"]),
];

pub const TOKEN_FIELDS: FieldTable = &[
    ("access_token", &["accessToken", "AccessToken", "token", "Token", "access_token"]),
    ("refresh_token", &["refreshToken", "RefreshToken", "refresh_token"]),
    ("expires_in", &["expiresIn", "ExpiresIn", "expires_in"]),
];

/// Access tokens without an advertised lifetime are assumed to last an hour.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

pub fn user_from_wire(value: &Value) -> AppResult<AuthUser> {
    let rec = WireRecord::new(value, USER_FIELDS, "user")?;
    Ok(AuthUser {
        id: rec.required_string("id")?,
        email: rec.string("email"),
        name: rec.string("name"),
        phone: rec.string("phone"),
        role: rec
            .string("role")
            .map(|r| Role::parse(&r))
            .unwrap_or(Role::Customer),
        station_id: rec.string("station_id"),
    })
}

pub fn tokens_from_wire(value: &Value) -> AppResult<AuthTokens> {
    let rec = WireRecord::new(value, TOKEN_FIELDS, "token")?;
    Ok(AuthTokens::new(
        rec.required_string("access_token")?,
        rec.string("refresh_token"),
        rec.integer("expires_in").unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
    ))
}

/// A login response may embed the user profile next to the tokens.
pub fn embedded_user(value: &Value) -> Option<AuthUser> {
    let user = value.get("user").or_else(|| value.get("User"))?;
    user_from_wire(user).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn staff_profile() {
        let u = user_from_wire(&json!({
            "UserID": "U-1", "Email": "s@x.vn", "RoleName": "Employee", "StationID": "ST-7"
        }))
        .unwrap();
        assert_eq!(u.role, Role::Staff);
        assert_eq!(u.station_id.as_deref(), Some("ST-7"));
    }

    #[test]
    fn unknown_role_is_customer() {
        let u = user_from_wire(&json!({ "id": "U-2" })).unwrap();
        assert_eq!(u.role, Role::Customer);
    }

    #[test]
    fn tokens_with_default_lifetime() {
        let t = tokens_from_wire(&json!({ "Token": "abc", "RefreshToken": "def" })).unwrap();
        assert_eq!(t.access_token, "abc");
        assert_eq!(t.refresh_token.as_deref(), Some("def"));
        assert!(!t.is_expired());
    }

    #[test]
    fn embedded_user_is_optional() {
        assert!(embedded_user(&json!({ "token": "x" })).is_none());
        let u = embedded_user(&json!({ "token": "x", "user": { "id": "U-3", "role": "Admin" } }));
        assert_eq!(u.map(|u| u.role), Some(Role::Admin));
    }
}
