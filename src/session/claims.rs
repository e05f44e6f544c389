//! Read-only view of bearer-token claims
//!
//! The portal never holds the signing key, so tokens are decoded without
//! signature verification. The backend remains the authority.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use crate::domain::{AuthUser, Role};
use crate::shared::{AppError, AppResult};

const SUBJECT_CLAIMS: &[&str] = &[
    "sub",
    "nameid",
    "UserId",
    "userId",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
];
const ROLE_CLAIMS: &[&str] = &[
    "role",
    "Role",
    "roles",
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
];
const STATION_CLAIMS: &[&str] = &[
    "stationId",
    "StationId",
    "StationID",
    "stationID",
    "station_id",
];
const EMAIL_CLAIMS: &[&str] = &[
    "email",
    "Email",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
];
const NAME_CLAIMS: &[&str] = &[
    "name",
    "unique_name",
    "FullName",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims {
    pub subject: Option<String>,
    pub role: Option<Role>,
    pub station_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Minimal user built from the token alone, if it names a subject.
    pub fn to_user(&self) -> Option<AuthUser> {
        let id = self.subject.clone()?;
        Some(AuthUser {
            id,
            email: self.email.clone(),
            name: self.name.clone(),
            phone: None,
            role: self.role.unwrap_or(Role::Customer),
            station_id: self.station_id.clone(),
        })
    }
}

/// Decode the payload of a JWT without checking its signature or expiry.
pub fn decode_claims(token: &str) -> AppResult<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<HashMap<String, Value>>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| AppError::Decode(format!("Invalid bearer token: {}", e)))?;
    let claims = data.claims;

    let pick = |names: &[&str]| -> Option<String> {
        names
            .iter()
            .find_map(|name| claims.get(*name).and_then(claim_to_string))
    };

    Ok(TokenClaims {
        subject: pick(SUBJECT_CLAIMS),
        role: pick(ROLE_CLAIMS).map(|r| Role::parse(&r)),
        station_id: pick(STATION_CLAIMS),
        email: pick(EMAIL_CLAIMS),
        name: pick(NAME_CLAIMS),
        expires_at: claims
            .get("exp")
            .and_then(Value::as_i64)
            .and_then(|ts| DateTime::from_timestamp(ts, 0)),
    })
}

fn claim_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        // multi-role tokens carry an array; the first entry wins
        Value::Array(items) => items.iter().find_map(claim_to_string),
        _ => None,
    }
}
