//! Resolved session snapshot types
//!
//! A [`ResolvedSession`] is a point-in-time view of a server-side session
//! together with the identities authenticated within it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session snapshot returned by the resolve endpoints.
///
/// The server guarantees `issued_at <= refreshed_at <= resolved_at`. The
/// client does not re-check the ordering, and `expires_at` may lie before
/// `resolved_at`; use [`ResolvedSession::is_expired_at`] for staleness.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSession {
    /// Server identifier
    pub id: String,
    /// Session id carried in the cookie
    pub sid: String,
    /// Authenticated identities, in server order
    pub identities: Vec<ResolvedIdentity>,
    /// Audience the session was issued for
    pub audience: String,
    /// When the session was created
    pub issued_at: DateTime<Utc>,
    /// Last refresh
    pub refreshed_at: DateTime<Utc>,
    /// Expiry time
    pub expires_at: DateTime<Utc>,
    /// When this snapshot was taken
    pub resolved_at: DateTime<Utc>,
}

impl ResolvedSession {
    /// Whether the session had expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Look up an identity by its id.
    pub fn identity(&self, id: &str) -> Option<&ResolvedIdentity> {
        self.identities.iter().find(|identity| identity.id == id)
    }
}

/// One authenticated principal within a session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIdentity {
    /// Server identifier
    pub id: String,
    /// When the identity joined the session
    pub assigned_at: DateTime<Utc>,
    /// User the identity belongs to
    pub user: String,
    /// Attributes, in server order
    pub data: Vec<ResolvedValue>,
}

impl ResolvedIdentity {
    /// First attribute with the given name, in server order.
    pub fn value(&self, name: &str) -> Option<&ResolvedValue> {
        self.data.iter().find(|value| value.name == name)
    }
}

/// Named attribute value attached to an identity.
///
/// `from` is the provenance tag assigned by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedValue {
    /// Attribute name
    pub name: String,
    /// Attribute payload, passed through untyped
    pub value: ClaimValue,
    /// Provenance tag
    pub from: String,
}

/// Attribute payload: string, number, boolean or null.
///
/// Numbers that fit an `i64` become [`ClaimValue::Integer`]; every other
/// JSON number (fractions, values beyond `i64`) is kept verbatim in
/// [`ClaimValue::Number`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    /// String value
    Text(String),
    /// Whole number within `i64`
    Integer(i64),
    /// Any other JSON number, unchanged
    Number(serde_json::Number),
    /// Boolean value
    Boolean(bool),
    /// Explicit `null` or a missing value
    Null,
}

impl ClaimValue {
    /// Map a JSON number without coercion.
    pub fn from_number(number: serde_json::Number) -> Self {
        number.as_i64().map_or(Self::Number(number), Self::Integer)
    }

    /// The string payload, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer payload, if it fits an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    /// Any numeric payload as `f64` (may lose precision).
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    /// The boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether the value was `null` or absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<ClaimValue>> From<Option<T>> for ClaimValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<ClaimValue> for serde_json::Value {
    fn from(value: ClaimValue) -> Self {
        match value {
            ClaimValue::Text(text) => Self::String(text),
            ClaimValue::Integer(n) => Self::from(n),
            ClaimValue::Number(number) => Self::Number(number),
            ClaimValue::Boolean(b) => Self::Bool(b),
            ClaimValue::Null => Self::Null,
        }
    }
}
