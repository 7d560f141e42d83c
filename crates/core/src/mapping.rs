//! Response mapping
//!
//! Turns decoded JSON bodies into domain types. Mapping is done by hand
//! over `serde_json::Value` rather than through derived `Deserialize` so
//! every failure names the JSON path that caused it, e.g.
//! `session.identities[1].assignedAt`.
//!
//! A missing or `null` `session` key is not an error: it means the
//! credential did not resolve to a session.

use chrono::{DateTime, NaiveDateTime, Utc};
use citadel_domain::{
    CitadelError, ClaimValue, MultiValueHeaders, Recommended, ResolveSessionResponse,
    ResolvedIdentity, ResolvedSession, ResolvedValue, Result, SessionResolveBearerResponse,
    SessionRevokeResponse,
};
use serde_json::{Map, Value};

const BODY: &str = "body";

/// Offset-carrying formats tried after RFC 3339.
const OFFSET_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Formats without an offset, read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a server timestamp into UTC.
///
/// Accepts RFC 3339 with any offset, `YYYY-MM-DD HH:MM:SS[.fff][offset]`
/// (no offset means UTC) and RFC 2822. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    DateTime::parse_from_rfc2822(raw).ok().map(|parsed| parsed.with_timezone(&Utc))
}

/// Decode a response body into JSON.
///
/// # Errors
/// Returns `CitadelError::MalformedResponse` if the body is not valid JSON.
pub fn parse_json_body(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body)
        .map_err(|e| CitadelError::malformed(BODY, format!("invalid JSON: {e}")))
}

/// Map a raw `session` object into a [`ResolvedSession`].
///
/// # Errors
/// Returns `CitadelError::MalformedResponse` naming the first field that is
/// missing, has the wrong type, or holds an unparsable timestamp.
pub fn map_resolved_session(raw: &Value) -> Result<ResolvedSession> {
    map_session_at(raw, "session".to_string())
}

/// Map the body of a `/sessions.resolve` response.
///
/// # Errors
/// Returns `CitadelError::MalformedResponse` if `recommended` is missing or
/// malformed, or if a present `session` is malformed.
pub fn map_resolve_response(body: &Value) -> Result<ResolveSessionResponse> {
    let fields = Fields::of(body, String::new())?;
    let session = optional_session(&fields)?;

    let recommended = fields.object("recommended")?;
    let recommended = Recommended {
        action: recommended.string("action")?,
        response_headers: recommended.headers("responseHeaders")?,
        reason: recommended.string("reason")?,
    };

    Ok(ResolveSessionResponse { session, recommended })
}

/// Map the body of a `/sessions.revoke` response.
///
/// # Errors
/// Returns `CitadelError::MalformedResponse` if `responseHeaders` is missing
/// or is not a mapping of header names to string arrays.
pub fn map_revoke_response(body: &Value) -> Result<SessionRevokeResponse> {
    let fields = Fields::of(body, String::new())?;
    Ok(SessionRevokeResponse { response_headers: fields.headers("responseHeaders")? })
}

/// Map the body of a `/sessions.resolveBearer` response.
///
/// # Errors
/// Returns `CitadelError::MalformedResponse` if a present `session` is
/// malformed.
pub fn map_resolve_bearer_response(body: &Value) -> Result<SessionResolveBearerResponse> {
    let fields = Fields::of(body, String::new())?;
    Ok(SessionResolveBearerResponse { session: optional_session(&fields)? })
}

fn optional_session(fields: &Fields<'_>) -> Result<Option<ResolvedSession>> {
    fields
        .optional("session")
        .map(|raw| map_session_at(raw, fields.path_of("session")))
        .transpose()
}

fn map_session_at(raw: &Value, path: String) -> Result<ResolvedSession> {
    let fields = Fields::of(raw, path)?;

    let identities = fields
        .array("identities")?
        .iter()
        .enumerate()
        .map(|(index, identity)| {
            map_identity(identity, format!("{}[{index}]", fields.path_of("identities")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedSession {
        id: fields.string("id")?,
        sid: fields.string("sid")?,
        identities,
        audience: fields.string("audience")?,
        issued_at: fields.timestamp("issuedAt")?,
        refreshed_at: fields.timestamp("refreshedAt")?,
        expires_at: fields.timestamp("expiresAt")?,
        resolved_at: fields.timestamp("resolvedAt")?,
    })
}

fn map_identity(raw: &Value, path: String) -> Result<ResolvedIdentity> {
    let fields = Fields::of(raw, path)?;

    let data = fields
        .array("data")?
        .iter()
        .enumerate()
        .map(|(index, value)| map_value(value, format!("{}[{index}]", fields.path_of("data"))))
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedIdentity {
        id: fields.string("id")?,
        assigned_at: fields.timestamp("assignedAt")?,
        user: fields.string("user")?,
        data,
    })
}

fn map_value(raw: &Value, path: String) -> Result<ResolvedValue> {
    let fields = Fields::of(raw, path)?;
    Ok(ResolvedValue {
        name: fields.string("name")?,
        value: fields.claim_value("value")?,
        from: fields.string("from")?,
    })
}

/// JSON object plus the path it was reached by, for error reporting.
struct Fields<'a> {
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn of(value: &'a Value, path: String) -> Result<Self> {
        match value.as_object() {
            Some(map) => Ok(Self { path, map }),
            None => {
                let field = if path.is_empty() { BODY.to_string() } else { path };
                Err(CitadelError::malformed(field, "expected a JSON object"))
            }
        }
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// Present, non-null value for `key`.
    fn optional(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    fn required(&self, key: &str) -> Result<&'a Value> {
        self.optional(key).ok_or_else(|| CitadelError::malformed(self.path_of(key), "missing"))
    }

    fn string(&self, key: &str) -> Result<String> {
        self.required(key)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CitadelError::malformed(self.path_of(key), "expected a string"))
    }

    fn array(&self, key: &str) -> Result<&'a Vec<Value>> {
        self.required(key)?
            .as_array()
            .ok_or_else(|| CitadelError::malformed(self.path_of(key), "expected an array"))
    }

    fn object(&self, key: &str) -> Result<Fields<'a>> {
        Fields::of(self.required(key)?, self.path_of(key))
    }

    fn timestamp(&self, key: &str) -> Result<DateTime<Utc>> {
        let raw = self.string(key)?;
        parse_timestamp(&raw).ok_or_else(|| {
            CitadelError::malformed(self.path_of(key), format!("invalid timestamp '{raw}'"))
        })
    }

    /// Absent and `null` both map to `ClaimValue::Null`.
    fn claim_value(&self, key: &str) -> Result<ClaimValue> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(ClaimValue::Null),
            Some(Value::String(text)) => Ok(ClaimValue::Text(text.clone())),
            Some(Value::Bool(flag)) => Ok(ClaimValue::Boolean(*flag)),
            Some(Value::Number(number)) => Ok(ClaimValue::from_number(number.clone())),
            Some(_) => Err(CitadelError::malformed(
                self.path_of(key),
                "expected a string, number, boolean or null",
            )),
        }
    }

    fn headers(&self, key: &str) -> Result<MultiValueHeaders> {
        let headers = self.object(key)?;
        headers
            .map
            .iter()
            .map(|(name, values)| {
                let values = values
                    .as_array()
                    .and_then(|values| {
                        values.iter().map(|v| v.as_str().map(str::to_string)).collect()
                    })
                    .ok_or_else(|| {
                        CitadelError::malformed(
                            headers.path_of(name),
                            "expected an array of strings",
                        )
                    })?;
                Ok((name.clone(), values))
            })
            .collect::<Result<Vec<(String, Vec<String>)>>>()
            .map(|pairs| pairs.into_iter().collect())
    }
}
