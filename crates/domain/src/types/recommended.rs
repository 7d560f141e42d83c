//! Recommended action types
//!
//! The resolve endpoint tells the caller how to answer the request that
//! carried the cookie: let it through, or redirect it, plus any headers
//! (typically `Set-Cookie` or `Location`) to attach to the response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Header name to ordered list of values.
///
/// Multi-valued headers such as `Set-Cookie` keep every value in the order
/// the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiValueHeaders(BTreeMap<String, Vec<String>>);

impl MultiValueHeaders {
    /// Empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values for `name`, matched exactly as the server spelled it.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Values for `name`, ignoring ASCII case.
    pub fn get_ignore_case(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    /// Whether a header named exactly `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Header names with their values, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no headers are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl From<BTreeMap<String, Vec<String>>> for MultiValueHeaders {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for MultiValueHeaders
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

/// Server's advice on how to answer the original client request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommended {
    /// e.g. "allow" or "redirect"
    pub action: String,
    /// Headers to set on the downstream response
    pub response_headers: MultiValueHeaders,
    /// Why the server chose `action`
    pub reason: String,
}

impl Recommended {
    /// Let the original request through.
    pub const ACTION_ALLOW: &'static str = "allow";
    /// Redirect the caller, usually to a login page.
    pub const ACTION_REDIRECT: &'static str = "redirect";

    /// Whether the action is `allow`.
    pub fn is_allow(&self) -> bool {
        self.action == Self::ACTION_ALLOW
    }

    /// Whether the action is `redirect`.
    pub fn is_redirect(&self) -> bool {
        self.action == Self::ACTION_REDIRECT
    }
}
