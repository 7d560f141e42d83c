//! Request body signing
//!
//! Every request carries `x-citadel-sig`: the lowercase hex HMAC-SHA256 of
//! the request body keyed by the pre-shared key. The server recomputes it
//! over the bytes it received, so signing must run on the final serialized
//! body.

use std::fmt;

use citadel_domain::{CitadelError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex HMAC-SHA256 of `body` keyed by `secret`.
///
/// # Errors
/// Returns `CitadelError::Config` if `secret` is empty or cannot key the MAC.
pub fn sign(secret: &str, body: &[u8]) -> Result<String> {
    Ok(RequestSigner::new(secret)?.sign(body))
}

/// Signer bound to one pre-shared key.
///
/// The MAC is keyed once at construction, so signing itself cannot fail.
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacSha256,
}

impl RequestSigner {
    /// Create a signer for `pre_shared_key`.
    ///
    /// # Errors
    /// Returns `CitadelError::Config` if the key is empty or rejected by the
    /// MAC.
    pub fn new(pre_shared_key: &str) -> Result<Self> {
        if pre_shared_key.is_empty() {
            return Err(CitadelError::Config("pre-shared key must not be empty".into()));
        }
        let mac = HmacSha256::new_from_slice(pre_shared_key.as_bytes())
            .map_err(|e| CitadelError::Config(format!("invalid pre-shared key: {e}")))?;
        Ok(Self { mac })
    }

    /// Hex signature for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        hex::encode(self.digest(body))
    }

    /// Check `signature` against `body` in constant time.
    ///
    /// Returns `false` for signatures that are not valid hex.
    pub fn verify(&self, body: &[u8], signature: &str) -> bool {
        let Ok(provided) = hex::decode(signature) else {
            return false;
        };
        let expected = self.digest(body);
        expected.len() == provided.len() && bool::from(expected.ct_eq(&provided))
    }

    fn digest(&self, body: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner").field("key", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc4231_case_2() {
        // Key "Jefe", data "what do ya want for nothing?"
        assert_eq!(
            sign("Jefe", b"what do ya want for nothing?").unwrap(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_known_vector_for_json_body() {
        assert_eq!(
            sign("key", b"The quick brown fox jumps over the lazy dog").unwrap(),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_signer_matches_free_function() {
        let signer = RequestSigner::new("psk").unwrap();
        let body = br#"{"token":"abc"}"#;
        assert_eq!(signer.sign(body), sign("psk", body).unwrap());
        assert_eq!(signer.sign(body).len(), 64);
    }

    #[test]
    fn test_signature_depends_on_every_byte() {
        let signer = RequestSigner::new("psk").unwrap();
        assert_ne!(signer.sign(br#"{"token":"abc"}"#), signer.sign(br#"{"token": "abc"}"#));
    }

    #[test]
    fn test_verify() {
        let signer = RequestSigner::new("psk").unwrap();
        let body = b"payload";
        let signature = signer.sign(body);

        assert!(signer.verify(body, &signature));
        assert!(!signer.verify(b"payload2", &signature));
        assert!(!signer.verify(body, "not-hex"));
        assert!(!signer.verify(body, &signature[..10]));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(RequestSigner::new(""), Err(CitadelError::Config(_))));
        assert!(matches!(sign("", b"body"), Err(CitadelError::Config(_))));
    }

    #[test]
    fn test_signer_is_reusable_across_bodies() {
        let signer = RequestSigner::new("psk").unwrap();
        let first = signer.sign(b"one");
        assert_eq!(signer.sign(b"two"), sign("psk", b"two").unwrap());
        assert_eq!(signer.sign(b"one"), first);
    }

    #[test]
    fn test_debug_redacts_key() {
        let signer = RequestSigner::new("topsecret").unwrap();
        assert!(!format!("{signer:?}").contains("topsecret"));
    }
}
