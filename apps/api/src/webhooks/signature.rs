//! Verification of signed identity-provider webhooks (svix scheme).
//!
//! The signature is `v1,` + base64(HMAC-SHA256(key, "{id}.{timestamp}.{body}")),
//! where the key is the base64 part of the `whsec_` secret. The signature header
//! may carry several space-separated signatures; one match is enough.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SECRET_PREFIX: &str = "whsec_";
const SIGNATURE_VERSION: &str = "v1";
/// Maximum allowed distance between the signed timestamp and now.
pub const TOLERANCE_SECS: i64 = 5 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("webhook secret is not valid base64")]
    InvalidSecret,

    #[error("webhook timestamp is not a unix timestamp")]
    InvalidTimestamp,

    #[error("webhook timestamp is outside the allowed tolerance")]
    TimestampOutOfTolerance,

    #[error("no matching signature found")]
    NoMatch,
}

#[derive(Clone)]
pub struct WebhookVerifier {
    keyed: HmacSha256,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier").finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    pub fn new(secret: &str) -> Result<Self, SignatureError> {
        let encoded = secret.trim();
        let encoded = encoded.strip_prefix(SECRET_PREFIX).unwrap_or(encoded);
        let key = STANDARD
            .decode(encoded)
            .map_err(|_| SignatureError::InvalidSecret)?;
        if key.is_empty() {
            return Err(SignatureError::InvalidSecret);
        }
        let keyed = HmacSha256::new_from_slice(&key).map_err(|_| SignatureError::InvalidSecret)?;
        Ok(Self { keyed })
    }

    fn mac(&self, id: &str, timestamp: &str, body: &[u8]) -> HmacSha256 {
        let mut mac = self.keyed.clone();
        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);
        mac
    }

    /// `v1,<base64>` signature for the given message.
    pub fn sign(&self, id: &str, timestamp: i64, body: &[u8]) -> String {
        let digest = self
            .mac(id, &timestamp.to_string(), body)
            .finalize()
            .into_bytes();
        format!("{SIGNATURE_VERSION},{}", STANDARD.encode(digest))
    }

    /// Checks the timestamp against `now` (unix seconds) and then the signatures.
    pub fn verify(
        &self,
        id: &str,
        timestamp: &str,
        signatures: &str,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let ts: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SignatureError::InvalidTimestamp)?;
        if now.abs_diff(ts) > TOLERANCE_SECS.unsigned_abs() {
            return Err(SignatureError::TimestampOutOfTolerance);
        }

        let mac = self.mac(id, timestamp.trim(), body);
        let matched = signatures
            .split_whitespace()
            .filter_map(|sig| sig.split_once(','))
            .filter(|(version, _)| *version == SIGNATURE_VERSION)
            .filter_map(|(_, encoded)| STANDARD.decode(encoded).ok())
            .any(|expected| mac.clone().verify_slice(&expected).is_ok());

        if matched {
            Ok(())
        } else {
            Err(SignatureError::NoMatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64("test-webhook-signing-key")
    const SECRET: &str = "whsec_dGVzdC13ZWJob29rLXNpZ25pbmcta2V5";
    const NOW: i64 = 1_700_000_000;
    const BODY: &[u8] = br#"{"type":"user.created","data":{"id":"user_1"}}"#;

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(SECRET).unwrap()
    }

    #[test]
    fn test_signed_message_verifies() {
        let v = verifier();
        let sig = v.sign("msg_1", NOW, BODY);
        assert!(sig.starts_with("v1,"));
        assert_eq!(v.verify("msg_1", &NOW.to_string(), &sig, BODY, NOW), Ok(()));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let v = verifier();
        let sig = v.sign("msg_1", NOW, BODY);
        let result = v.verify("msg_1", &NOW.to_string(), &sig, b"{}", NOW);
        assert_eq!(result, Err(SignatureError::NoMatch));
    }

    #[test]
    fn test_any_listed_signature_may_match() {
        let v = verifier();
        let sig = v.sign("msg_1", NOW, BODY);
        let header = format!("v1,AAAA v2,whatever {sig}");
        assert!(v.verify("msg_1", &NOW.to_string(), &header, BODY, NOW).is_ok());
    }

    #[test]
    fn test_timestamp_tolerance() {
        let v = verifier();
        let old = NOW - TOLERANCE_SECS - 1;
        let sig = v.sign("msg_1", old, BODY);
        assert_eq!(
            v.verify("msg_1", &old.to_string(), &sig, BODY, NOW),
            Err(SignatureError::TimestampOutOfTolerance)
        );
        assert_eq!(
            v.verify("msg_1", "yesterday", &sig, BODY, NOW),
            Err(SignatureError::InvalidTimestamp)
        );
    }

    #[test]
    fn test_extreme_timestamps_out_of_tolerance() {
        let v = verifier();
        for ts in [i64::MIN, i64::MAX] {
            assert_eq!(
                v.verify("msg_1", &ts.to_string(), "v1,AAAA", b"{}", NOW),
                Err(SignatureError::TimestampOutOfTolerance)
            );
        }
        assert_eq!(
            v.verify("msg_1", "-9223372036854775808", "v1,AAAA", b"{}", NOW),
            Err(SignatureError::TimestampOutOfTolerance)
        );
    }

    #[test]
    fn test_invalid_secret() {
        assert!(matches!(
            WebhookVerifier::new("whsec_***"),
            Err(SignatureError::InvalidSecret)
        ));
    }
}
