//! Webhook signature verification.
//!
//! The processor signs `"{timestamp}.{raw body}"` with HMAC-SHA256 under the
//! endpoint's signing secret and sends `t=<unix seconds>,v1=<hex digest>` in
//! the signature header. Several `v1` entries may be present while a secret
//! is being rolled; any one of them matching is sufficient.

use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use sha2::Sha256;
use thiserror::Error;

use crate::secrets::SecretString;

type HmacSha256 = Hmac<Sha256>;

/// Name of the HTTP header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Default tolerance between the signed timestamp and now.
pub const DEFAULT_TOLERANCE: SignedDuration = SignedDuration::from_secs(300);

const TIMESTAMP_KEY: &str = "t";
const SIGNATURE_SCHEME: &str = "v1";

/// Reasons a webhook signature is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature header is absent or blank.
    #[error("no signature header")]
    MissingHeader,

    /// The header carries no usable `t=` timestamp.
    #[error("unable to extract timestamp and signatures from header")]
    MalformedHeader,

    /// The header carries no `v1` signature.
    #[error("no signatures found with expected scheme")]
    NoSignatures,

    /// The signed timestamp is older than the tolerance.
    #[error("timestamp outside the tolerance zone")]
    TimestampOutsideTolerance,

    /// No `v1` signature matches the payload.
    #[error("no signatures found matching the expected signature for payload")]
    Mismatch,
}

/// Verifies processor webhook signatures against the shared signing secret.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
    tolerance: SignedDuration,
}

impl WebhookVerifier {
    /// Verifier for `secret`, refusing timestamps older than `tolerance`.
    #[must_use]
    pub fn new(secret: SecretString, tolerance: SignedDuration) -> Self {
        Self { secret, tolerance }
    }

    /// Verify `payload` against the signature `header` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns a [`SignatureError`] describing why the payload was rejected.
    pub fn verify(
        &self,
        payload: &[u8],
        header: &str,
        now: Timestamp,
    ) -> Result<(), SignatureError> {
        if header.trim().is_empty() {
            return Err(SignatureError::MissingHeader);
        }

        let parsed = ParsedHeader::parse(header)?;

        let signed_at = parsed
            .timestamp
            .parse::<i64>()
            .map_err(|_invalid| SignatureError::MalformedHeader)?;

        if now.as_second().saturating_sub(signed_at) > self.tolerance.as_secs() {
            return Err(SignatureError::TimestampOutsideTolerance);
        }

        let mac = self.mac(parsed.timestamp, payload)?;

        let matched = parsed
            .signatures
            .iter()
            .filter_map(|signature| hex::decode(signature).ok())
            .any(|signature| mac.clone().verify_slice(&signature).is_ok());

        if matched {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }

    /// Produce a header value the way the processor would for `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Mismatch`] if the secret cannot key the MAC.
    pub fn sign(&self, payload: &[u8], timestamp: Timestamp) -> Result<String, SignatureError> {
        let timestamp = timestamp.as_second().to_string();

        let digest = self.mac(&timestamp, payload)?.finalize().into_bytes();

        Ok(format!(
            "{TIMESTAMP_KEY}={timestamp},{SIGNATURE_SCHEME}={}",
            hex::encode(digest)
        ))
    }

    fn mac(&self, timestamp: &str, payload: &[u8]) -> Result<HmacSha256, SignatureError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose().as_bytes())
            .map_err(|_invalid| SignatureError::Mismatch)?;

        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);

        Ok(mac)
    }
}

#[derive(Debug)]
struct ParsedHeader<'h> {
    timestamp: &'h str,
    signatures: Vec<&'h str>,
}

impl<'h> ParsedHeader<'h> {
    fn parse(header: &'h str) -> Result<Self, SignatureError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for (key, value) in header
            .split(',')
            .filter_map(|item| item.split_once('='))
            .map(|(key, value)| (key.trim(), value.trim()))
        {
            match key {
                TIMESTAMP_KEY => timestamp = Some(value),
                SIGNATURE_SCHEME => signatures.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;

        if signatures.is_empty() {
            return Err(SignatureError::NoSignatures);
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}
