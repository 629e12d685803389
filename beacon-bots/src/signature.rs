//! Lanxin webhook request signing
//!
//! The signing key is `"{timestamp}@{secret}"`; the signature is the
//! base64-encoded HMAC-SHA256 of an empty message under that key. The same
//! timestamp must travel in the envelope's `timestamp` field.

use crate::{BotError, Result};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Signs outbound messages with a bot secret
#[derive(Clone)]
pub struct LanxinSigner {
    secret: String,
}

impl LanxinSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signature for a message sent at `timestamp` (unix seconds).
    pub fn sign(&self, timestamp: i64) -> Result<String> {
        sign(&self.secret, timestamp)
    }
}

impl fmt::Debug for LanxinSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanxinSigner")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Compute the signature for `secret` at `timestamp`.
pub fn sign(secret: &str, timestamp: i64) -> Result<String> {
    let key = format!("{}@{}", timestamp, secret);
    let mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| BotError::Signature(e.to_string()))?;
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Current unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
