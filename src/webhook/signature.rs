//! HMAC-SHA256 webhook signature verification

use crate::error::{AppError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying `sha256=<hex digest>`
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

const SIGNATURE_PREFIX: &str = "sha256=";

fn mac_for(secret: &[u8], payload: &[u8]) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(payload);
    Ok(mac)
}

/// Header value GitHub would send for `payload` signed with `secret`
pub fn sign_payload(secret: &[u8], payload: &[u8]) -> Result<String> {
    let digest = mac_for(secret, payload)?.finalize().into_bytes();
    Ok(format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest)))
}

/// Check `header` against the HMAC of `payload`, in constant time
pub fn verify_signature(secret: &[u8], header: Option<&str>, payload: &[u8]) -> Result<()> {
    let header = header
        .ok_or_else(|| AppError::InvalidSignature(format!("missing {} header", SIGNATURE_HEADER)))?;

    let hex_digest = header
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or_else(|| AppError::InvalidSignature("unsupported signature algorithm".to_string()))?;

    let expected = hex::decode(hex_digest)
        .map_err(|_| AppError::InvalidSignature("signature is not valid hex".to_string()))?;

    mac_for(secret, payload)?
        .verify_slice(&expected)
        .map_err(|_| AppError::InvalidSignature("payload signature mismatch".to_string()))
}
