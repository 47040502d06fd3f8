use hmac::{Hmac, Mac};
use http::header::{COOKIE, HeaderMap};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::session::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_SECRET};
use crate::session::errors::SessionError;
use crate::utils::{base64url_decode, base64url_encode, header_set_cookie};

type HmacSha256 = Hmac<Sha256>;

/// Fresh opaque correlator, regenerated on every callback.
pub fn new_session_correlator() -> String {
    Uuid::new_v4().to_string()
}

fn sign_correlator(correlator: &str) -> Result<String, SessionError> {
    let mut mac = HmacSha256::new_from_slice(&SESSION_SECRET)
        .map_err(|_| SessionError::Crypto("Invalid session secret".to_string()))?;
    mac.update(correlator.as_bytes());
    Ok(base64url_encode(&mac.finalize().into_bytes()))
}

fn verify_signed_value(value: &str) -> Result<Option<String>, SessionError> {
    // Signature is base64url and never contains '.', so the last dot splits
    // correlator from signature.
    let Some((correlator, signature)) = value.rsplit_once('.') else {
        return Ok(None);
    };
    let Ok(given) = base64url_decode(signature) else {
        return Ok(None);
    };

    let mut mac = HmacSha256::new_from_slice(&SESSION_SECRET)
        .map_err(|_| SessionError::Crypto("Invalid session secret".to_string()))?;
    mac.update(correlator.as_bytes());
    let expected = mac.finalize().into_bytes();

    if expected.ct_eq(given.as_slice()).into() {
        Ok(Some(correlator.to_string()))
    } else {
        tracing::warn!("Session cookie signature mismatch");
        Ok(None)
    }
}

/// Headers carrying the signed session cookie for a fresh login.
pub fn new_session_headers(correlator: &str) -> Result<HeaderMap, SessionError> {
    let value = format!("{}.{}", correlator, sign_correlator(correlator)?);
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &value,
        *SESSION_COOKIE_MAX_AGE as i64,
    )?;
    Ok(headers)
}

/// Headers that remove the session cookie. The user row and its token
/// material are left untouched.
pub fn clear_session_headers() -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(&mut headers, SESSION_COOKIE_NAME.as_str(), "", -86400)?;
    Ok(headers)
}

/// Extract and verify the session correlator from request headers.
///
/// A missing cookie, a malformed value, or a bad signature all yield
/// `None`; the caller treats those as anonymous.
pub fn session_from_headers(headers: &HeaderMap) -> Result<Option<String>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        return Ok(None);
    };

    let cookie_str = cookie_header.to_str().map_err(|e| {
        tracing::error!("Invalid cookie header: {}", e);
        SessionError::HeaderError("Invalid cookie header".to_string())
    })?;

    let cookie_name = SESSION_COOKIE_NAME.as_str();
    let value = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name => Some(v),
            _ => None,
        }
    });

    match value {
        Some(v) => verify_signed_value(v),
        None => Ok(None),
    }
}
