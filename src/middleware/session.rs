// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie middleware.
//!
//! Every request gets a `CurrentSession` extension holding the caller's live
//! session, if its signed cookie names one. No session is created here: a
//! handler that records state starts one and returns its `SessionId` as a
//! response extension, and the new cookie is set on the way out.

use crate::services::{CurrentSession, SessionId};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "studentfit_session";

/// Attach the caller's session and issue a cookie for any session a handler
/// started.
pub async fn with_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let key = &state.config.session_signing_key;

    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| verify_session_cookie(cookie.value(), key))
        .filter(|id| state.sessions.touch(id))
        .map(SessionId);

    request
        .extensions_mut()
        .insert(CurrentSession(existing.clone()));
    let mut response = next.run(request).await;

    let started = response
        .extensions()
        .get::<SessionId>()
        .filter(|id| existing.as_ref() != Some(*id))
        .cloned();

    if let Some(id) = started {
        let Some(value) = sign_session_id(id.as_str(), key) else {
            tracing::error!("Failed to sign session id");
            return response;
        };

        let cookie = session_cookie(value, state.config.secure_cookies());
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(header_value) => {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, header_value);
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode session cookie"),
        }
    }

    response
}

/// Build the session cookie with the attributes used for both set and removal.
pub fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie value `"<id>.<hex hmac>"`.
pub fn sign_session_id(id: &str, key: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(id.as_bytes());
    Some(format!("{}.{}", id, hex::encode(mac.finalize().into_bytes())))
}

/// Return the session id if the cookie's signature matches.
pub fn verify_session_cookie(value: &str, key: &[u8]) -> Option<String> {
    let (id, signature_hex) = value.rsplit_once('.')?;
    let signature = hex::decode(signature_hex).ok()?;

    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(id.as_bytes());
    let expected = mac.finalize().into_bytes();

    if expected.as_slice().ct_eq(&signature).into() {
        Some(id.to_string())
    } else {
        tracing::warn!("Session cookie signature mismatch");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let key = b"secret_key";
        let signed = sign_session_id("abc123", key).unwrap();
        assert!(signed.starts_with("abc123."));
        assert_eq!(verify_session_cookie(&signed, key), Some("abc123".to_string()));
    }

    #[test]
    fn test_verify_wrong_key() {
        let signed = sign_session_id("abc123", b"secret_key").unwrap();
        assert_eq!(verify_session_cookie(&signed, b"wrong_key"), None);
    }

    #[test]
    fn test_verify_tampered_id() {
        let signed = sign_session_id("abc123", b"secret_key").unwrap();
        let tampered = signed.replacen("abc123", "abc124", 1);
        assert_eq!(verify_session_cookie(&tampered, b"secret_key"), None);
    }

    #[test]
    fn test_verify_malformed() {
        assert_eq!(verify_session_cookie("no-signature", b"k"), None);
        assert_eq!(verify_session_cookie("abc.nothex", b"k"), None);
        assert_eq!(verify_session_cookie("abc.", b"k"), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("v".to_string(), false).to_string();
        assert!(cookie.starts_with("studentfit_session=v"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));

        let secure = session_cookie("v".to_string(), true).to_string();
        assert!(secure.contains("Secure"));
    }
}
