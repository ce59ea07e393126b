//! Signed session cookie.
//!
//! The cookie value is `<session-id>.<hex HMAC-SHA256(secret, session-id)>`.
//! Values whose signature does not verify are treated as absent.

use axum::http::header::{HeaderMap, COOKIE};
use axum::http::HeaderValue;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::time::Duration;
use subtle::ConstantTimeEq;

use crate::domain::foundation::SessionId;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SessionCookie {
    secret: SecretString,
    name: String,
    secure: bool,
    max_age: Duration,
}

impl SessionCookie {
    pub fn new(secret: SecretString, name: impl Into<String>, secure: bool, max_age: Duration) -> Self {
        Self {
            secret,
            name: name.into(),
            secure,
            max_age,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self, payload: &str) -> Vec<u8> {
        // HMAC accepts keys of any length
        let mut mac = match HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()) {
            Ok(mac) => mac,
            Err(_) => return Vec::new(),
        };
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Cookie value for a session.
    pub fn sign(&self, id: &SessionId) -> String {
        let payload = id.to_string();
        let signature = hex_encode(&self.signature(&payload));
        format!("{}.{}", payload, signature)
    }

    /// Session id from a cookie value, if the signature verifies.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (payload, signature) = value.rsplit_once('.')?;
        let provided = hex_decode(signature)?;
        let expected = self.signature(payload);
        if expected.is_empty() || expected.ct_eq(&provided).unwrap_u8() != 1 {
            return None;
        }
        payload.parse().ok()
    }

    /// Signed session id carried by the request, if any.
    pub fn read(&self, headers: &HeaderMap) -> Option<SessionId> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(|h| h.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == self.name)
            .find_map(|(_, value)| self.verify(value))
    }

    /// `Set-Cookie` value that starts a session.
    pub fn set(&self, id: &SessionId) -> HeaderValue {
        self.header(&self.sign(id), self.max_age.as_secs())
    }

    /// `Set-Cookie` value that removes the cookie.
    pub fn clear(&self) -> HeaderValue {
        self.header("", 0)
    }

    fn header(&self, value: &str, max_age: u64) -> HeaderValue {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        // Name and value are ASCII by construction
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

impl std::fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .field("secure", &self.secure)
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
