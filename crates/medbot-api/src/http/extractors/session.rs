//! Conversation session extractor.
//!
//! Reads the `medbot_session` cookie. A request without a valid one gets a
//! fresh UUID v7 id, which the handler hands back via `Set-Cookie`.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "medbot_session";

/// The conversation a request belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    /// True when the id was minted for this request.
    pub is_new: bool,
}

impl Session {
    /// `Set-Cookie` value for a freshly minted session.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.id
        ))
        .ok()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match session_from_headers(&parts.headers) {
            Some(id) => Session { id, is_new: false },
            None => Session {
                id: Uuid::now_v7().to_string(),
                is_new: true,
            },
        })
    }
}

/// Session id from the `Cookie` headers; values that are not UUIDs are ignored.
fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find_map(|value| Uuid::parse_str(value.trim()).ok())
        .map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_reads_session_among_other_cookies() {
        let id = Uuid::now_v7().to_string();
        let found = session_from_headers(&headers(&format!("theme=dark; {SESSION_COOKIE}={id}; x=1")));
        assert_eq!(found, Some(id));
    }

    #[test]
    fn test_ignores_malformed_or_missing_cookie() {
        assert_eq!(session_from_headers(&HeaderMap::new()), None);
        assert_eq!(session_from_headers(&headers("medbot_session=not-a-uuid")), None);
        assert_eq!(
            session_from_headers(&headers("medbot_session_old=0190b3a2-0000-7000-8000-000000000000")),
            None
        );
    }

    #[test]
    fn test_set_cookie_only_for_new_sessions() {
        let known = Session {
            id: "0190b3a2-0000-7000-8000-000000000000".to_string(),
            is_new: false,
        };
        assert!(known.set_cookie().is_none());

        let fresh = Session { is_new: true, ..known };
        let cookie = fresh.set_cookie().unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("medbot_session=0190b3a2-"));
        assert!(cookie.contains("HttpOnly"));
    }
}
