//! Front-door session authorization.
//!
//! A thin contract, deliberately minimal per `SPEC_FULL.md` §4.9: a missing
//! or unrecognized `connect.sid` cookie, or a Redis miss or connection
//! failure, all map to the same outcome — the request is unauthorized. No
//! retry, no caching beyond what the `redis` crate's own connection manager
//! already does.

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use redis::aio::ConnectionManager;

use crate::config::SessionConfig;

/// Looks up `connect.sid` session cookies in Redis.
pub struct SessionGate {
    prefix: String,
    manager: ConnectionManager,
}

impl SessionGate {
    /// Connects to the configured Redis instance. Fails fast at startup if
    /// the initial connection can't be established.
    pub async fn connect(config: &SessionConfig) -> Result<Self, redis::RedisError> {
        let url = format!("redis://{}:{}", config.redis_host, config.redis_port);
        let client = redis::Client::open(url)?;
        let manager = client.get_connection_manager().await?;
        Ok(Self {
            prefix: config.redis_prefix.clone(),
            manager,
        })
    }

    /// `true` if `cookie_header` carries a `connect.sid` cookie that
    /// resolves to a live session key in Redis.
    pub async fn authorize(&self, cookie_header: Option<&str>) -> bool {
        let Some(header) = cookie_header else {
            return false;
        };
        let Some(raw_value) = extract_cookie(header, "connect.sid") else {
            return false;
        };
        let Some(session_id) = decode_session_id(raw_value) else {
            return false;
        };

        let key = format!("{}:{session_id}", self.prefix);
        let mut conn = self.manager.clone();
        matches!(
            redis::cmd("EXISTS")
                .arg(&key)
                .query_async::<bool>(&mut conn)
                .await,
            Ok(true)
        )
    }
}

/// Finds `name=value` in a `Cookie:` header's `;`-separated list.
fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let pair = pair.trim();
        pair.strip_prefix(name).and_then(|rest| rest.strip_prefix('='))
    })
}

/// Strips the `s:` (or percent-encoded `s%3A`) signed-cookie prefix and the
/// trailing `.`-delimited HMAC signature, leaving the bare session id.
fn decode_session_id(raw: &str) -> Option<&str> {
    let unsigned = raw.strip_prefix("s:").or_else(|| raw.strip_prefix("s%3A"))?;
    Some(unsigned.rsplit_once('.').map_or(unsigned, |(id, _sig)| id))
}

/// Axum middleware: 401s any request whose cookie doesn't [`SessionGate::authorize`].
pub async fn require_session(
    State(gate): State<std::sync::Arc<SessionGate>>,
    request: Request,
    next: Next,
) -> Response {
    let cookie_header = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok());

    if gate.authorize(cookie_header).await {
        next.run(request).await
    } else {
        Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body(axum::body::Body::empty())
            .expect("static response is well-formed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_cookie_finds_named_cookie_among_several() {
        let header = "foo=bar; connect.sid=s%3Aabc123.signature; other=baz";
        assert_eq!(
            extract_cookie(header, "connect.sid"),
            Some("s%3Aabc123.signature")
        );
    }

    #[test]
    fn extract_cookie_absent_is_none() {
        assert_eq!(extract_cookie("foo=bar", "connect.sid"), None);
    }

    #[test]
    fn decode_session_id_strips_prefix_and_signature() {
        assert_eq!(decode_session_id("s:abc123.sig"), Some("abc123"));
        assert_eq!(decode_session_id("s%3Aabc123.sig"), Some("abc123"));
    }

    #[test]
    fn decode_session_id_without_signature_still_strips_prefix() {
        assert_eq!(decode_session_id("s:abc123"), Some("abc123"));
    }

    #[test]
    fn decode_session_id_without_s_prefix_is_none() {
        assert_eq!(decode_session_id("abc123.sig"), None);
    }
}
