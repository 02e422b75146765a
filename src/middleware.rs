use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Response, StatusCode},
    middleware::Next,
};
use base64::{engine::general_purpose::STANDARD as base64, Engine};

use crate::AppState;

pub async fn basic_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Result<Response<Body>, StatusCode> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header.filter(|h| h.starts_with("Basic ")) else {
        return Ok(unauthorized());
    };

    let credentials = auth_header["Basic ".len()..].trim().to_string();

    let decoded = base64
        .decode(credentials)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let credentials = String::from_utf8(decoded).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let mut parts = credentials.splitn(2, ':');
    let username = parts.next().unwrap_or("");
    let password = parts.next().unwrap_or("");

    let username_ok = constant_time_eq(
        username.as_bytes(),
        state.config.dashboard_username.as_bytes(),
    );
    let password_ok = constant_time_eq(
        password.as_bytes(),
        state.config.dashboard_password.as_bytes(),
    );

    if username_ok && password_ok {
        Ok(next.run(request).await)
    } else {
        Ok(unauthorized())
    }
}

fn unauthorized() -> Response<Body> {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(
            "WWW-Authenticate",
            "Basic realm=\"Please enter your credentials\"",
        )
        .body(Body::empty())
        .unwrap()
}

/// Comparison time depends only on the submitted length, not on where the
/// first mismatch sits.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= (x ^ y) as usize;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;

    #[test]
    fn equal_inputs_compare_equal() {
        assert!(constant_time_eq(b"admin", b"admin"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn differing_inputs_compare_unequal() {
        assert!(!constant_time_eq(b"admin", b"admim"));
        assert!(!constant_time_eq(b"admin", b"admin1"));
        assert!(!constant_time_eq(b"admin", b""));
    }
}
