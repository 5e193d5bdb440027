//! Middleware for logging requests and responses.

use std::error::Error as _;

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;

use crate::session::SESSION_COOKIE;

/// Bodies longer than this many bytes are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body, in bytes, the middleware will buffer.
///
/// Matches the default limit of axum's `Json` extractor.
pub const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// The value of the session cookie is redacted since it is the only
/// credential a client has.
///
/// Requests with a body larger than [REQUEST_BODY_LIMIT] bytes get a
/// `413 Payload Too Large` response without reaching the handler.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_body(body, REQUEST_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) if is_length_limit_error(&error) => {
            tracing::warn!(
                "Request body for {} {} exceeds {REQUEST_BODY_LIMIT} bytes",
                parts.method,
                parts.uri
            );
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match read_body(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, limit).await
}

fn is_length_limit_error(error: &axum::Error) -> bool {
    error
        .source()
        .is_some_and(|source| source.is::<LengthLimitError>())
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    let headers = redact_session_cookie(&parts.headers);
    let method = &parts.method;
    let uri = &parts.uri;

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {method} {uri} {headers:#?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {method} {uri} {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    let headers = redact_session_cookie(&parts.headers);
    let status = parts.status;

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {status} {headers:#?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {status} {headers:#?}\nbody: {body:?}");
    }
}

/// Cut `body` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
fn truncate(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(body.len());

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

/// Copy `headers`, replacing the session cookie's value in any `Cookie` or
/// `Set-Cookie` header with asterisks.
fn redact_session_cookie(headers: &HeaderMap) -> HeaderMap {
    let mut redacted = headers.clone();

    for name in [COOKIE, SET_COOKIE] {
        let values: Vec<HeaderValue> = redacted
            .get_all(&name)
            .iter()
            .map(|value| match value.to_str() {
                Ok(text) => HeaderValue::from_str(&redact_cookie_text(text))
                    .unwrap_or_else(|_| HeaderValue::from_static("********")),
                Err(_) => HeaderValue::from_static("********"),
            })
            .collect();

        redacted.remove(&name);
        for value in values {
            redacted.append(&name, value);
        }
    }

    redacted
}

fn redact_cookie_text(cookie_text: &str) -> String {
    let cookie_start = format!("{SESSION_COOKIE}=");

    cookie_text
        .split(';')
        .map(|pair| {
            let trimmed = pair.trim_start();
            if trimmed.starts_with(&cookie_start) {
                let leading_whitespace = &pair[..pair.len() - trimmed.len()];
                format!("{leading_whitespace}{cookie_start}********")
            } else {
                pair.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}
