//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Form fields whose values must never be written to the logs.
const REDACTED_FIELDS: [&str; 1] = ["password"];

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Passwords in submitted forms are redacted. Bodies that are not text, e.g.
/// the PDF export, are passed through untouched and only their size is logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let body_text = describe_body(&parts.headers, &body_bytes);
    let body_text = if is_form(&parts.headers) {
        redact_form_fields(&body_text, &REDACTED_FIELDS)
    } else {
        body_text
    };
    log_message("Received request", &format!("{parts:#?}"), &body_text);

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_message(
        "Sending response",
        &format!("{parts:#?}"),
        &describe_body(&parts.headers, &body_bytes),
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn is_form(headers: &HeaderMap) -> bool {
    content_type(headers).starts_with("application/x-www-form-urlencoded")
}

fn is_text(headers: &HeaderMap) -> bool {
    let content_type = content_type(headers);

    content_type.is_empty()
        || content_type.starts_with("text/")
        || content_type.starts_with("application/x-www-form-urlencoded")
        || content_type.starts_with("application/json")
}

/// The loggable form of a body: its text, or its size if it is binary.
fn describe_body(headers: &HeaderMap, body: &Bytes) -> String {
    if is_text(headers) {
        String::from_utf8_lossy(body).into_owned()
    } else {
        format!("<{} bytes of {}>", body.len(), content_type(headers))
    }
}

/// Replace the value of each of `fields` in URL encoded `form_text` with asterisks.
fn redact_form_fields(form_text: &str, fields: &[&str]) -> String {
    form_text
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if fields.contains(&key) => format!("{key}=********"),
            _ => pair.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn log_message(prefix: &str, parts: &str, body: &str) {
    match body.char_indices().nth(LOG_BODY_LENGTH_LIMIT) {
        Some((end, _)) => {
            tracing::info!("{prefix}: {parts}\nbody: {}...", &body[..end]);
            tracing::debug!("Full body: {body:?}");
        }
        None => tracing::info!("{prefix}: {parts}\nbody: {body:?}"),
    }
}
