//! Handlers for stateless encoded links.
//!
//! The path segment is a base62 code of the destination without its scheme.
//! Nothing is looked up: the code is decoded and the client is sent on with a
//! permanent redirect.

use axum::{extract::Path, response::Redirect};
use serde_json::json;

use crate::api::middleware::tracing::record_namespace;
use crate::error::AppError;
use crate::utils::base62;

/// `GET /a/{code}` → 308 to `https://<decoded>`
///
/// # Errors
///
/// Returns 400 Bad Request if the code does not decode to a usable URL.
pub async fn encoded_https_handler(Path(code): Path<String>) -> Result<Redirect, AppError> {
    redirect_to("https://", &code)
}

/// `GET /at/{code}` → 308 to `http://<decoded>`
pub async fn encoded_http_handler(Path(code): Path<String>) -> Result<Redirect, AppError> {
    redirect_to("http://", &code)
}

fn redirect_to(scheme: &str, code: &str) -> Result<Redirect, AppError> {
    let target = base62::decode(code)?;

    // Control characters cannot go into a Location header.
    if target.chars().any(char::is_control) {
        return Err(AppError::invalid_encoding(
            "Invalid encoded URL",
            json!({ "reason": "decoded URL contains control characters" }),
        ));
    }

    record_namespace("encoded");
    Ok(Redirect::permanent(&format!("{scheme}{target}")))
}
