//! Failure responders for the request gate.
//!
//! Exactly one of these runs for a denied request, and it is terminal: the handler
//! is never reached. Bodies carry only the fixed message, never the verification
//! detail (expired vs. bad signature) or any internal error text.

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::Response;

use crate::api::extractors::AuthCtx;
use crate::error::{ACCESS_DENIED, AUTHENTICATION_REQUIRED, error_response};
use crate::services::auth::AccessDenial;

/// 401: no usable identity for a route that needs one.
pub fn authentication_failure(method: &Method, path: &str) -> Response {
    tracing::warn!(%method, path, "authentication required");

    let mut res = error_response(StatusCode::UNAUTHORIZED, AUTHENTICATION_REQUIRED);
    res.headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    res
}

/// 403: authenticated, but the principal lacks the role the rule requires.
pub fn authorization_failure(method: &Method, path: &str, ctx: &AuthCtx) -> Response {
    let username = ctx.principal().map(|p| p.username.as_str()).unwrap_or("-");
    tracing::warn!(%method, path, username, "access forbidden");

    error_response(StatusCode::FORBIDDEN, ACCESS_DENIED)
}

pub fn respond(denial: AccessDenial, method: &Method, path: &str, ctx: &AuthCtx) -> Response {
    match denial {
        AccessDenial::NotAuthenticated => authentication_failure(method, path),
        AccessDenial::InsufficientRole => authorization_failure(method, path, ctx),
    }
}
