//! Helper utilities for GraphQL request handling.

use log::warn;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;

use super::types::{AuthToken, CompanyId};
use crate::JoltError;

/// Header carrying the API token.
pub const AUTH_TOKEN_HEADER: &str = "jolt_auth_token";
/// Header carrying the company identifier.
pub const COMPANY_ID_HEADER: &str = "jolt_companyid";

/// Maximum number of characters to keep when logging response body snippets.
pub(crate) const BODY_SNIPPET_LEN: usize = 500;
/// Maximum number of characters to keep when logging request payload snippets.
pub(crate) const REQUEST_SNIPPET_LEN: usize = 1024;
/// Maximum number of characters to keep for individual value snippets.
pub(crate) const VALUE_SNIPPET_LEN: usize = 200;

/// Trim `text` to `max` characters, appending `...` when truncated.
///
/// Returns an empty string when `max` is zero.
pub(crate) fn snippet(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out = text.chars().take(max).collect::<String>();
        out.push_str("...");
        out
    }
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_ascii_lowercase().as_str(),
        "token"
            | "jolt_auth_token"
            | "auth_token"
            | "authorization"
            | "password"
            | "secret"
            | "api_key"
            | "apikey"
            | "credentials"
            | "jolt_companyid"
            | "company_id"
    )
}

/// Recursively redact credential-like values from a JSON structure.
pub(crate) fn redact_sensitive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (k, v) in map.iter_mut() {
                if is_sensitive_key(k) {
                    *v = Value::String("<redacted>".into());
                } else {
                    redact_sensitive(v);
                }
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(redact_sensitive),
        _ => {}
    }
}

/// Build a snippet of the redacted request payload.
pub(crate) fn payload_snippet(payload: &Value) -> String {
    let mut redacted = payload.clone();
    redact_sensitive(&mut redacted);
    let json = match serde_json::to_string(&redacted) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to serialise redacted payload: {e}");
            "<failed to serialise payload>".into()
        }
    };
    snippet(&json, REQUEST_SNIPPET_LEN)
}

/// Extract the operation name from a GraphQL query string.
///
/// Returns `None` when the input does not begin with a recognised operation
/// prefix or when no name is present.
pub(crate) fn operation_name(query: &str) -> Option<&str> {
    let trimmed = query.trim_start();
    for prefix in ["query", "mutation", "subscription"] {
        let Some(rest) = trimmed.strip_prefix(prefix) else {
            continue;
        };
        // "queryX" is a field selection, not an operation.
        if !rest.starts_with(|ch: char| ch == '{' || ch == '(' || ch.is_whitespace()) {
            continue;
        }
        return rest
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(' || c == '{')
            .next()
            .filter(|s| !s.is_empty());
    }
    None
}

fn credential_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
) -> Result<(), JoltError> {
    if value.is_empty() {
        warn!("{name} not set; sending the request without it");
        return Ok(());
    }
    let value = HeaderValue::from_str(value)
        .map_err(|source| JoltError::InvalidHeader { name, source })?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Build the JSON and credential headers sent with every request.
///
/// Empty credentials are left out so the request can go through an
/// authenticating proxy.
///
/// # Errors
///
/// Returns [`JoltError::InvalidHeader`] when a credential contains bytes that
/// are not valid in an HTTP header.
pub fn build_headers(token: &AuthToken, company: &CompanyId) -> Result<HeaderMap, JoltError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("jolt"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    credential_header(&mut headers, AUTH_TOKEN_HEADER, token.as_str())?;
    credential_header(&mut headers, COMPANY_ID_HEADER, company.as_str())?;
    Ok(headers)
}
