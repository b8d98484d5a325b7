use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use std::collections::HashMap;

pub const API_KEY_QUERY_PARAM: &str = "api_key";
pub const API_KEY_HEADER: &str = "x-api-key";

/// Pick the presented credential: `?api_key=`, then `X-API-Key`, then
/// `Authorization: Bearer`. The first non-empty value wins.
pub fn extract_credential<'a>(
    query: &'a HashMap<String, String>,
    headers: &'a HeaderMap,
) -> Option<&'a str> {
    query
        .get(API_KEY_QUERY_PARAM)
        .map(String::as_str)
        .filter(|key| !key.is_empty())
        .or_else(|| {
            headers
                .get(API_KEY_HEADER)
                .and_then(|value| value.to_str().ok())
                .filter(|key| !key.is_empty())
        })
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .filter(|key| !key.is_empty())
        })
}
