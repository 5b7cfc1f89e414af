//! Redirect target construction.
//!
//! The login location is the original request URL with only its path
//! replaced, so scheme, host, port and query all survive the redirect.

use axum::http::{header::HOST, HeaderMap, Uri};
use url::Url;

pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Build the `Location` for a login redirect from the original request.
///
/// Absolute when the request carries an authority (absolute URI or `Host`
/// header), otherwise a relative path plus the original query.
pub fn login_location(uri: &Uri, headers: &HeaderMap, login_path: &str) -> String {
    if let Some(mut url) = original_url(uri, headers) {
        url.set_path(login_path);
        return url.to_string();
    }

    match uri.query() {
        Some(query) => format!("{}?{}", login_path, query),
        None => login_path.to_string(),
    }
}

fn original_url(uri: &Uri, headers: &HeaderMap) -> Option<Url> {
    let authority = uri
        .authority()
        .map(|a| a.as_str().to_string())
        .or_else(|| {
            headers
                .get(HOST)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        })?;

    let scheme = uri
        .scheme_str()
        .map(str::to_string)
        .or_else(|| {
            headers
                .get(X_FORWARDED_PROTO)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.split(',').next())
                .map(|s| s.trim().to_ascii_lowercase())
        })
        .filter(|s| s == "http" || s == "https")
        .unwrap_or_else(|| "http".to_string());

    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    Url::parse(&format!("{}://{}{}", scheme, authority, path_and_query)).ok()
}
