//! Extension message channel.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use crate::router::{Response, SenderContext};
use crate::state::AppState;

pub const EXTENSION_ID_HEADER: &str = "x-extension-id";
pub const TAB_ID_HEADER: &str = "x-tab-id";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/message", post(post_message))
}

/// POST /api/message — one request in, one response out.
///
/// The body is read raw so that an empty or unparseable body is answered by
/// the router like any other invalid message.
async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Response> {
    let message = serde_json::from_slice::<Value>(&body)
        .ok()
        .filter(|v| !v.is_null());
    let sender = sender_from_headers(&headers);
    Json(state.router.dispatch(message, sender).await)
}

/// Sender context from request headers. No extension id means no sender.
pub fn sender_from_headers(headers: &HeaderMap) -> Option<SenderContext> {
    let extension_id = header_str(headers, EXTENSION_ID_HEADER)?;
    let mut sender = SenderContext::new(extension_id);
    if let Some(tab_id) = header_str(headers, TAB_ID_HEADER).and_then(|t| t.parse().ok()) {
        sender = sender.with_tab(tab_id);
    }
    Some(sender)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_sender_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(sender_from_headers(&headers), None);

        headers.insert(EXTENSION_ID_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(sender_from_headers(&headers), Some(SenderContext::new("abc")));

        headers.insert(TAB_ID_HEADER, HeaderValue::from_static("42"));
        assert_eq!(
            sender_from_headers(&headers),
            Some(SenderContext::new("abc").with_tab(42))
        );

        headers.insert(TAB_ID_HEADER, HeaderValue::from_static("not-a-tab"));
        assert_eq!(sender_from_headers(&headers).unwrap().tab_id, None);
    }
}
