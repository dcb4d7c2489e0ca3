use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use resolver_cli::ExtractedPost;
use serde_json::json;
use tracing::info;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::state::AppState;

pub const ROUTES: [&str; 3] = ["/", "/healthz", "/post"];

/// Last `url` value in the query string; repeated keys do not fail the request.
fn url_param(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .filter(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .last()
}

/// GET / ; forwards `?url=` to `/post`, otherwise describes the service.
pub async fn root(RawQuery(query): RawQuery) -> Response {
    match url_param(query.as_deref()).filter(|url| !url.is_empty()) {
        Some(url) => {
            let forwarded = form_urlencoded::Serializer::new(String::new())
                .append_pair("url", &url)
                .finish();
            Redirect::temporary(&format!("/post?{forwarded}")).into_response()
        }
        None => Json(json!({ "ok": true, "routes": ROUTES })).into_response(),
    }
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// GET /post?url=...
pub async fn get_post(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ExtractedPost>, ApiError> {
    let url = url_param(query.as_deref())
        .ok_or_else(|| ApiError::Validation("missing required query parameter `url`".into()))?;
    if url.is_empty() {
        return Err(ApiError::Validation("query parameter `url` must not be empty".into()));
    }

    let post = state.resolver.resolve(&url).await?;
    info!(%url, source = ?post.source, chars = post.text_len(), "post resolved");
    Ok(Json(post))
}
