//! Page and API handlers

use axum::{
    extract::{Path, RawQuery, State},
    http::{
        header::{self, HeaderMap, HeaderValue},
        StatusCode, Uri,
    },
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{AppError, AppState};
use crate::content::Post;
use crate::helpers::url_for;
use crate::pages::{self, RenderMode, Rendered, Site};
use crate::store::{self, ListingQuery, ViewMode};
use crate::theme::{self, Preferences, THEME_COOKIE, VIEW_COOKIE};

/// Client hint carrying the visitor's colour scheme
const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

type PageResult = Result<Response, AppError>;

fn header_str<'a>(headers: &'a HeaderMap, name: impl header::AsHeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn preferences(headers: &HeaderMap) -> Preferences {
    Preferences::from_cookie_header(header_str(headers, header::COOKIE))
}

/// Render a page with the visitor's preferences
///
/// `view` is an explicit view mode from the URL, which wins over the cookie.
fn render<F>(state: &AppState, headers: &HeaderMap, view: Option<ViewMode>, page: F) -> PageResult
where
    F: FnOnce(&Site) -> crate::error::Result<Rendered>,
{
    let snapshot = state.snapshot();

    let prefs = preferences(headers);
    let prefers_dark = theme::prefers_dark(header_str(headers, PREFERS_COLOR_SCHEME));
    let mode = RenderMode::Live {
        theme: prefs.resolved_theme(prefers_dark),
        view: view.unwrap_or_else(|| prefs.resolved_view()),
        live_reload: state.live_reload,
    };

    let site = Site::new(
        &snapshot.blog.config,
        &snapshot.i18n,
        &snapshot.store,
        &state.renderer,
        mode,
    );
    let rendered = page(&site)?;
    Ok(html_response(rendered))
}

fn html_response(page: Rendered) -> Response {
    let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::OK);
    let mut response = (status, Html(page.html)).into_response();
    let headers = response.headers_mut();
    headers.insert(header::VARY, HeaderValue::from_static("Cookie"));
    headers.insert(
        "accept-ch",
        HeaderValue::from_static("Sec-CH-Prefers-Color-Scheme"),
    );
    response
}

pub(super) async fn home_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> PageResult {
    render(&state, &headers, None, pages::home)
}

pub(super) async fn archive_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> PageResult {
    let query = ListingQuery::parse(raw.as_deref().unwrap_or_default());
    render(&state, &headers, query.view, |site| pages::archive(site, &query))
}

pub(super) async fn search_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> PageResult {
    let query = ListingQuery::parse(raw.as_deref().unwrap_or_default());
    render(&state, &headers, query.view, |site| pages::search(site, &query))
}

pub(super) async fn about_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> PageResult {
    render(&state, &headers, None, pages::about)
}

pub(super) async fn post_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> PageResult {
    render(&state, &headers, None, |site| pages::post(site, &slug))
}

pub(super) async fn not_found_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> PageResult {
    tracing::debug!("No route for {}", uri.path());
    render(&state, &headers, None, |site| pages::not_found(site, uri.path()))
}

/// Post metadata, optionally filtered and sorted by a listing query
pub(super) async fn api_posts(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Json<Vec<Post>> {
    let query = ListingQuery::parse(raw.as_deref().unwrap_or_default());
    let snapshot = state.snapshot();
    let posts = store::sorted(snapshot.store.filter(&query.to_filter()), query.sort, query.order);
    Json(posts.into_iter().map(Post::meta).collect())
}

/// One full post, or a 404 JSON error
pub(super) async fn api_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let snapshot = state.snapshot();
    match snapshot.store.get_by_slug(&slug) {
        Some(post) => Json(post.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "post not found", "slug": slug })),
        )
            .into_response(),
    }
}

pub(super) async fn search_json(State(state): State<Arc<AppState>>) -> Json<Vec<pages::SearchEntry>> {
    let snapshot = state.snapshot();
    Json(pages::search_index(&snapshot.blog.config, &snapshot.store))
}

/// Flip the theme cookie and go back
pub(super) async fn toggle_theme(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let prefers_dark = theme::prefers_dark(header_str(&headers, PREFERS_COLOR_SCHEME));
    let next = preferences(&headers).resolved_theme(prefers_dark).toggle();
    redirect_back(&state, &headers, THEME_COOKIE, &next.to_string())
}

/// Flip the listing view cookie and go back
pub(super) async fn toggle_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let next = preferences(&headers).resolved_view().toggle();
    redirect_back(&state, &headers, VIEW_COOKIE, &next.to_string())
}

fn redirect_back(state: &AppState, headers: &HeaderMap, cookie: &str, value: &str) -> Response {
    let home = url_for(&state.snapshot().blog.config, "/");
    let location = back_path(header_str(headers, header::REFERER)).unwrap_or(home);

    let mut response = StatusCode::SEE_OTHER.into_response();
    let headers = response.headers_mut();
    if let Ok(location) = HeaderValue::from_str(&location) {
        headers.insert(header::LOCATION, location);
    }
    if let Ok(cookie) = HeaderValue::from_str(&theme::set_cookie(cookie, value)) {
        headers.insert(header::SET_COOKIE, cookie);
    }
    response
}

/// Path and query of a Referer, so redirects never leave the site
fn back_path(referer: Option<&str>) -> Option<String> {
    let referer = referer?.trim();
    let rest = match referer.split_once("://") {
        Some((_, rest)) => rest,
        None if referer.starts_with('/') && !referer.starts_with("//") => return Some(referer.to_string()),
        None => return None,
    };
    let path = rest.find('/').map(|i| &rest[i..]).unwrap_or("/");
    // "//host" would be followed as a protocol-relative URL
    Some(format!("/{}", path.trim_start_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::state;
    use super::*;
    use tempfile::TempDir;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn cookie_headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_home_page_uses_theme_cookie() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let response = home_page(State(state), cookie_headers("theme=dark"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains(r#"class="dark""#));
        assert!(body.contains("/post/responsive-design-guide"));
    }

    #[tokio::test]
    async fn test_prefers_dark_hint_without_cookie() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let mut headers = HeaderMap::new();
        headers.insert(PREFERS_COLOR_SCHEME, HeaderValue::from_static("dark"));
        let body = body_string(home_page(State(state), headers).await.unwrap()).await;
        assert!(body.contains(r#"class="dark""#));
    }

    #[tokio::test]
    async fn test_archive_query_view_overrides_cookie() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let response = archive_page(
            State(state),
            cookie_headers("view=grid"),
            RawQuery(Some("view=list".to_string())),
        )
        .await
        .unwrap();
        let body = body_string(response).await;
        assert!(body.contains(r#"data-view="list""#));
    }

    #[tokio::test]
    async fn test_unknown_post_is_404() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let response = post_page(State(state), HeaderMap::new(), Path("nope".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_escaped() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let slug = "\"><script>alert(1)</script>".to_string();
        let response = post_page(State(state), HeaderMap::new(), Path(slug))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(!body.contains("<script>alert(1)</script>"));
        assert!(body.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"));
    }

    #[tokio::test]
    async fn test_search_query_is_escaped() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let response = search_page(
            State(state),
            HeaderMap::new(),
            RawQuery(Some("q=%22%3E%3Cimg%20src%3Dx%3E&tag=%3Cb%3E".to_string())),
        )
        .await
        .unwrap();
        let body = body_string(response).await;
        assert!(!body.contains("<img src=x>"));
        assert!(!body.contains("<b>"));
    }

    #[tokio::test]
    async fn test_fallback_is_404() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let uri: Uri = "/no/such/page".parse().unwrap();
        let response = not_found_page(State(state), HeaderMap::new(), uri)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_posts_filters_and_strips_content() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let Json(posts) = api_posts(State(state), RawQuery(Some("tag=Python".to_string()))).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "python-data-analysis");
        assert!(posts[0].content.is_empty());
    }

    #[tokio::test]
    async fn test_api_post_found_and_missing() {
        let tmp = TempDir::new().unwrap();
        let state = state(
            tmp.path(),
            &[("hello", "---\ntitle: Hello\ndate: 2024-03-01\n---\nHi **there**")],
        );

        let found = api_post(State(Arc::clone(&state)), Path("hello".to_string())).await;
        assert_eq!(found.status(), StatusCode::OK);
        let body = body_string(found).await;
        assert!(body.contains("<strong>there</strong>"));

        let missing = api_post(State(state), Path("nope".to_string())).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body = body_string(missing).await;
        assert!(body.contains(r#""error":"post not found""#));
    }

    #[tokio::test]
    async fn test_search_json_lists_every_post() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let Json(index) = search_json(State(state)).await;
        assert_eq!(index.len(), 6);
    }

    #[tokio::test]
    async fn test_toggle_theme_sets_cookie_and_redirects() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let mut headers = cookie_headers("theme=dark");
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("http://localhost:4000/archive?tag=CSS"),
        );

        let response = toggle_theme(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/archive?tag=CSS");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("theme=light;"));
    }

    #[tokio::test]
    async fn test_toggle_view_without_referer_goes_home() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        let response = toggle_view(State(state), HeaderMap::new()).await;
        assert_eq!(response.headers()[header::LOCATION], "/");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("view=list;"));
    }

    #[test]
    fn test_back_path() {
        assert_eq!(back_path(Some("https://a.com/x?y=1")).as_deref(), Some("/x?y=1"));
        assert_eq!(back_path(Some("https://a.com")).as_deref(), Some("/"));
        assert_eq!(back_path(Some("/search")).as_deref(), Some("/search"));
        assert_eq!(back_path(Some("//evil.com/x")), None);
        assert_eq!(
            back_path(Some("https://a.com//evil.org/x")).as_deref(),
            Some("/evil.org/x")
        );
        assert_eq!(back_path(None), None);
    }
}
