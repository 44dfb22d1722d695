//! Live server
//!
//! Pages are rendered per request from the in-memory store. A file watcher
//! rebuilds the store and configuration on change, swaps them in atomically
//! and tells connected browsers to reload.

mod handlers;
mod watch;

use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::i18n::I18n;
use crate::store::PostStore;
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Everything a request reads, published as one value
pub struct Snapshot {
    pub blog: Blog,
    pub store: PostStore,
    pub i18n: I18n,
}

impl Snapshot {
    fn load(blog: Blog) -> Self {
        let store = blog.load_store();
        let i18n = blog.load_i18n();
        Self { blog, store, i18n }
    }
}

/// Shared server state
pub struct AppState {
    snapshot: ArcSwap<Snapshot>,
    renderer: TemplateRenderer,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl AppState {
    pub fn new(blog: Blog, live_reload: bool) -> Result<Self> {
        let (reload_tx, _) = broadcast::channel::<()>(16);

        Ok(Self {
            snapshot: ArcSwap::from_pointee(Snapshot::load(blog)),
            renderer: TemplateRenderer::new()?,
            reload_tx,
            live_reload,
        })
    }

    /// The current blog, store and strings; readers never see a mix of two reloads
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    /// Re-read configuration, language files and posts, then publish them
    ///
    /// A broken `_config.yml` keeps the previous configuration.
    pub fn reload(&self) -> Result<()> {
        let base_dir = self.snapshot.load().blog.base_dir.clone();
        let snapshot = Snapshot::load(Blog::new(&base_dir)?);

        tracing::info!("Reloaded {} posts", snapshot.store.len());
        self.snapshot.store(Arc::new(snapshot));
        Ok(())
    }

    /// Tell connected browsers to reload
    pub fn notify_reload(&self) {
        // no receivers is fine
        let _ = self.reload_tx.send(());
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let (assets_dir, image_base) = {
        let snapshot = state.snapshot.load();
        (
            snapshot.blog.assets_dir.clone(),
            snapshot.blog.config.image_base.clone(),
        )
    };
    let assets = ServeDir::new(assets_dir);

    let mut app = Router::new()
        .route("/", get(handlers::home_page))
        .route("/archive", get(handlers::archive_page))
        .route("/about", get(handlers::about_page))
        .route("/search", get(handlers::search_page))
        .route("/post/:slug", get(handlers::post_page))
        .route("/api/posts", get(handlers::api_posts))
        .route("/api/posts/:slug", get(handlers::api_post))
        .route("/search.json", get(handlers::search_json))
        .route("/theme/toggle", get(handlers::toggle_theme))
        .route("/view/toggle", get(handlers::toggle_view))
        .route("/__livereload", get(watch::livereload_handler))
        .nest_service("/assets", assets.clone());

    // Rewritten image links point below the image base
    let image_base = image_base.trim_end_matches('/');
    if !image_base.is_empty() && image_base.starts_with('/') {
        app = app.nest_service(&format!("{}/assets", image_base), assets);
    }

    app.fallback(handlers::not_found_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: Blog, ip: &str, port: u16, live_reload: bool) -> Result<()> {
    let live_reload = live_reload && blog.config.server.live_reload;
    let state = Arc::new(AppState::new(blog, live_reload)?);

    if live_reload {
        let watched = Arc::clone(&state);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch::watch_and_reload(watched) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if live_reload {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Failure while handling a request, answered with a 500
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use std::path::Path;

    /// State over a temporary site; posts are written before loading
    pub fn state(dir: &Path, posts: &[(&str, &str)]) -> Arc<AppState> {
        let posts_dir = dir.join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (slug, body) in posts {
            fs::write(posts_dir.join(format!("{}.md", slug)), body).unwrap();
        }
        let blog = Blog::with_config(dir.to_path_buf(), SiteConfig::default());
        Arc::new(AppState::new(blog, false).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::state;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_site_serves_fallback_posts() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[]);
        assert_eq!(state.snapshot().store.len(), 6);
    }

    #[test]
    fn test_reload_swaps_store_and_config() {
        let tmp = TempDir::new().unwrap();
        let state = state(
            tmp.path(),
            &[("first", "---\ntitle: First\ndate: 2024-01-01\n---\nHello")],
        );
        let before = state.snapshot();
        assert_eq!(before.store.len(), 1);

        fs::write(
            tmp.path().join("posts/second.md"),
            "---\ntitle: Second\ndate: 2024-02-01\n---\nAgain",
        )
        .unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: Reloaded\n").unwrap();
        state.reload().unwrap();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.store.len(), 2);
        assert_eq!(snapshot.store.posts()[0].slug, "second");
        assert_eq!(snapshot.blog.config.title, "Reloaded");
        // a request already holding the old snapshot keeps a consistent view
        assert_eq!(before.store.len(), 1);
        assert_eq!(before.blog.config.title, "Blog");
    }

    #[test]
    fn test_reload_keeps_old_state_on_bad_config() {
        let tmp = TempDir::new().unwrap();
        let state = state(tmp.path(), &[("only", "---\ntitle: Only\n---\nBody")]);
        fs::write(tmp.path().join("_config.yml"), "title: [unclosed\n").unwrap();
        assert!(state.reload().is_err());
        assert_eq!(state.snapshot().store.len(), 1);
        assert_eq!(state.snapshot().blog.config.title, "Blog");
    }
}
