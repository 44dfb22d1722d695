//! File watching and the live reload socket

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use super::AppState;
use crate::config::CONFIG_FILE;

/// Watch posts, language files and `_config.yml`; reload on change
///
/// The base directory itself is watched, so a posts directory created later
/// and a config file replaced by an editor's rename-on-save are still seen.
/// Blocks the calling thread until the watcher shuts down.
pub(super) fn watch_and_reload(state: Arc<AppState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let snapshot = state.snapshot();
    let blog = &snapshot.blog;
    // events carry absolute paths
    let base_dir = blog
        .base_dir
        .canonicalize()
        .unwrap_or_else(|_| blog.base_dir.clone());
    let sources = Sources {
        posts_dir: base_dir.join(&blog.config.posts_dir),
        languages_dir: base_dir.join("languages"),
        config_path: base_dir.join(CONFIG_FILE),
    };
    drop(snapshot);

    debouncer
        .watcher()
        .watch(&base_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", base_dir);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<&DebouncedEvent> = events
                    .iter()
                    .filter(|e| sources.contains(&e.path) && is_relevant(&e.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match state.reload() {
                    Ok(()) => state.notify_reload(),
                    Err(e) => tracing::error!("Reload failed, keeping previous content: {:#}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Paths whose changes feed the live site
struct Sources {
    posts_dir: PathBuf,
    languages_dir: PathBuf,
    config_path: PathBuf,
}

impl Sources {
    fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.posts_dir)
            || path.starts_with(&self.languages_dir)
            || path.file_name() == self.config_path.file_name()
                && path.parent() == self.config_path.parent()
    }
}

/// Editor swap files and VCS metadata never trigger a reload
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    !path_str.contains("/.git/")
        && name != ".DS_Store"
        && !name.ends_with('~')
        && !name.ends_with(".swp")
        && !name.starts_with(".#")
}

/// WebSocket handler for live reload
pub(super) async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(()) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}
