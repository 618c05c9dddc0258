//! Read-only JSON API over the post index
//!
//! The index is published as an `Arc<Blog>`; a rebuild produces a complete
//! new `Blog` and swaps the pointer, so a request sees either the old or the
//! new collection, never a partial one.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{Blog, MarkdownRenderer, Post, PostSummary};
use crate::generator::PostPage;
use crate::Folio;

/// Server state
pub struct ServerState {
    folio: Folio,
    blog: RwLock<Arc<Blog>>,
    renderer: MarkdownRenderer,
}

impl ServerState {
    pub fn new(folio: Folio, blog: Blog) -> Self {
        Self {
            renderer: MarkdownRenderer::with_options(&folio.config.highlight),
            folio,
            blog: RwLock::new(Arc::new(blog)),
        }
    }

    /// Current collection
    pub async fn blog(&self) -> Arc<Blog> {
        self.blog.read().await.clone()
    }

    /// Rebuild from disk and publish the new collection
    fn reload(&self) -> Result<usize> {
        let blog = self.folio.load_blog()?;
        let count = blog.len();
        *self.blog.blocking_write() = Arc::new(blog);
        Ok(count)
    }
}

/// Query string for `GET /api/posts`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Build the API router
pub fn router(state: Arc<ServerState>) -> Router {
    let public_dir = state.folio.public_dir.clone();

    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/tags", get(list_tags))
        .route("/api/categories", get(list_categories))
        .route("/api/featured", get(list_featured))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let blog = folio.load_blog()?;
    let state = Arc::new(ServerState::new(folio.clone(), blog));

    if watch {
        let watch_state = state.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(watch_state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("API running at http://{}:{}/api/posts", ip, port);
    if watch {
        println!("Watching {:?} for changes.", folio.posts_dir);
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Rebuild the index whenever a post changes
fn watch_and_reload(state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let posts_dir = &state.folio.posts_dir;
    std::fs::create_dir_all(posts_dir)?;
    debouncer
        .watcher()
        .watch(posts_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", posts_dir);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path = e.path.to_string_lossy();
                    !path.contains(".DS_Store") && !path.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                match state.reload() {
                    Ok(count) => tracing::info!("Reloaded {} posts", count),
                    Err(e) => tracing::error!("Reload failed, keeping previous index: {}", e),
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

async fn list_posts(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListParams>,
) -> Response {
    let blog = state.blog().await;
    let hits: Vec<PostSummary> = blog
        .search(params.q.as_deref().unwrap_or(""), params.category.as_deref())
        .into_iter()
        .map(Post::summary)
        .collect();
    Json(hits).into_response()
}

async fn get_post(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    let blog = state.blog().await;
    match blog.get_by_slug(&slug) {
        Some(post) => {
            let page = PostPage::build(&blog, post, &state.renderer, &state.folio.config);
            Json(page).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("post {:?} not found", slug) })),
        )
            .into_response(),
    }
}

async fn list_tags(State(state): State<Arc<ServerState>>) -> Json<Vec<String>> {
    Json(state.blog().await.all_tags())
}

async fn list_categories(State(state): State<Arc<ServerState>>) -> Json<Vec<String>> {
    Json(state.blog().await.all_categories())
}

async fn list_featured(State(state): State<Arc<ServerState>>) -> Response {
    let blog = state.blog().await;
    let featured: Vec<PostSummary> = blog.featured().into_iter().map(Post::summary).collect();
    Json(featured).into_response()
}
