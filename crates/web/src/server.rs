//! Web server implementation

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use boxrow_core::{CellRow, Direction};

use crate::page;
use crate::static_files;

/// Web server state
#[derive(Clone)]
pub struct WebServer {
    state: Arc<WebServerState>,
}

struct WebServerState {
    /// The single owner of the cell sequence. Every handler completes its
    /// read-modify-write under this lock, so rotations never interleave.
    row: RwLock<CellRow>,
}

impl WebServer {
    /// Create a server holding the reference row `["1".."5"]`.
    pub fn new() -> Self {
        Self::with_row(CellRow::default())
    }

    /// Create a server holding a specific row.
    pub fn with_row(row: CellRow) -> Self {
        Self {
            state: Arc::new(WebServerState {
                row: RwLock::new(row),
            }),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health_handler))
            .route("/assets/*path", get(asset_handler))
            .route("/api/cells", get(cells_handler))
            .route("/api/rotate/:direction", post(rotate_handler))
            .route("/api/reset", post(reset_handler))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(self.state.clone())
    }

    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        info!("BoxRow serving on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

impl Default for WebServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Bind and serve with the reference row.
pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    WebServer::new().serve(addr).await
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellsResponse {
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotateResponse {
    pub direction: Direction,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "boxrow-web"
    }))
}

async fn index_handler(State(state): State<Arc<WebServerState>>) -> Html<String> {
    let row = state.row.read().await;
    Html(page::render(row.values()))
}

async fn asset_handler(Path(path): Path<String>) -> Response {
    match static_files::lookup(&path) {
        Some((content_type, body)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "asset not found").into_response(),
    }
}

async fn cells_handler(State(state): State<Arc<WebServerState>>) -> Json<CellsResponse> {
    let row = state.row.read().await;
    Json(CellsResponse {
        cells: row.values().to_vec(),
    })
}

async fn rotate_handler(
    State(state): State<Arc<WebServerState>>,
    Path(direction): Path<String>,
) -> Response {
    let direction: Direction = match direction.parse() {
        Ok(direction) => direction,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut row = state.row.write().await;
    row.rotate(direction);
    debug!("rotated {}: {:?}", direction, row.values());

    Json(RotateResponse {
        direction,
        cells: row.values().to_vec(),
    })
    .into_response()
}

async fn reset_handler(State(state): State<Arc<WebServerState>>) -> Json<CellsResponse> {
    let mut row = state.row.write().await;
    row.reset();
    debug!("reset row to {:?}", row.values());

    Json(CellsResponse {
        cells: row.values().to_vec(),
    })
}
