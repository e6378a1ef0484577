//! Stateless HTTP transport: one JSON-RPC message per `POST /mcp`.
//!
//! There is no session, so no initialization gate; every request is served
//! on its own.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;

use crate::handlers::{self, ServerContext};
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

pub fn router(ctx: Arc<ServerContext>) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(health))
        .with_state(ctx)
}

/// Serve on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, ctx: Arc<ServerContext>) -> std::io::Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "HTTP transport listening on /mcp");
    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "HTTP server error"))
}

async fn handle_mcp(State(ctx): State<Arc<ServerContext>>, body: String) -> Response {
    let req: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "parse error");
            return Json(JsonRpcResponse::error(None, JsonRpcError::parse_error())).into_response();
        }
    };

    if req.jsonrpc != "2.0" {
        return Json(JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()))
            .into_response();
    }

    match handlers::dispatch(&req, &ctx).await {
        Some(resp) => Json(resp).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
