// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server: router assembly, shared state, static endpoints

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::create_book::create_book_handler;
use super::errors::ApiError;
use super::generate_character::generate_character_handler;
use super::generate_image::generate_image_handler;
use crate::config::NodeConfig;
use crate::illustration::ImageStore;
use crate::provider::{ImageGenerator, TextGenerator};

const LANDING_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>Taleforge</title></head>\n\
<body>\n<h1>Taleforge storybook node</h1>\n\
<p>POST /create-book &mdash; generate a personalized ten-page storybook</p>\n\
<p>POST /generate-character &mdash; derive a character description from a photo</p>\n\
<p>POST /generate-image &mdash; generate a single illustration</p>\n\
</body>\n</html>\n";

/// Shared per-process state, constructed once at startup and passed
/// explicitly to every handler. No ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NodeConfig>,
    pub text: Arc<dyn TextGenerator>,
    pub image: Arc<dyn ImageGenerator>,
    pub store: Arc<ImageStore>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Assemble the router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_handler))
        .route("/health", get(health_handler))
        .route("/create-book", post(create_book_handler))
        .route("/generate-character", post(generate_character_handler))
        .route("/generate-image", post(generate_image_handler))
        .route("/generated/:file", get(generated_file_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Storybook node listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn landing_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /generated/:file - raw bytes of a persisted illustration
///
/// Only plain file names resolve; anything else is a 404, never a path
/// lookup outside the store.
async fn generated_file_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .store
        .resolve(&file)
        .ok_or_else(|| ApiError::not_found("no such image"))?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::not_found("no such image"))?;

    Ok((
        [(header::CONTENT_TYPE, ImageStore::content_type(&file))],
        bytes,
    )
        .into_response())
}
