// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use taleforge_node::api::{start_server, AppState};
use taleforge_node::config::NodeConfig;
use taleforge_node::illustration::ImageStore;
use taleforge_node::provider::OpenAiClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = NodeConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    tracing::info!(
        "Starting storybook node: port={}, text_model={}, image_model={}, \
         return_mode={:?}, eager_illustrations={}",
        config.port,
        config.text_model,
        config.image_model,
        config.return_mode,
        config.eager_illustrations
    );

    let client = Arc::new(OpenAiClient::new(&config)?);
    let store = Arc::new(ImageStore::new(&config.generated_dir)?);
    tracing::info!("Generated images stored under {:?}", store.dir());

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        text: client.clone(),
        image: client,
        store,
    };

    start_server(state, port)
        .await
        .map_err(|e| anyhow!("server error: {}", e))?;

    Ok(())
}
