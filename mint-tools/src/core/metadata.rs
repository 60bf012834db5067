// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Token metadata in the shape marketplaces expect, and an HTTP endpoint serving it.
//!
//! The token id is taken verbatim from the request path. It is not checked against the
//! minted supply.

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::utils::color::DebugColor;

pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://raw.githubusercontent.com/LearnWeb3DAO/NFT-Collection/main/my-app/public/cryptodevs/";
pub const DEFAULT_NAME_PREFIX: &str = "Profit Unity NFT #";
pub const DEFAULT_DESCRIPTION: &str = "Profit Unity NFT gives you access to our DAO";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MetadataConfig {
    pub image_base_url: String,
    pub name_prefix: String,
    pub description: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.into(),
            name_prefix: DEFAULT_NAME_PREFIX.into(),
            description: DEFAULT_DESCRIPTION.into(),
        }
    }
}

impl MetadataConfig {
    pub fn token(&self, token_id: &str) -> TokenMetadata {
        TokenMetadata {
            name: format!("{}{token_id}", self.name_prefix),
            description: self.description.clone(),
            image: format!("{}{token_id}.svg", self.image_base_url),
        }
    }
}

pub fn router(config: MetadataConfig) -> Router {
    Router::new()
        .route("/api/{token_id}", get(token_metadata))
        .with_state(Arc::new(config))
}

async fn token_metadata(
    State(config): State<Arc<MetadataConfig>>,
    Path(token_id): Path<String>,
) -> Json<TokenMetadata> {
    Json(config.token(&token_id))
}

/// Serves [`router`] on `bind` until `shutdown` resolves.
pub async fn serve(
    bind: SocketAddr,
    config: MetadataConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!(@grey, "serving metadata on {}", listener.local_addr()?.debug_lavender());
    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown)
        .await
}
