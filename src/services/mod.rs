//! Collaborators and product adapters

pub mod backend;
pub mod finna;
pub mod identity;
pub mod legacy;
pub mod oauth;
pub mod product;
pub mod snapshot;
pub mod token;
pub mod work;

use std::sync::Arc;

use crate::{
    config::{AppConfig, BackendKind},
    error::AppResult,
    mapping::sanitizer::TagWhitelistSanitizer,
};
use backend::{CatalogBackend, KeywordSearch, WorkBackend};
use product::{Collaborators, ProductInterface};
use token::{TokenCache, TokenProvider};
use work::WorkAccess;

/// Container for all collaborators, opening products on the configured backend
#[derive(Clone)]
pub struct Services {
    pub backend: BackendKind,
    pub collaborators: Collaborators,
    pub work_access: WorkAccess,
}

impl Services {
    /// Wire the collaborators according to the configuration
    pub fn new(
        config: &AppConfig,
        catalog: Arc<dyn CatalogBackend>,
        works: Arc<dyn WorkBackend>,
        keywords: Arc<dyn KeywordSearch>,
        tokens: Arc<dyn TokenCache>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            backend: config.mapper.backend,
            collaborators: Collaborators {
                catalog,
                keywords,
                sanitizer: Arc::new(TagWhitelistSanitizer::new()),
                assets: config.assets.clone(),
            },
            work_access: WorkAccess {
                works,
                tokens,
                token_provider,
                token_cache: config.token_cache.clone(),
            },
        }
    }

    /// Resolve a product number on the configured backend
    pub async fn open_product(&self, number: &str) -> AppResult<Box<dyn ProductInterface>> {
        tracing::info!(number, backend = ?self.backend, "Opening product");
        let product: Box<dyn ProductInterface> = match self.backend {
            BackendKind::Legacy => Box::new(legacy::open(number, self.collaborators.clone()).await?),
            BackendKind::Work => Box::new(
                work::open(number, self.collaborators.clone(), self.work_access.clone()).await?,
            ),
        };
        Ok(product)
    }
}
