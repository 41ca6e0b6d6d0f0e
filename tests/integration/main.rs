//! Integration tests driving both product adapters through a catalog snapshot

mod adapters;

use std::sync::Arc;

use onix_mapper::{
    config::{AppConfig, BackendKind},
    services::{
        snapshot::SnapshotBackend,
        token::{MemoryTokenCache, StaticTokenProvider},
        Services,
    },
};

const SNAPSHOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json");

/// Services over the fixture snapshot for the given backend
pub async fn services(backend: BackendKind) -> Services {
    let snapshot = Arc::new(
        SnapshotBackend::from_file(SNAPSHOT)
            .await
            .expect("Failed to load snapshot fixture"),
    );

    let mut config = AppConfig::default();
    config.mapper.backend = backend;
    config.keyword_search.enabled = false;
    config.assets.username = "user".to_string();
    config.assets.password = "pass".to_string();

    Services::new(
        &config,
        snapshot.clone(),
        snapshot.clone(),
        snapshot,
        Arc::new(MemoryTokenCache::new()),
        Arc::new(StaticTokenProvider("integration".to_string())),
    )
}
