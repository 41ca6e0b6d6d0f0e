//! Access tokens of the work backend
//!
//! A `TokenProvider` fetches a fresh token; a `TokenCache` keeps it until its
//! time-to-live runs out. Redis is used when configured, otherwise the token
//! lives in process memory.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;

use crate::{
    config::TokenCacheConfig,
    error::{AppError, AppResult},
};

/// Longest time a token is kept, in seconds
pub const MAX_TTL_SECONDS: u64 = 7 * 24 * 3600;

/// Expiry accepted by Redis `SETEX`: at least one second, at most [`MAX_TTL_SECONDS`]
fn redis_ttl(ttl_seconds: u64) -> u64 {
    ttl_seconds.clamp(1, MAX_TTL_SECONDS)
}

/// Instant a token stored at `now` stops being served; zero expires at once
fn memory_expiry(now: Instant, ttl_seconds: u64) -> Instant {
    now.checked_add(Duration::from_secs(ttl_seconds.min(MAX_TTL_SECONDS)))
        .unwrap_or(now)
}

/// Source of fresh access tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn fetch_token(&self) -> AppResult<String>;
}

/// Cached access tokens
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Cached token for `key`, or a fresh one from `provider` stored for `ttl_seconds`
    async fn get_or_refresh(
        &self,
        key: &str,
        ttl_seconds: u64,
        provider: &dyn TokenProvider,
    ) -> AppResult<String>;
}

/// Redis backed token cache, shared between processes
#[derive(Clone)]
pub struct RedisTokenCache {
    client: Client,
}

impl RedisTokenCache {
    /// Create a new Redis token cache
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::TokenCache(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::TokenCache(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::TokenCache(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::TokenCache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get_or_refresh(
        &self,
        key: &str,
        ttl_seconds: u64,
        provider: &dyn TokenProvider,
    ) -> AppResult<String> {
        let mut conn = self.connection().await?;

        let cached: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AppError::TokenCache(format!("Failed to read token from Redis: {}", e)))?;

        if let Some(token) = cached {
            tracing::debug!(key, "Access token served from Redis");
            return Ok(token);
        }

        tracing::info!(key, "Refreshing access token");
        let token = provider.fetch_token().await?;

        conn.set_ex::<_, _, ()>(key, &token, redis_ttl(ttl_seconds))
            .await
            .map_err(|e| AppError::TokenCache(format!("Failed to store token in Redis: {}", e)))?;

        Ok(token)
    }
}

/// In-process token cache for single runs and tests
#[derive(Default)]
pub struct MemoryTokenCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get_or_refresh(
        &self,
        key: &str,
        ttl_seconds: u64,
        provider: &dyn TokenProvider,
    ) -> AppResult<String> {
        // Held across the refresh so concurrent callers wait for one fetch
        let mut entries = self.entries.lock().await;

        if let Some((token, expires_at)) = entries.get(key) {
            if Instant::now() < *expires_at {
                tracing::debug!(key, "Access token served from memory");
                return Ok(token.clone());
            }
        }

        tracing::info!(key, "Refreshing access token");
        let token = provider.fetch_token().await?;
        let expires_at = memory_expiry(Instant::now(), ttl_seconds);
        entries.insert(key.to_string(), (token.clone(), expires_at));
        Ok(token)
    }
}

/// Token cache for the configuration: Redis when a URL is set
pub async fn cache_from_config(config: &TokenCacheConfig) -> AppResult<Box<dyn TokenCache>> {
    match config.redis_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => {
            let cache = RedisTokenCache::new(url).await?;
            tracing::info!("Using Redis token cache");
            Ok(Box::new(cache))
        }
        None => Ok(Box::new(MemoryTokenCache::new())),
    }
}

/// Fixed token, for backends that do not authenticate
#[derive(Debug, Clone)]
pub struct StaticTokenProvider(pub String);

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn fetch_token(&self) -> AppResult<String> {
        Ok(self.0.clone())
    }
}
