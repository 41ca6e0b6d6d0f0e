//! Bibliographic keyword search over the Finna REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::backend::KeywordSearch;
use crate::{
    config::KeywordSearchConfig,
    error::{AppError, AppResult},
    models::facts::RawSubjectRecord,
};

const USER_AGENT: &str = concat!("onix-mapper/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    result_count: u64,
    #[serde(default)]
    records: Vec<SearchRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRecord {
    #[serde(default)]
    subjects_extended: Vec<RawSubjectRecord>,
}

#[derive(Clone)]
pub struct FinnaClient {
    client: Client,
    config: KeywordSearchConfig,
}

impl FinnaClient {
    pub fn new(config: KeywordSearchConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl KeywordSearch for FinnaClient {
    async fn search_by_subject_key(&self, gtin: &str) -> AppResult<Vec<RawSubjectRecord>> {
        if !self.config.enabled {
            return Ok(Vec::new());
        }

        tracing::debug!(gtin, "Searching subject headings");

        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("lookfor", gtin),
                ("type", "ISN"),
                ("field[]", "subjectsExtended"),
            ])
            .send()
            .await
            .map_err(|e| AppError::KeywordSearch(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(gtin, %status, "Keyword search returned an error status");
            return Err(AppError::KeywordSearch(format!(
                "Search for {} returned HTTP {}",
                gtin, status
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::KeywordSearch(format!("Invalid response: {}", e)))?;

        let subjects: Vec<RawSubjectRecord> = body
            .records
            .into_iter()
            .flat_map(|record| record.subjects_extended)
            .collect();

        tracing::debug!(
            gtin,
            records = body.result_count,
            subjects = subjects.len(),
            "Subject headings received"
        );

        Ok(subjects)
    }
}
