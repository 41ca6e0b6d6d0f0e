//! Collaborator contracts of the catalog backends

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{enums::CodeDomain, facts::RawSubjectRecord, raw::RawRecord},
};

/// Backend handles of one resolved product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHandle {
    pub record_id: String,
    pub work_id: Option<String>,
    pub production_id: Option<String>,
}

impl ResolvedHandle {
    pub fn record(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            work_id: None,
            production_id: None,
        }
    }
}

/// One row of a backend code table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub key: String,
    pub value: String,
}

/// Product catalog: search, full records and code tables
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Products matching a product number or GTIN
    async fn find_by_number(&self, number: &str) -> AppResult<Vec<RawRecord>>;

    async fn fetch_full_record(&self, handle: &ResolvedHandle) -> AppResult<RawRecord>;

    async fn lookup_code(&self, domain: CodeDomain, key: &str) -> AppResult<Option<String>>;

    /// All rows of a code table, in backend order
    async fn lookup_domain_table(&self, domain: CodeDomain) -> AppResult<Vec<CodeEntry>>;
}

/// Work / production level data of the work-based backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkBackend: Send + Sync {
    async fn fetch_work(&self, access_token: &str, work_id: &str) -> AppResult<RawRecord>;

    async fn fetch_production_texts(
        &self,
        access_token: &str,
        work_id: &str,
        production_id: &str,
    ) -> AppResult<Vec<RawRecord>>;

    async fn fetch_print_history(
        &self,
        access_token: &str,
        work_id: &str,
        production_id: &str,
    ) -> AppResult<Vec<RawRecord>>;
}

/// Subject headings of external bibliographic records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeywordSearch: Send + Sync {
    async fn search_by_subject_key(&self, gtin: &str) -> AppResult<Vec<RawSubjectRecord>>;
}

/// Keyword search that never finds anything, for offline runs
#[derive(Debug, Clone, Default)]
pub struct NoKeywordSearch;

#[async_trait]
impl KeywordSearch for NoKeywordSearch {
    async fn search_by_subject_key(&self, _gtin: &str) -> AppResult<Vec<RawSubjectRecord>> {
        Ok(Vec::new())
    }
}
