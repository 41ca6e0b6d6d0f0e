//! In-memory backend loaded from a JSON snapshot
//!
//! A snapshot carries the product records of either catalog backend, the
//! code tables, work records, texts, print histories and subject headings.
//! It stands in for the remote services in the CLI and in tests.

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::backend::{CatalogBackend, CodeEntry, KeywordSearch, ResolvedHandle, WorkBackend};
use crate::{
    error::{AppError, AppResult},
    mapping::fields::normalize_gtin,
    models::{enums::CodeDomain, facts::RawSubjectRecord, raw::RawRecord},
};

/// Fields a product number is matched against
const NUMBER_FIELDS: [&str; 3] = ["productNumber", "ean", "gtin"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub products: Vec<RawRecord>,
    pub codes: HashMap<CodeDomain, IndexMap<String, String>>,
    pub works: HashMap<String, RawRecord>,
    /// Keyed by production id
    pub texts: HashMap<String, Vec<RawRecord>>,
    /// Keyed by production id
    pub print_history: HashMap<String, Vec<RawRecord>>,
    /// Keyed by GTIN
    pub subjects: HashMap<String, Vec<RawSubjectRecord>>,
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotBackend {
    snapshot: Snapshot,
}

impl SnapshotBackend {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file
    pub async fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Backend(format!("Failed to read snapshot {}: {}", path.display(), e)))?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            products = snapshot.products.len(),
            works = snapshot.works.len(),
            "Snapshot loaded"
        );
        Ok(Self::new(snapshot))
    }

    fn matches_number(record: &RawRecord, number: &str) -> bool {
        let wanted = number.trim();
        let wanted_gtin = normalize_gtin(wanted);
        NUMBER_FIELDS.iter().any(|field| match record.str_field(field) {
            Some(value) if value == wanted => true,
            Some(value) => *field != "productNumber" && !wanted_gtin.is_empty() && normalize_gtin(&value) == wanted_gtin,
            None => false,
        })
    }

    fn require_token(access_token: &str) -> AppResult<()> {
        if access_token.is_empty() {
            return Err(AppError::Backend("Missing access token".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogBackend for SnapshotBackend {
    async fn find_by_number(&self, number: &str) -> AppResult<Vec<RawRecord>> {
        Ok(self
            .snapshot
            .products
            .iter()
            .filter(|record| Self::matches_number(record, number))
            .cloned()
            .collect())
    }

    async fn fetch_full_record(&self, handle: &ResolvedHandle) -> AppResult<RawRecord> {
        self.snapshot
            .products
            .iter()
            .find(|record| record.str_field("id").as_deref() == Some(handle.record_id.as_str()))
            .cloned()
            .ok_or_else(|| AppError::Backend(format!("Record {} disappeared", handle.record_id)))
    }

    async fn lookup_code(&self, domain: CodeDomain, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .snapshot
            .codes
            .get(&domain)
            .and_then(|table| table.get(key.trim()))
            .cloned())
    }

    async fn lookup_domain_table(&self, domain: CodeDomain) -> AppResult<Vec<CodeEntry>> {
        Ok(self
            .snapshot
            .codes
            .get(&domain)
            .map(|table| {
                table
                    .iter()
                    .map(|(key, value)| CodeEntry {
                        key: key.clone(),
                        value: value.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl WorkBackend for SnapshotBackend {
    async fn fetch_work(&self, access_token: &str, work_id: &str) -> AppResult<RawRecord> {
        Self::require_token(access_token)?;
        self.snapshot
            .works
            .get(work_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", work_id)))
    }

    async fn fetch_production_texts(
        &self,
        access_token: &str,
        _work_id: &str,
        production_id: &str,
    ) -> AppResult<Vec<RawRecord>> {
        Self::require_token(access_token)?;
        Ok(self.snapshot.texts.get(production_id).cloned().unwrap_or_default())
    }

    async fn fetch_print_history(
        &self,
        access_token: &str,
        _work_id: &str,
        production_id: &str,
    ) -> AppResult<Vec<RawRecord>> {
        Self::require_token(access_token)?;
        Ok(self
            .snapshot
            .print_history
            .get(production_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl KeywordSearch for SnapshotBackend {
    async fn search_by_subject_key(&self, gtin: &str) -> AppResult<Vec<RawSubjectRecord>> {
        Ok(self
            .snapshot
            .subjects
            .get(&normalize_gtin(gtin))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend() -> SnapshotBackend {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "products": [
                { "id": "1", "productNumber": "100200", "ean": "978-951-0-12345-6" },
                { "id": "2", "productNumber": "100201", "gtin": "9789510999999" }
            ],
            "codes": {
                "age_groups": { "0+": "Vauvat", "3+": "Taaperot", "12+": "Nuoret" },
                "vat_codes": { "1": "ALV 10 %" }
            },
            "works": { "w1": { "title": "Teos" } }
        }))
        .unwrap();
        SnapshotBackend::new(snapshot)
    }

    #[tokio::test]
    async fn test_find_by_product_number_and_gtin() {
        let backend = backend();
        assert_eq!(backend.find_by_number("100200").await.unwrap().len(), 1);
        assert_eq!(backend.find_by_number("9789510123456").await.unwrap().len(), 1);
        assert_eq!(backend.find_by_number("9789510999999").await.unwrap().len(), 1);
        assert!(backend.find_by_number("1002").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_domain_table_keeps_order() {
        let keys: Vec<String> = backend()
            .lookup_domain_table(CodeDomain::AgeGroups)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["0+", "3+", "12+"]);
    }

    #[tokio::test]
    async fn test_lookup_code() {
        let backend = backend();
        assert_eq!(
            backend.lookup_code(CodeDomain::VatCodes, "1").await.unwrap().as_deref(),
            Some("ALV 10 %")
        );
        assert_eq!(backend.lookup_code(CodeDomain::MainGroup, "1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_work_requires_token() {
        let backend = backend();
        assert!(backend.fetch_work("", "w1").await.is_err());
        assert!(backend.fetch_work("t", "w1").await.is_ok());
        assert!(matches!(
            backend.fetch_work("t", "missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
