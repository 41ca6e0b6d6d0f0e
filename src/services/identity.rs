//! Product identity resolution

use super::backend::{CatalogBackend, ResolvedHandle};
use crate::{
    error::{AppError, AppResult},
    models::raw::RawRecord,
};

/// Resolve a product number (internal number or GTIN) to backend handles.
///
/// Exactly one match is required. `extract` pulls the backend-specific
/// handles out of the match.
pub async fn resolve<F>(
    backend: &dyn CatalogBackend,
    number: &str,
    extract: F,
) -> AppResult<ResolvedHandle>
where
    F: Fn(&RawRecord) -> Option<ResolvedHandle>,
{
    let matches = backend.find_by_number(number).await?;
    let record = single_match(number, matches)?;
    extract(&record).ok_or_else(|| {
        AppError::Backend(format!("Search result for {} carries no record id", number))
    })
}

fn single_match(number: &str, mut matches: Vec<RawRecord>) -> AppResult<RawRecord> {
    match matches.len() {
        0 => Err(AppError::NotFound(format!("Product {} not found", number))),
        1 => Ok(matches.remove(0)),
        count => Err(AppError::AmbiguousResult {
            number: number.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::backend::MockCatalogBackend;
    use serde_json::json;

    fn by_id(record: &RawRecord) -> Option<ResolvedHandle> {
        record.str_field("id").map(ResolvedHandle::record)
    }

    #[tokio::test]
    async fn test_single_match_resolves() {
        let mut backend = MockCatalogBackend::new();
        backend
            .expect_find_by_number()
            .withf(|number| number == "9789510123456")
            .times(1)
            .returning(|_| Ok(vec![RawRecord::from(json!({ "id": "4711" }))]));

        let handle = resolve(&backend, "9789510123456", by_id).await.unwrap();
        assert_eq!(handle.record_id, "4711");
    }

    #[tokio::test]
    async fn test_no_match_is_not_found() {
        let mut backend = MockCatalogBackend::new();
        backend.expect_find_by_number().returning(|_| Ok(vec![]));

        let err = resolve(&backend, "123", by_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_two_matches_are_ambiguous() {
        let mut backend = MockCatalogBackend::new();
        backend.expect_find_by_number().returning(|_| {
            Ok(vec![
                RawRecord::from(json!({ "id": "1" })),
                RawRecord::from(json!({ "id": "2" })),
            ])
        });

        let err = resolve(&backend, "123", by_id).await.unwrap_err();
        assert!(matches!(err, AppError::AmbiguousResult { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let mut backend = MockCatalogBackend::new();
        backend
            .expect_find_by_number()
            .returning(|_| Err(AppError::Backend("timeout".to_string())));

        let err = resolve(&backend, "123", by_id).await.unwrap_err();
        assert!(matches!(err, AppError::Backend(msg) if msg == "timeout"));
    }

    #[tokio::test]
    async fn test_match_without_id() {
        let mut backend = MockCatalogBackend::new();
        backend
            .expect_find_by_number()
            .returning(|_| Ok(vec![RawRecord::from(json!({ "title": "x" }))]));

        assert!(matches!(
            resolve(&backend, "123", by_id).await,
            Err(AppError::Backend(_))
        ));
    }
}
