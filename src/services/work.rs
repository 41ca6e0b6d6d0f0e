//! Work-based catalog backend
//!
//! A product is a production of a work. The production record holds the
//! commercial data, the work record holds titles, series and contributors.
//! Texts and print history are fetched on demand with an access token.

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    backend::{CatalogBackend, ResolvedHandle, WorkBackend},
    identity,
    product::{Collaborators, ProductAdapter, ProductSource, RawText, DEFAULT_TEXT_TYPE},
    token::{TokenCache, TokenProvider},
};
use crate::{
    config::TokenCacheConfig,
    error::{AppError, AppResult},
    models::{
        facts::{
            ContributorKind, Measurements, PriceGroupAmounts, PrintEvent, ProductFacts,
            RawContributor, SeriesFacts,
        },
        raw::RawRecord,
    },
};

pub type WorkProduct = ProductAdapter<WorkSource>;

/// Authenticated access to the work backend
#[derive(Clone)]
pub struct WorkAccess {
    pub works: Arc<dyn WorkBackend>,
    pub tokens: Arc<dyn TokenCache>,
    pub token_provider: Arc<dyn TokenProvider>,
    pub token_cache: TokenCacheConfig,
}

impl WorkAccess {
    async fn access_token(&self) -> AppResult<String> {
        self.tokens
            .get_or_refresh(
                &self.token_cache.key,
                self.token_cache.ttl_seconds,
                self.token_provider.as_ref(),
            )
            .await
    }
}

pub struct WorkSource {
    work_id: String,
    production_id: String,
    facts: ProductFacts,
    access: WorkAccess,
}

impl WorkSource {
    pub async fn load(catalog: &dyn CatalogBackend, access: WorkAccess, number: &str) -> AppResult<Self> {
        let handle = identity::resolve(catalog, number, production_handle).await?;
        let (Some(work_id), Some(production_id)) = (handle.work_id.clone(), handle.production_id.clone()) else {
            return Err(AppError::Backend(format!("Production {} has no work", number)));
        };

        let production = catalog.fetch_full_record(&handle).await?;
        let token = access.access_token().await?;
        let work = access.works.fetch_work(&token, &work_id).await?;

        Ok(Self {
            facts: work_facts(&production, &work)?,
            work_id,
            production_id,
            access,
        })
    }

    pub fn work_id(&self) -> &str {
        &self.work_id
    }

    pub fn production_id(&self) -> &str {
        &self.production_id
    }
}

#[async_trait]
impl ProductSource for WorkSource {
    fn facts(&self) -> &ProductFacts {
        &self.facts
    }

    async fn texts(&self) -> AppResult<Vec<RawText>> {
        let token = self.access.access_token().await?;
        let texts = self
            .access
            .works
            .fetch_production_texts(&token, &self.work_id, &self.production_id)
            .await?;
        Ok(texts
            .iter()
            .filter_map(|text| {
                Some(RawText {
                    text_type: text
                        .str_field("textType")
                        .unwrap_or_else(|| DEFAULT_TEXT_TYPE.to_string()),
                    markup: text.str_field("text")?,
                })
            })
            .collect())
    }

    async fn print_history(&self) -> AppResult<Vec<PrintEvent>> {
        let token = self.access.access_token().await?;
        let history = self
            .access
            .works
            .fetch_print_history(&token, &self.work_id, &self.production_id)
            .await?;
        Ok(history
            .iter()
            .filter_map(|event| {
                Some(PrintEvent {
                    number: event.u32_field("printNumber")?,
                    date: event.date_field("printDate"),
                })
            })
            .collect())
    }
}

/// Resolve a product number and build its adapter
pub async fn open(number: &str, collaborators: Collaborators, access: WorkAccess) -> AppResult<WorkProduct> {
    let source = WorkSource::load(collaborators.catalog.as_ref(), access, number).await?;
    tracing::debug!(
        number,
        work_id = %source.work_id,
        production_id = %source.production_id,
        "Work product loaded"
    );
    Ok(ProductAdapter::new(source, collaborators))
}

/// Search hits of the work backend are productions that name their work
fn production_handle(record: &RawRecord) -> Option<ResolvedHandle> {
    let production_id = record.str_field("id")?;
    Some(ResolvedHandle {
        record_id: production_id.clone(),
        work_id: record.str_field("workId"),
        production_id: Some(production_id),
    })
}

/// Translate a production and its work into product facts
pub fn work_facts(production: &RawRecord, work: &RawRecord) -> AppResult<ProductFacts> {
    let record_id = production
        .str_field("id")
        .ok_or_else(|| AppError::Backend("Production record without id".to_string()))?;

    Ok(ProductFacts {
        product_number: production
            .str_field("productNumber")
            .unwrap_or_else(|| record_id.clone()),
        record_id,
        gtin: production.str_field("gtin"),
        title: production.str_field("title").or_else(|| work.str_field("title")),
        subtitle: production
            .str_field("subtitle")
            .or_else(|| work.str_field("subtitle")),
        original_title: work.str_field("originalTitle"),
        media_type: production.str_field("format.mediaType"),
        binding_code: production.str_field("format.bindingCode"),
        main_group: production.str_field("classification.mainGroup"),
        sub_group: production.str_field("classification.subGroup"),
        library_class_id: production.str_field("classification.libraryClassId"),
        age_group: production.str_field("classification.ageGroup"),
        notify_code: production.str_field("status.notifyCode"),
        vat_code: production.str_field("vatCode"),
        owner_code: production.str_field("publisher.ownerCode"),
        imprint: production.str_field("publisher.imprint"),
        language: production.str_field("languages.text"),
        original_language: production.str_field("languages.original"),
        pages: production.u32_field("extent.pages"),
        duration: production.str_field("extent.duration"),
        series: work.str_field("series.name").map(|name| SeriesFacts {
            name,
            number: work.str_field("series.number"),
        }),
        publication_date: production.date_field("publicationDate"),
        measurements: Measurements {
            height: production.decimal_field("measurements.height"),
            width: production.decimal_field("measurements.width"),
            thickness: production.decimal_field("measurements.thickness"),
            weight: production.decimal_field("measurements.weight"),
        },
        print_country: production.str_field("printCountry"),
        cost_center: production.str_field("costCenter"),
        discount_group: production.str_field("discountGroup"),
        cover_image_url: production.str_field("coverImageUrl"),
        prices: price_groups(production),
        contributors: work
            .array_field("contributors")
            .iter()
            .filter_map(contributor)
            .collect(),
    })
}

fn price_groups(production: &RawRecord) -> Vec<PriceGroupAmounts> {
    let Some(prices) = production.object_field("prices") else {
        return Vec::new();
    };
    prices
        .keys()
        .filter_map(|group| {
            let amounts = prices.object_field(group)?;
            Some(PriceGroupAmounts {
                group: group.clone(),
                net: amounts.decimal_field("excludingVat"),
                gross: amounts.decimal_field("includingVat"),
            })
        })
        .collect()
}

fn contributor(line: &RawRecord) -> Option<RawContributor> {
    let kind = if line.bool_field("isResource").unwrap_or(false) {
        ContributorKind::Resource
    } else {
        ContributorKind::Creditor
    };
    Some(RawContributor {
        kind,
        key: line.str_field("contributorId")?,
        role: line.str_field("roleCode"),
        priority: line
            .str_field("priority")
            .and_then(|p| p.parse().ok())
            .unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        backend::{MockCatalogBackend, MockWorkBackend},
        token::{MemoryTokenCache, MockTokenProvider},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn production() -> RawRecord {
        RawRecord::from(json!({
            "id": "p-1",
            "workId": "w-1",
            "productNumber": "200300",
            "gtin": "9789520000001",
            "format": { "mediaType": "AU", "bindingCode": "CD" },
            "classification": { "mainGroup": "2", "subGroup": "14", "ageGroup": "9+" },
            "publisher": { "ownerCode": "2", "imprint": "Kirjakas" },
            "prices": {
                "retail": { "excludingVat": "20,00", "includingVat": "22.00" },
                "trade": { "excludingVat": 12.5 }
            },
            "measurements": { "height": 142, "width": "0" }
        }))
    }

    fn work() -> RawRecord {
        RawRecord::from(json!({
            "title": "Kuunsilta",
            "originalTitle": "Moonbridge",
            "series": { "name": "Kuu", "number": "2" },
            "contributors": [
                { "contributorId": "r1", "isResource": true, "roleCode": "NAR", "priority": 5 },
                { "contributorId": "c2", "isResource": false, "roleCode": "AUT" },
                { "roleCode": "AUT" }
            ]
        }))
    }

    fn access(works: MockWorkBackend, fetches: usize) -> WorkAccess {
        let mut provider = MockTokenProvider::new();
        provider
            .expect_fetch_token()
            .times(fetches)
            .returning(|| Ok("token".to_string()));
        WorkAccess {
            works: Arc::new(works),
            tokens: Arc::new(MemoryTokenCache::new()),
            token_provider: Arc::new(provider),
            token_cache: TokenCacheConfig::default(),
        }
    }

    #[test]
    fn test_work_facts() {
        let facts = work_facts(&production(), &work()).unwrap();
        assert_eq!(facts.record_id, "p-1");
        assert_eq!(facts.title.as_deref(), Some("Kuunsilta"));
        assert_eq!(facts.binding_code.as_deref(), Some("CD"));
        assert_eq!(facts.imprint.as_deref(), Some("Kirjakas"));
        assert_eq!(facts.series.as_ref().unwrap().name, "Kuu");
        assert_eq!(facts.measurements.height, Some(Decimal::from(142)));

        let retail = facts.prices.iter().find(|p| p.group == "retail").unwrap();
        assert_eq!(retail.net, Some(Decimal::from(20)));
        let trade = facts.prices.iter().find(|p| p.group == "trade").unwrap();
        assert_eq!(trade.gross, None);

        assert_eq!(facts.contributors.len(), 2);
        assert_eq!(facts.contributors[0].kind, ContributorKind::Resource);
        assert_eq!(facts.contributors[0].priority, 5);
        assert_eq!(facts.contributors[1].kind, ContributorKind::Creditor);
    }

    #[test]
    fn test_production_title_overrides_work() {
        let mut value = serde_json::to_value(production()).unwrap();
        value["title"] = json!("Kuunsilta (selkokirja)");
        let facts = work_facts(&RawRecord::from(value), &work()).unwrap();
        assert_eq!(facts.title.as_deref(), Some("Kuunsilta (selkokirja)"));
    }

    #[tokio::test]
    async fn test_load_requires_work_id() {
        let mut catalog = MockCatalogBackend::new();
        catalog
            .expect_find_by_number()
            .returning(|_| Ok(vec![RawRecord::from(json!({ "id": "p-1" }))]));

        let result = WorkSource::load(&catalog, access(MockWorkBackend::new(), 0), "200300").await;
        assert!(matches!(result, Err(AppError::Backend(_))));
    }

    #[tokio::test]
    async fn test_texts_and_history_fetched_with_cached_token() {
        let mut catalog = MockCatalogBackend::new();
        catalog
            .expect_find_by_number()
            .returning(|_| Ok(vec![production()]));
        catalog
            .expect_fetch_full_record()
            .returning(|_| Ok(production()));

        let mut works = MockWorkBackend::new();
        works
            .expect_fetch_work()
            .withf(|token, work_id| token == "token" && work_id == "w-1")
            .times(1)
            .returning(|_, _| Ok(work()));
        works
            .expect_fetch_production_texts()
            .times(2)
            .returning(|_, _, _| {
                Ok(vec![
                    RawRecord::from(json!({ "text": "<p>Kuvaus</p>" })),
                    RawRecord::from(json!({ "textType": "06" })),
                ])
            });
        works
            .expect_fetch_print_history()
            .returning(|_, _, _| {
                Ok(vec![
                    RawRecord::from(json!({ "printNumber": 2, "printDate": "2024-03-01" })),
                    RawRecord::from(json!({ "printDate": "2024-04-01" })),
                ])
            });

        let source = WorkSource::load(&catalog, access(works, 1), "200300").await.unwrap();
        assert_eq!(source.work_id(), "w-1");
        assert_eq!(source.production_id(), "p-1");

        // Not cached: every call reaches the backend
        let texts = source.texts().await.unwrap();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text_type, DEFAULT_TEXT_TYPE);
        source.texts().await.unwrap();

        let history = source.print_history().await.unwrap();
        assert_eq!(
            history,
            vec![PrintEvent {
                number: 2,
                date: NaiveDate::from_ymd_opt(2024, 3, 1),
            }]
        );
    }
}
