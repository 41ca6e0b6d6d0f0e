//! Search-based legacy catalog backend
//!
//! One flat record per product carries everything, including the marketing
//! text and the latest print run.

use async_trait::async_trait;

use super::{
    backend::{CatalogBackend, ResolvedHandle},
    identity,
    product::{Collaborators, ProductAdapter, ProductSource, RawText, DEFAULT_TEXT_TYPE},
};
use crate::{
    error::{AppError, AppResult},
    models::{
        facts::{
            ContributorKind, Measurements, PriceGroupAmounts, PrintEvent, ProductFacts,
            RawContributor, SeriesFacts,
        },
        raw::RawRecord,
    },
};

pub type LegacyProduct = ProductAdapter<LegacySource>;

pub struct LegacySource {
    record: RawRecord,
    facts: ProductFacts,
}

impl LegacySource {
    pub async fn load(catalog: &dyn CatalogBackend, number: &str) -> AppResult<Self> {
        let handle = identity::resolve(catalog, number, |record| {
            record.str_field("id").map(ResolvedHandle::record)
        })
        .await?;
        let record = catalog.fetch_full_record(&handle).await?;
        Self::from_record(record)
    }

    pub fn from_record(record: RawRecord) -> AppResult<Self> {
        let facts = legacy_facts(&record)?;
        Ok(Self { record, facts })
    }
}

#[async_trait]
impl ProductSource for LegacySource {
    fn facts(&self) -> &ProductFacts {
        &self.facts
    }

    async fn texts(&self) -> AppResult<Vec<RawText>> {
        Ok(self
            .record
            .str_field("marketingText")
            .map(|markup| RawText {
                text_type: DEFAULT_TEXT_TYPE.to_string(),
                markup,
            })
            .into_iter()
            .collect())
    }

    async fn print_history(&self) -> AppResult<Vec<PrintEvent>> {
        Ok(self
            .record
            .u32_field("latestPrintNumber")
            .map(|number| PrintEvent {
                number,
                date: self.record.date_field("latestPrintDate"),
            })
            .into_iter()
            .collect())
    }
}

/// Resolve a product number and build its adapter
pub async fn open(number: &str, collaborators: Collaborators) -> AppResult<LegacyProduct> {
    let source = LegacySource::load(collaborators.catalog.as_ref(), number).await?;
    tracing::debug!(number, record_id = %source.facts.record_id, "Legacy product loaded");
    Ok(ProductAdapter::new(source, collaborators))
}

/// Translate a legacy record into product facts
pub fn legacy_facts(record: &RawRecord) -> AppResult<ProductFacts> {
    let record_id = record
        .str_field("id")
        .ok_or_else(|| AppError::Backend("Legacy record without id".to_string()))?;

    Ok(ProductFacts {
        product_number: record
            .str_field("productNumber")
            .unwrap_or_else(|| record_id.clone()),
        record_id,
        gtin: record.str_field("ean"),
        title: record.str_field("title"),
        subtitle: record.str_field("subtitle"),
        original_title: record.str_field("originalTitle"),
        media_type: record.str_field("mediaCode"),
        binding_code: record.str_field("bindingCode"),
        main_group: record.str_field("mainGroup"),
        sub_group: record.str_field("subGroup"),
        library_class_id: record.str_field("libraryClassId"),
        age_group: record.str_field("ageGroup"),
        notify_code: record.str_field("notifyCode"),
        vat_code: record.str_field("vatCode"),
        owner_code: record.str_field("ownerCode"),
        imprint: record.str_field("imprint"),
        language: record.str_field("languageCode"),
        original_language: record.str_field("originalLanguageCode"),
        pages: record.u32_field("pages"),
        duration: record.str_field("duration"),
        series: record.str_field("seriesName").map(|name| SeriesFacts {
            name,
            number: record.str_field("seriesNumber"),
        }),
        publication_date: record.date_field("publicationDate"),
        measurements: Measurements {
            height: record.decimal_field("height"),
            width: record.decimal_field("width"),
            thickness: record.decimal_field("thickness"),
            weight: record.decimal_field("weight"),
        },
        print_country: record.str_field("printCountry"),
        cost_center: record.str_field("costCenter"),
        discount_group: record.str_field("discountGroup"),
        cover_image_url: record.str_field("coverImageUrl"),
        prices: record
            .array_field("prices")
            .iter()
            .filter_map(|line| {
                Some(PriceGroupAmounts {
                    group: line.str_field("group")?,
                    net: line.decimal_field("net"),
                    gross: line.decimal_field("gross"),
                })
            })
            .collect(),
        contributors: record
            .array_field("stakeholders")
            .iter()
            .filter_map(stakeholder)
            .collect(),
    })
}

fn stakeholder(line: &RawRecord) -> Option<RawContributor> {
    let kind = match line.str_field("kind")?.to_lowercase().as_str() {
        "resource" => ContributorKind::Resource,
        "creditor" => ContributorKind::Creditor,
        _ => return None,
    };
    Some(RawContributor {
        kind,
        key: line.str_field("key")?,
        role: line.str_field("role"),
        priority: line
            .str_field("priority")
            .and_then(|p| p.parse().ok())
            .unwrap_or(0),
    })
}
