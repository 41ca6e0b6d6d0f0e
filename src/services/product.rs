//! Product adapters
//!
//! `ProductInterface` is the capability set every adapter offers. Both
//! catalog backends share one implementation, `ProductAdapter`, and differ
//! only in their `ProductSource`: how the record is loaded and translated
//! into `ProductFacts`, and where texts and print history come from.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::backend::{CatalogBackend, KeywordSearch};
use crate::{
    config::AssetConfig,
    error::AppResult,
    mapping::{
        audience,
        classification::{self, ClassificationLookups, SCHEME_KEYWORDS},
        contributors::{self, NameResolver},
        fields, prices, resources,
        sanitizer::Sanitizer,
    },
    models::{
        enums::CodeDomain,
        facts::{ContributorKind, PrintEvent, ProductFacts},
        onix::{
            Audience, AudienceRange, ClassificationEntry, Collection, ContributorEntry, Extent,
            Language, Measure, PriceEntry, ProductIdentifier, Publisher, PublishingDate,
            SalesRights, SupportingResource, TextContent, TitleDetail,
        },
        report::ProductReport,
    },
};

/// ONIX text type used when a backend does not tell one
pub const DEFAULT_TEXT_TYPE: &str = "03";

/// A marketing text still in backend markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    pub text_type: String,
    pub markup: String,
}

/// Backend-specific part of an adapter
#[async_trait]
pub trait ProductSource: Send + Sync {
    fn facts(&self) -> &ProductFacts;

    /// Marketing texts, fetched on every call where the backend serves them separately
    async fn texts(&self) -> AppResult<Vec<RawText>>;

    async fn print_history(&self) -> AppResult<Vec<PrintEvent>>;
}

/// Every normalized value of one product
#[async_trait]
pub trait ProductInterface: Send + Sync {
    fn record_id(&self) -> &str;
    fn product_number(&self) -> &str;
    fn product_identifiers(&self) -> Vec<ProductIdentifier>;
    fn product_composition(&self) -> &'static str;
    fn product_form(&self) -> Option<String>;
    fn product_form_detail(&self) -> Option<String>;
    fn is_immaterial(&self) -> bool;
    fn media_type(&self) -> Option<String>;
    fn binding_code(&self) -> Option<String>;
    fn title_details(&self) -> Vec<TitleDetail>;
    fn collections(&self) -> Vec<Collection>;
    fn languages(&self) -> Vec<Language>;
    fn extents(&self) -> Vec<Extent>;
    fn measures(&self) -> Vec<Measure>;
    fn publisher(&self) -> AppResult<Option<Publisher>>;
    fn imprint(&self) -> Option<String>;
    fn publishing_status(&self) -> AppResult<Option<&'static str>>;
    fn notification_type(&self, today: NaiveDate) -> &'static str;
    fn sales_rights(&self) -> Vec<SalesRights>;
    fn country_of_manufacture(&self) -> Option<String>;
    fn cost_center(&self) -> Option<String>;
    fn discount_group(&self) -> Option<String>;
    fn supporting_resources(&self) -> AppResult<Vec<SupportingResource>>;

    async fn contributors(&self) -> AppResult<Vec<ContributorEntry>>;
    async fn subjects(&self) -> AppResult<Vec<ClassificationEntry>>;
    /// Aggregated free keywords, `;` separated
    async fn keywords(&self) -> AppResult<Option<String>>;
    async fn audience_range(&self) -> AppResult<Option<AudienceRange>>;
    async fn audiences(&self) -> AppResult<Vec<Audience>>;
    async fn tax_rate(&self) -> AppResult<Option<Decimal>>;
    async fn prices(&self) -> AppResult<Vec<PriceEntry>>;
    async fn text_contents(&self) -> AppResult<Vec<TextContent>>;
    async fn publishing_dates(&self) -> AppResult<Vec<PublishingDate>>;
    async fn latest_reprint_number(&self) -> AppResult<Option<u32>>;
}

/// Services an adapter needs besides its source
#[derive(Clone)]
pub struct Collaborators {
    pub catalog: Arc<dyn CatalogBackend>,
    pub keywords: Arc<dyn KeywordSearch>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub assets: AssetConfig,
}

pub struct ProductAdapter<S> {
    source: S,
    collaborators: Collaborators,
}

impl<S: ProductSource> ProductAdapter<S> {
    pub fn new(source: S, collaborators: Collaborators) -> Self {
        Self {
            source,
            collaborators,
        }
    }

    pub fn facts(&self) -> &ProductFacts {
        self.source.facts()
    }

    fn catalog(&self) -> &dyn CatalogBackend {
        self.collaborators.catalog.as_ref()
    }

    async fn lookup(&self, domain: CodeDomain, key: Option<String>) -> AppResult<Option<String>> {
        match key {
            Some(key) => self.catalog().lookup_code(domain, &key).await,
            None => Ok(None),
        }
    }

    async fn classification_lookups(&self) -> AppResult<ClassificationLookups> {
        let facts = self.facts();
        let pad = |g: &Option<String>| g.as_deref().map(|g| fields::zero_pad(g, 2));
        Ok(ClassificationLookups {
            library_class: self
                .lookup(CodeDomain::LibraryClass, facts.library_class_id.clone())
                .await?,
            main_group_name: self.lookup(CodeDomain::MainGroup, pad(&facts.main_group)).await?,
            sub_group_name: self.lookup(CodeDomain::SubGroup, pad(&facts.sub_group)).await?,
        })
    }

    async fn latest_print(&self) -> AppResult<Option<PrintEvent>> {
        let history = self.source.print_history().await?;
        Ok(fields::latest_print(&history).cloned())
    }
}

/// Contributor names from the catalog's name registers
struct RegisterNames<'a>(&'a dyn CatalogBackend);

#[async_trait]
impl<'a> NameResolver for RegisterNames<'a> {
    async fn resolve_name(&self, kind: ContributorKind, key: &str) -> AppResult<Option<String>> {
        let domain = match kind {
            ContributorKind::Resource => CodeDomain::Resources,
            ContributorKind::Creditor => CodeDomain::Creditors,
        };
        self.0.lookup_code(domain, key).await
    }
}

#[async_trait]
impl<S: ProductSource> ProductInterface for ProductAdapter<S> {
    fn record_id(&self) -> &str {
        &self.facts().record_id
    }

    fn product_number(&self) -> &str {
        &self.facts().product_number
    }

    fn product_identifiers(&self) -> Vec<ProductIdentifier> {
        fields::product_identifiers(self.facts())
    }

    fn product_composition(&self) -> &'static str {
        fields::product_composition(self.facts().sub_group.as_deref())
    }

    fn product_form(&self) -> Option<String> {
        let facts = self.facts();
        fields::product_form(facts.media_type.as_deref(), facts.binding_code.as_deref())
    }

    fn product_form_detail(&self) -> Option<String> {
        fields::product_form_detail(self.facts().binding_code.as_deref())
    }

    fn is_immaterial(&self) -> bool {
        fields::is_immaterial(self.product_form().as_deref())
    }

    fn media_type(&self) -> Option<String> {
        self.facts().media_type.clone()
    }

    fn binding_code(&self) -> Option<String> {
        self.facts().binding_code.clone()
    }

    fn title_details(&self) -> Vec<TitleDetail> {
        fields::title_details(self.facts())
    }

    fn collections(&self) -> Vec<Collection> {
        fields::collections(self.facts())
    }

    fn languages(&self) -> Vec<Language> {
        fields::languages(self.facts())
    }

    fn extents(&self) -> Vec<Extent> {
        fields::extents(self.facts())
    }

    fn measures(&self) -> Vec<Measure> {
        fields::measures(self.facts())
    }

    fn publisher(&self) -> AppResult<Option<Publisher>> {
        fields::publisher(self.facts().owner_code.as_deref())
    }

    fn imprint(&self) -> Option<String> {
        self.facts().imprint.clone()
    }

    fn publishing_status(&self) -> AppResult<Option<&'static str>> {
        fields::publishing_status(self.facts().notify_code.as_deref())
    }

    fn notification_type(&self, today: NaiveDate) -> &'static str {
        fields::notification_type(self.facts().publication_date, today)
    }

    fn sales_rights(&self) -> Vec<SalesRights> {
        fields::sales_rights()
    }

    fn country_of_manufacture(&self) -> Option<String> {
        fields::country_of_manufacture(self.facts().print_country.as_deref())
    }

    fn cost_center(&self) -> Option<String> {
        self.facts().cost_center.clone()
    }

    fn discount_group(&self) -> Option<String> {
        self.facts().discount_group.clone()
    }

    fn supporting_resources(&self) -> AppResult<Vec<SupportingResource>> {
        let cover = resources::cover_image(
            self.facts().cover_image_url.as_deref(),
            &self.collaborators.assets,
        )?;
        Ok(cover.into_iter().collect())
    }

    async fn contributors(&self) -> AppResult<Vec<ContributorEntry>> {
        contributors::build_contributors(&self.facts().contributors, &RegisterNames(self.catalog())).await
    }

    async fn subjects(&self) -> AppResult<Vec<ClassificationEntry>> {
        let lookups = self.classification_lookups().await?;
        let headings = match self.facts().gtin.as_deref() {
            Some(gtin) => self.collaborators.keywords.search_by_subject_key(gtin).await?,
            None => Vec::new(),
        };
        Ok(classification::classify(self.facts(), &lookups, &headings))
    }

    async fn keywords(&self) -> AppResult<Option<String>> {
        let subjects = self.subjects().await?;
        Ok(subjects
            .into_iter()
            .find(|s| s.scheme_id.as_deref() == Some(SCHEME_KEYWORDS))
            .and_then(|s| s.heading_text))
    }

    async fn audience_range(&self) -> AppResult<Option<AudienceRange>> {
        let Some(age_group) = self.facts().age_group.as_deref() else {
            return Ok(None);
        };
        let table: Vec<String> = self
            .catalog()
            .lookup_domain_table(CodeDomain::AgeGroups)
            .await?
            .into_iter()
            .map(|entry| entry.key)
            .collect();
        audience::resolve_range(Some(age_group), &table)
    }

    async fn audiences(&self) -> AppResult<Vec<Audience>> {
        let range = self.audience_range().await?;
        Ok(audience::audience_codes(range.as_ref()))
    }

    async fn tax_rate(&self) -> AppResult<Option<Decimal>> {
        let label = self
            .lookup(CodeDomain::VatCodes, self.facts().vat_code.clone())
            .await?;
        Ok(fields::tax_rate(label.as_deref()))
    }

    async fn prices(&self) -> AppResult<Vec<PriceEntry>> {
        let tax_rate = self.tax_rate().await?;
        Ok(prices::compute_prices(&self.facts().prices, tax_rate))
    }

    async fn text_contents(&self) -> AppResult<Vec<TextContent>> {
        let texts = self.source.texts().await?;
        Ok(texts
            .into_iter()
            .filter_map(|raw| {
                let text = self.collaborators.sanitizer.sanitize(&raw.markup);
                (!text.is_empty()).then(|| TextContent {
                    text_type: raw.text_type,
                    content_audience: "00".to_string(),
                    text,
                })
            })
            .collect())
    }

    async fn publishing_dates(&self) -> AppResult<Vec<PublishingDate>> {
        let latest = self.latest_print().await?;
        Ok(fields::publishing_dates(self.facts(), latest.as_ref()))
    }

    async fn latest_reprint_number(&self) -> AppResult<Option<u32>> {
        Ok(self.latest_print().await?.map(|p| p.number))
    }
}

/// Collect every value of a product, failing on the first error
pub async fn report(product: &dyn ProductInterface, today: NaiveDate) -> AppResult<ProductReport> {
    Ok(ProductReport {
        record_id: product.record_id().to_string(),
        product_number: product.product_number().to_string(),
        generated_on: today,
        notification_type: product.notification_type(today).to_string(),
        identifiers: product.product_identifiers(),
        composition: product.product_composition().to_string(),
        form: product.product_form(),
        form_detail: product.product_form_detail(),
        immaterial: product.is_immaterial(),
        media_type: product.media_type(),
        binding_code: product.binding_code(),
        titles: product.title_details(),
        collections: product.collections(),
        contributors: product.contributors().await?,
        languages: product.languages(),
        extents: product.extents(),
        measures: product.measures(),
        subjects: product.subjects().await?,
        keywords: product.keywords().await?,
        audiences: product.audiences().await?,
        audience_range: product.audience_range().await?,
        text_contents: product.text_contents().await?,
        publisher: product.publisher()?,
        imprint: product.imprint(),
        publishing_status: product.publishing_status()?.map(str::to_string),
        publishing_dates: product.publishing_dates().await?,
        latest_reprint_number: product.latest_reprint_number().await?,
        tax_rate: product.tax_rate().await?,
        prices: product.prices().await?,
        supporting_resources: product.supporting_resources()?,
        sales_rights: product.sales_rights(),
        country_of_manufacture: product.country_of_manufacture(),
        cost_center: product.cost_center(),
        discount_group: product.discount_group(),
    })
}
