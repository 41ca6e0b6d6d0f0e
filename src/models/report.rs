//! Flattened view of every mapped value of one product

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::onix::{
    Audience, AudienceRange, ClassificationEntry, Collection, ContributorEntry, Extent, Language,
    Measure, PriceEntry, ProductIdentifier, Publisher, PublishingDate, SalesRights,
    SupportingResource, TextContent, TitleDetail,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    pub record_id: String,
    pub product_number: String,
    pub generated_on: NaiveDate,
    pub notification_type: String,
    pub identifiers: Vec<ProductIdentifier>,
    pub composition: String,
    pub form: Option<String>,
    pub form_detail: Option<String>,
    pub immaterial: bool,
    pub media_type: Option<String>,
    pub binding_code: Option<String>,
    pub titles: Vec<TitleDetail>,
    pub collections: Vec<Collection>,
    pub contributors: Vec<ContributorEntry>,
    pub languages: Vec<Language>,
    pub extents: Vec<Extent>,
    pub measures: Vec<Measure>,
    pub subjects: Vec<ClassificationEntry>,
    pub keywords: Option<String>,
    pub audiences: Vec<Audience>,
    pub audience_range: Option<AudienceRange>,
    pub text_contents: Vec<TextContent>,
    pub publisher: Option<Publisher>,
    pub imprint: Option<String>,
    pub publishing_status: Option<String>,
    pub publishing_dates: Vec<PublishingDate>,
    pub latest_reprint_number: Option<u32>,
    pub tax_rate: Option<Decimal>,
    pub prices: Vec<PriceEntry>,
    pub supporting_resources: Vec<SupportingResource>,
    pub sales_rights: Vec<SalesRights>,
    pub country_of_manufacture: Option<String>,
    pub cost_center: Option<String>,
    pub discount_group: Option<String>,
}
