//! Backend-neutral product facts
//!
//! Each backend translates its own field names into `ProductFacts` once per
//! adapter; every mapping rule reads from this structure only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw values of one product, still in backend vocabulary (codes, labels)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFacts {
    pub record_id: String,
    pub product_number: String,
    pub gtin: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub original_title: Option<String>,
    pub media_type: Option<String>,
    pub binding_code: Option<String>,
    pub main_group: Option<String>,
    pub sub_group: Option<String>,
    pub library_class_id: Option<String>,
    pub age_group: Option<String>,
    pub notify_code: Option<String>,
    pub vat_code: Option<String>,
    pub owner_code: Option<String>,
    pub imprint: Option<String>,
    pub language: Option<String>,
    pub original_language: Option<String>,
    pub pages: Option<u32>,
    pub duration: Option<String>,
    pub series: Option<SeriesFacts>,
    pub publication_date: Option<NaiveDate>,
    pub measurements: Measurements,
    pub print_country: Option<String>,
    pub cost_center: Option<String>,
    pub discount_group: Option<String>,
    pub cover_image_url: Option<String>,
    pub prices: Vec<PriceGroupAmounts>,
    pub contributors: Vec<RawContributor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesFacts {
    pub name: String,
    pub number: Option<String>,
}

/// Physical dimensions in millimetres and weight in grams
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    pub height: Option<Decimal>,
    pub width: Option<Decimal>,
    pub thickness: Option<Decimal>,
    pub weight: Option<Decimal>,
}

/// Net and gross amounts of one backend price group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceGroupAmounts {
    pub group: String,
    pub net: Option<Decimal>,
    pub gross: Option<Decimal>,
}

/// Which name register a contributor key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributorKind {
    /// External person or organisation registered as a resource
    Resource,
    /// Internal creditor (author account)
    Creditor,
}

/// One stakeholder line as found in the backend record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContributor {
    pub kind: ContributorKind,
    pub key: String,
    pub role: Option<String>,
    pub priority: i32,
}

/// One print run of the product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintEvent {
    pub number: u32,
    pub date: Option<NaiveDate>,
}

/// One subject heading returned by the bibliographic keyword search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubjectRecord {
    #[serde(default)]
    pub heading: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl RawSubjectRecord {
    /// Heading parts joined into a single label
    pub fn label(&self) -> String {
        self.heading
            .iter()
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
