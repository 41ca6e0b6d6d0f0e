//! Normalized, ONIX-shaped output values

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdentifier {
    pub id_type: String,
    pub id_type_name: Option<String>,
    pub id_value: String,
}

/// One subject entry (ONIX `<Subject>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationEntry {
    /// `None` marks a keyword from an unrecognised ontology
    pub scheme_id: Option<String>,
    pub scheme_name: String,
    pub code: Option<String>,
    pub heading_text: Option<String>,
}

impl ClassificationEntry {
    pub fn new(
        scheme_id: &str,
        scheme_name: &str,
        code: Option<String>,
        heading_text: Option<String>,
    ) -> Self {
        Self {
            scheme_id: Some(scheme_id.to_string()),
            scheme_name: scheme_name.to_string(),
            code,
            heading_text,
        }
    }

    /// Entry carrying a code only
    pub fn code(scheme_id: &str, scheme_name: &str, code: impl Into<String>) -> Self {
        Self::new(scheme_id, scheme_name, Some(code.into()), None)
    }

    /// True when neither a code nor a heading carries any text
    pub fn is_blank(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.code) && blank(&self.heading_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameIdentifier {
    pub id_type: String,
    pub id_type_name: String,
    pub id_value: String,
}

/// One contributor (ONIX `<Contributor>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorEntry {
    pub sequence_number: u32,
    pub role: String,
    pub name_identifier: NameIdentifier,
    pub inverted_name: String,
    pub first_name: Option<String>,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub tax_type: String,
    pub tax_rate_code: String,
    pub tax_rate_percent: Decimal,
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
}

/// One price (ONIX `<Price>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub price_type_code: String,
    pub amount: Decimal,
    pub tax: TaxBreakdown,
    pub currency: String,
    pub territory: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceRange {
    pub qualifier: u8,
    pub from_age: u32,
    pub to_age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    pub code_type: String,
    pub code_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extent {
    pub extent_type: String,
    pub extent_value: String,
    pub extent_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub measure_type: String,
    pub measurement: Decimal,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleDetail {
    pub title_type: String,
    pub title_text: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub collection_type: String,
    pub title_text: String,
    pub part_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub role: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingDate {
    pub role: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub role: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text_type: String,
    pub content_audience: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingResource {
    pub content_type: String,
    pub content_audience: String,
    pub mode: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRights {
    pub sales_rights_type: String,
    pub territory: String,
}
