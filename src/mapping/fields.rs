//! Single-field mappers
//!
//! Translates raw backend codes into ONIX codelist values. Every function is
//! total over observed input: values without a special rule pass through
//! unchanged and absent input yields `None`. The publishing status is the one
//! deliberate exception and reports unknown codes as errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::tables::PUBLISHERS;
use crate::{
    error::{AppError, AppResult},
    models::{
        facts::{PrintEvent, ProductFacts},
        onix::{
            Collection, Extent, Language, Measure, ProductIdentifier, Publisher, PublishingDate,
            SalesRights, TitleDetail,
        },
    },
};

/// Sub-group of trade-only marketing material
pub const TRADE_ONLY_SUB_GROUP: &str = "38";

/// ONIX product form (List 150)
pub fn product_form(media_type: Option<&str>, binding_code: Option<&str>) -> Option<String> {
    let media_type = media_type?;
    let form = match (media_type, binding_code) {
        ("EB", _) => "EA",
        ("KI", _) => "BF",
        ("AU", Some("CD")) => "AC",
        _ => media_type,
    };
    Some(form.to_string())
}

/// ONIX product form detail (List 175)
pub fn product_form_detail(binding_code: Option<&str>) -> Option<String> {
    let binding_code = binding_code?;
    let detail = match binding_code {
        "XEPUB" => "E101",
        "XAPP" => "E136",
        "XMP3" => "A103",
        "XCDA" => "A101",
        other => other,
    };
    Some(detail.to_string())
}

/// ONIX product composition (List 2)
pub fn product_composition(sub_group: Option<&str>) -> &'static str {
    match sub_group.map(|g| zero_pad(g, 2)) {
        Some(g) if g == TRADE_ONLY_SUB_GROUP => "20",
        _ => "00",
    }
}

/// ONIX publishing status (List 64) from the internal notify code
pub fn publishing_status(notify_code: Option<&str>) -> AppResult<Option<&'static str>> {
    let Some(code) = notify_code else {
        return Ok(None);
    };
    let status = match code {
        "Y" => "01",
        "E" => "02",
        "V" => "03",
        "P" => "04",
        "S" => "06",
        "X" => "07",
        "W" => "11",
        "T" => "16",
        other => return Err(AppError::unmapped("notify_code", other)),
    };
    Ok(Some(status))
}

/// Tax percentage from a VAT label such as `ALV 10 %`
pub fn tax_rate(vat_label: Option<&str>) -> Option<Decimal> {
    let digits = digits_only(vat_label?);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Products without a physical carrier
pub fn is_immaterial(product_form: Option<&str>) -> bool {
    match product_form {
        Some(form) => form.starts_with('E') || form == "AJ" || form == "AN",
        None => false,
    }
}

pub fn product_identifiers(facts: &ProductFacts) -> Vec<ProductIdentifier> {
    let mut identifiers = vec![ProductIdentifier {
        id_type: "01".to_string(),
        id_type_name: Some("Product number".to_string()),
        id_value: facts.product_number.clone(),
    }];

    if let Some(gtin) = facts.gtin.as_deref().map(normalize_gtin) {
        if gtin.len() == 13 {
            identifiers.push(ProductIdentifier {
                id_type: "03".to_string(),
                id_type_name: None,
                id_value: gtin.clone(),
            });
            if gtin.starts_with("978") || gtin.starts_with("979") {
                identifiers.push(ProductIdentifier {
                    id_type: "15".to_string(),
                    id_type_name: None,
                    id_value: gtin,
                });
            }
        }
    }

    identifiers
}

pub fn title_details(facts: &ProductFacts) -> Vec<TitleDetail> {
    let mut titles = Vec::new();
    if let Some(title) = &facts.title {
        titles.push(TitleDetail {
            title_type: "01".to_string(),
            title_text: title.clone(),
            subtitle: facts.subtitle.clone(),
        });
    }
    if let Some(original) = &facts.original_title {
        titles.push(TitleDetail {
            title_type: "03".to_string(),
            title_text: original.clone(),
            subtitle: None,
        });
    }
    titles
}

pub fn collections(facts: &ProductFacts) -> Vec<Collection> {
    facts
        .series
        .iter()
        .map(|series| Collection {
            collection_type: "10".to_string(),
            title_text: series.name.clone(),
            part_number: series.number.clone(),
        })
        .collect()
}

pub fn languages(facts: &ProductFacts) -> Vec<Language> {
    let mut languages = Vec::new();
    if let Some(code) = facts.language.as_deref().and_then(language_code) {
        languages.push(Language {
            role: "01".to_string(),
            code,
        });
    }
    if let Some(code) = facts.original_language.as_deref().and_then(language_code) {
        languages.push(Language {
            role: "02".to_string(),
            code,
        });
    }
    languages
}

/// Page count and running time
pub fn extents(facts: &ProductFacts) -> Vec<Extent> {
    let mut extents = Vec::new();
    if let Some(pages) = facts.pages.filter(|p| *p > 0) {
        extents.push(Extent {
            extent_type: "00".to_string(),
            extent_value: pages.to_string(),
            extent_unit: "03".to_string(),
        });
    }
    if let Some(duration) = facts.duration.as_deref().and_then(duration_hhhmmss) {
        extents.push(Extent {
            extent_type: "09".to_string(),
            extent_value: duration,
            extent_unit: "15".to_string(),
        });
    }
    extents
}

pub fn measures(facts: &ProductFacts) -> Vec<Measure> {
    let m = &facts.measurements;
    [
        ("01", m.height, "mm"),
        ("02", m.width, "mm"),
        ("03", m.thickness, "mm"),
        ("08", m.weight, "gr"),
    ]
    .into_iter()
    .filter_map(|(measure_type, value, unit)| {
        value.filter(|v| *v > Decimal::ZERO).map(|measurement| Measure {
            measure_type: measure_type.to_string(),
            measurement,
            unit: unit.to_string(),
        })
    })
    .collect()
}

/// Publication date and the date of the latest print run
pub fn publishing_dates(facts: &ProductFacts, latest_print: Option<&PrintEvent>) -> Vec<PublishingDate> {
    let mut dates = Vec::new();
    if let Some(date) = facts.publication_date {
        dates.push(PublishingDate {
            role: "01".to_string(),
            date,
        });
    }
    if let Some(date) = latest_print.and_then(|p| p.date) {
        dates.push(PublishingDate {
            role: "12".to_string(),
            date,
        });
    }
    dates
}

/// Latest print run, by print number
pub fn latest_print(history: &[PrintEvent]) -> Option<&PrintEvent> {
    history.iter().max_by_key(|p| p.number)
}

/// ONIX notification type (List 1)
pub fn notification_type(publication_date: Option<NaiveDate>, today: NaiveDate) -> &'static str {
    match publication_date {
        Some(date) if date > today => "02",
        _ => "03",
    }
}

/// Publisher from the owner code; an owner without a mapping is a data error
pub fn publisher(owner_code: Option<&str>) -> AppResult<Option<Publisher>> {
    let Some(owner) = owner_code else {
        return Ok(None);
    };
    let name = PUBLISHERS
        .get(owner)
        .ok_or_else(|| AppError::unmapped("owner_code", owner))?;
    Ok(Some(Publisher {
        role: "01".to_string(),
        name: name.to_string(),
    }))
}

pub fn sales_rights() -> Vec<SalesRights> {
    vec![SalesRights {
        sales_rights_type: "01".to_string(),
        territory: "WORLD".to_string(),
    }]
}

/// ISO 3166-1 country code
pub fn country_of_manufacture(print_country: Option<&str>) -> Option<String> {
    print_country
        .map(str::trim)
        .filter(|c| c.len() == 2)
        .map(str::to_uppercase)
}

/// ISO 639-2/B language code, widening the common two-letter forms
fn language_code(code: &str) -> Option<String> {
    let code = code.trim().to_lowercase();
    let widened = match code.as_str() {
        "" => return None,
        "fi" => "fin",
        "sv" => "swe",
        "en" => "eng",
        "de" => "ger",
        "fr" => "fre",
        "ru" => "rus",
        "et" => "est",
        "es" => "spa",
        "it" => "ita",
        "ja" => "jpn",
        "no" => "nor",
        "da" => "dan",
        other => other,
    };
    Some(widened.to_string())
}

/// Running time as HHHMMSS from `h:mm`, `h:mm:ss` or plain minutes
fn duration_hhhmmss(duration: &str) -> Option<String> {
    let parts: Vec<u32> = duration
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;
    let (hours, minutes, seconds) = match parts.as_slice() {
        [minutes] => (0, *minutes, 0),
        [hours, minutes] => (*hours, *minutes, 0),
        [hours, minutes, seconds] => (*hours, *minutes, *seconds),
        _ => return None,
    };
    let seconds = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    // HHH holds at most 999 hours
    if seconds == 0 || seconds / 3600 > 999 {
        return None;
    }
    Some(format!(
        "{:03}{:02}{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    ))
}

/// Remove hyphens and spaces from an EAN/ISBN
pub fn normalize_gtin(gtin: &str) -> String {
    gtin.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Keep ASCII digits only
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Left-pad a numeric code with zeros, e.g. `3` → `03`
pub fn zero_pad(code: &str, width: usize) -> String {
    format!("{:0>width$}", code.trim(), width = width)
}
