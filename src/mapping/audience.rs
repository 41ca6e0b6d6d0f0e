//! Audience range resolution
//!
//! Age-group labels such as `12+` are turned into a numeric interval using
//! the ordered age-group table held by the catalog backend. The upper bound
//! is the next table entry, with 18 closing the last interval.

use crate::{
    error::{AppError, AppResult},
    models::onix::{Audience, AudienceRange},
};

/// ONIX audience range qualifier "interest age, years"
pub const INTEREST_AGE_YEARS: u8 = 17;

/// Upper bound appended after the last age group
pub const AGE_CEILING: u32 = 18;

/// Resolve an age-group label against the backend's age-group labels.
///
/// Returns `Ok(None)` when the product has no label and an error when the
/// label is missing from the table.
pub fn resolve_range(age_group: Option<&str>, table: &[String]) -> AppResult<Option<AudienceRange>> {
    let Some(label) = age_group else {
        return Ok(None);
    };

    let mut ages: Vec<u32> = table.iter().map(|l| numeric_age(l)).collect();
    ages.sort_unstable();
    ages.push(AGE_CEILING);

    // Position is looked up in the unsorted labels, bounds come from the sorted ages
    let position = table
        .iter()
        .position(|l| l == label)
        .ok_or_else(|| AppError::unmapped("age_group", label))?;

    match (ages.get(position), ages.get(position + 1)) {
        (Some(&from_age), Some(&to_age)) => Ok(Some(AudienceRange {
            qualifier: INTEREST_AGE_YEARS,
            from_age,
            to_age,
        })),
        _ => Err(AppError::unmapped("age_group", label)),
    }
}

/// ONIX audience codes (List 28) derived from the resolved range
pub fn audience_codes(range: Option<&AudienceRange>) -> Vec<Audience> {
    let code = match range.map(|r| r.from_age) {
        Some(age) if age < 13 => "02",
        Some(age) if age < AGE_CEILING => "03",
        _ => "01",
    };
    vec![Audience {
        code_type: "01".to_string(),
        code_value: code.to_string(),
    }]
}

/// Digits of a label as a number; labels without digits count as zero
fn numeric_age(label: &str) -> u32 {
    label
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}
