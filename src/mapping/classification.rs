//! Subject classification
//!
//! Combines the library class, the publisher's own product groups, the
//! BISAC/BIC/Thema tables, the fiction genre table, the book-trade letters
//! and the keyword search results into one ordered list of subjects.

use super::{
    fields::zero_pad,
    tables::{BIC, BISAC, FICTION_GENRES, THEMA_INTEREST_AGE, THEMA_SUBJECT},
};
use crate::models::{
    enums::KeywordOntology,
    facts::{ProductFacts, RawSubjectRecord},
    onix::ClassificationEntry,
};

/// Main group code of non-fiction titles
pub const NON_FICTION_MAIN_GROUP: &str = "02";

pub const SCHEME_LIBRARY_CLASS: &str = "66";
pub const SCHEME_PUBLISHER_CATEGORY: &str = "23";
pub const SCHEME_BISAC: &str = "10";
pub const SCHEME_BIC: &str = "12";
pub const SCHEME_THEMA_SUBJECT: &str = "93";
pub const SCHEME_THEMA_INTEREST_AGE: &str = "98";
pub const SCHEME_FICTION_GENRE: &str = "80";
pub const SCHEME_BOOK_TRADE: &str = "73";
pub const SCHEME_KEYWORDS: &str = "20";

/// Values the classification needs from the backend's code tables
#[derive(Debug, Clone, Default)]
pub struct ClassificationLookups {
    /// Library class label, e.g. `84.2 L`
    pub library_class: Option<String>,
    pub main_group_name: Option<String>,
    pub sub_group_name: Option<String>,
}

/// Build the complete subject list of one product
pub fn classify(
    facts: &ProductFacts,
    lookups: &ClassificationLookups,
    subjects: &[RawSubjectRecord],
) -> Vec<ClassificationEntry> {
    let main_group = facts.main_group.as_deref().map(|g| zero_pad(g, 2));
    let sub_group = facts.sub_group.as_deref().map(|g| zero_pad(g, 2));

    let mut entries = Vec::new();

    if let Some(label) = &lookups.library_class {
        entries.push(ClassificationEntry::code(
            SCHEME_LIBRARY_CLASS,
            "YKL",
            library_class_code(label),
        ));
    }

    if let Some(group) = &main_group {
        entries.push(ClassificationEntry::new(
            SCHEME_PUBLISHER_CATEGORY,
            "Main product group",
            Some(group.clone()),
            lookups.main_group_name.clone(),
        ));
    }
    if let Some(group) = &sub_group {
        entries.push(ClassificationEntry::new(
            SCHEME_PUBLISHER_CATEGORY,
            "Product sub-group",
            Some(group.clone()),
            lookups.sub_group_name.clone(),
        ));
    }

    if let Some(group) = sub_group.as_deref() {
        let tables = [
            (SCHEME_BISAC, "BISAC Subject Heading", &BISAC),
            (SCHEME_BIC, "BIC subject category", &BIC),
            (SCHEME_THEMA_SUBJECT, "Thema subject category", &THEMA_SUBJECT),
        ];
        for (scheme_id, scheme_name, table) in tables {
            if let Some(code) = table.get(group) {
                entries.push(ClassificationEntry::code(scheme_id, scheme_name, *code));
            }
        }
    }

    if let Some(code) = facts
        .age_group
        .as_deref()
        .and_then(|age| THEMA_INTEREST_AGE.get(age))
    {
        entries.push(ClassificationEntry::code(
            SCHEME_THEMA_INTEREST_AGE,
            "Thema interest age",
            *code,
        ));
    }

    if main_group.as_deref() != Some(NON_FICTION_MAIN_GROUP) {
        if let Some(genre) = sub_group.as_deref().and_then(|g| FICTION_GENRES.get(g)) {
            entries.push(ClassificationEntry::code(
                SCHEME_FICTION_GENRE,
                "Fiktiivisen aineiston lisäluokitus",
                *genre,
            ));
        }
    }

    if let Some(label) = &lookups.library_class {
        entries.extend(label.chars().filter(|c| c.is_alphabetic()).map(|letter| {
            ClassificationEntry::code(
                SCHEME_BOOK_TRADE,
                "Suomalainen kirja-alan luokitus",
                letter.to_string(),
            )
        }));
    }

    entries.extend(keyword_entries(subjects));

    entries.retain(|entry| !entry.is_blank());

    let aggregate = keyword_aggregate(&entries);
    if !aggregate.is_empty() {
        entries.push(ClassificationEntry::new(
            SCHEME_KEYWORDS,
            "Keywords",
            None,
            Some(aggregate),
        ));
    }

    entries
}

/// Topic headings from the keyword search, one entry each
pub fn keyword_entries(subjects: &[RawSubjectRecord]) -> Vec<ClassificationEntry> {
    subjects
        .iter()
        .filter(|s| s.kind == "topic")
        .map(|subject| {
            let label = subject.label();
            match subject.source.as_deref().and_then(KeywordOntology::from_source) {
                Some(ontology) => ClassificationEntry::code(
                    ontology.scheme_id(),
                    ontology.scheme_name(),
                    label,
                ),
                None => ClassificationEntry {
                    scheme_id: None,
                    scheme_name: "Unknown".to_string(),
                    code: Some(label),
                    heading_text: None,
                },
            }
        })
        .collect()
}

/// Codes of the aggregated keyword ontologies joined by `;`, in order and
/// with repeats kept
pub fn keyword_aggregate(entries: &[ClassificationEntry]) -> String {
    let aggregated: Vec<&str> = [
        KeywordOntology::Kauno,
        KeywordOntology::Yso,
        KeywordOntology::Ysa,
        KeywordOntology::Allars,
    ]
    .iter()
    .filter(|o| o.is_aggregated())
    .map(|o| o.scheme_id())
    .collect();

    entries
        .iter()
        .filter(|e| e.scheme_id.as_deref().is_some_and(|id| aggregated.contains(&id)))
        .filter_map(|e| e.code.as_deref())
        .collect::<Vec<_>>()
        .join(";")
}

/// Library class digits and periods, e.g. `84.2 L` → `84.2`
fn library_class_code(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(label: &str, source: &str) -> RawSubjectRecord {
        RawSubjectRecord {
            heading: vec![label.to_string()],
            kind: "topic".to_string(),
            source: Some(source.to_string()),
            id: None,
        }
    }

    fn fiction_facts(sub_group: &str) -> ProductFacts {
        ProductFacts {
            main_group: Some("1".to_string()),
            sub_group: Some(sub_group.to_string()),
            age_group: Some("12+".to_string()),
            ..Default::default()
        }
    }

    fn lookups() -> ClassificationLookups {
        ClassificationLookups {
            library_class: Some("84.2 L".to_string()),
            main_group_name: Some("Kaunokirjallisuus".to_string()),
            sub_group_name: Some("Dekkarit".to_string()),
        }
    }

    fn scheme_ids(entries: &[ClassificationEntry]) -> Vec<Option<&str>> {
        entries.iter().map(|e| e.scheme_id.as_deref()).collect()
    }

    #[test]
    fn test_full_classification_order() {
        let entries = classify(&fiction_facts("3"), &lookups(), &[subject("murha", "yso")]);
        assert_eq!(
            scheme_ids(&entries),
            vec![
                Some("66"),
                Some("23"),
                Some("23"),
                Some("10"),
                Some("12"),
                Some("93"),
                Some("98"),
                Some("80"),
                Some("73"),
                Some("71"),
                Some("20"),
            ]
        );
        assert_eq!(entries[0].code.as_deref(), Some("84.2"));
        assert_eq!(entries[1].code.as_deref(), Some("01"));
        assert_eq!(entries[2].heading_text.as_deref(), Some("Dekkarit"));
        assert_eq!(entries[3].code.as_deref(), Some("FIC022000"));
        assert_eq!(entries[6].code.as_deref(), Some("5AN"));
        assert_eq!(entries[7].code.as_deref(), Some("Jännitys"));
        assert_eq!(entries[8].code.as_deref(), Some("L"));
    }

    #[test]
    fn test_missing_bisac_entry_is_omitted() {
        let entries = classify(&fiction_facts("38"), &ClassificationLookups::default(), &[]);
        assert!(entries.iter().all(|e| e.scheme_id.as_deref() != Some(SCHEME_BISAC)));
        assert!(entries.iter().all(|e| e.code.is_some() || e.heading_text.is_some()));
    }

    #[test]
    fn test_fiction_genre_suppressed_for_non_fiction() {
        let facts = ProductFacts {
            main_group: Some("2".to_string()),
            sub_group: Some("14".to_string()),
            ..Default::default()
        };
        let entries = classify(&facts, &ClassificationLookups::default(), &[]);
        assert!(entries.iter().all(|e| e.scheme_id.as_deref() != Some(SCHEME_FICTION_GENRE)));

        let entries = classify(&fiction_facts("14"), &ClassificationLookups::default(), &[]);
        assert!(entries.iter().any(|e| e.scheme_id.as_deref() == Some(SCHEME_FICTION_GENRE)));
    }

    #[test]
    fn test_book_trade_letters() {
        let lookups = ClassificationLookups {
            library_class: Some("85.1 K N".to_string()),
            ..Default::default()
        };
        let entries = classify(&ProductFacts::default(), &lookups, &[]);
        let letters: Vec<_> = entries
            .iter()
            .filter(|e| e.scheme_id.as_deref() == Some(SCHEME_BOOK_TRADE))
            .filter_map(|e| e.code.as_deref())
            .collect();
        assert_eq!(letters, vec!["K", "N"]);
    }

    #[test]
    fn test_keyword_sources_and_aggregate() {
        let mut other = subject("ignored", "yso");
        other.kind = "geographic".to_string();
        let subjects = vec![
            subject("sota", "kauno"),
            subject("krig", "allars"),
            subject("sota", "yso"),
            subject("mystery", "lcsh"),
            subject("rintama", "ysa"),
            other,
        ];
        let entries = classify(&ProductFacts::default(), &ClassificationLookups::default(), &subjects);

        let unknown = entries.iter().find(|e| e.scheme_id.is_none()).unwrap();
        assert_eq!(unknown.scheme_name, "Unknown");
        assert_eq!(unknown.code.as_deref(), Some("mystery"));

        let keywords = entries.last().unwrap();
        assert_eq!(keywords.scheme_id.as_deref(), Some(SCHEME_KEYWORDS));
        assert_eq!(keywords.heading_text.as_deref(), Some("sota;sota;rintama"));
        assert!(entries.iter().all(|e| e.code.as_deref() != Some("ignored")));
    }

    #[test]
    fn test_blank_entries_are_dropped() {
        let lookups = ClassificationLookups {
            library_class: Some("---".to_string()),
            ..Default::default()
        };
        let subjects = vec![RawSubjectRecord {
            heading: vec!["  ".to_string()],
            kind: "topic".to_string(),
            source: Some("yso".to_string()),
            id: None,
        }];
        let entries = classify(&ProductFacts::default(), &lookups, &subjects);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let subjects = vec![subject("sota", "kauno"), subject("sota", "yso")];
        let first = classify(&fiction_facts("10"), &lookups(), &subjects);
        let second = classify(&fiction_facts("10"), &lookups(), &subjects);
        assert_eq!(first, second);
    }
}
