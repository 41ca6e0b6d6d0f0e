//! Static mapping tables
//!
//! Built once per process on first use and shared read-only afterwards.
//! Subject tables are keyed by the two-digit internal sub-group code; a code
//! missing from a table simply produces no entry for that scheme.

use std::collections::HashMap;

use once_cell::sync::Lazy;

type Table = Lazy<HashMap<&'static str, &'static str>>;

/// Sub-group → BISAC subject code
pub static BISAC: Table = Lazy::new(|| {
    HashMap::from([
        ("01", "FIC000000"),
        ("02", "FIC019000"),
        ("03", "FIC022000"),
        ("04", "FIC031000"),
        ("05", "FIC009000"),
        ("06", "FIC027000"),
        ("07", "POE000000"),
        ("08", "DRA000000"),
        ("09", "CGN000000"),
        ("10", "FIC014000"),
        ("11", "BIO000000"),
        ("12", "HIS000000"),
        ("13", "PHI000000"),
        ("14", "REL000000"),
        ("15", "PSY000000"),
        ("16", "SOC000000"),
        ("17", "POL000000"),
        ("18", "BUS000000"),
        ("19", "SCI000000"),
        ("20", "NAT000000"),
        ("21", "HEA000000"),
        ("22", "CKB000000"),
        ("23", "CRA000000"),
        ("24", "GAR000000"),
        ("25", "TRV000000"),
        ("26", "SPO000000"),
        ("27", "ART000000"),
        ("28", "MUS000000"),
        ("29", "LAN000000"),
        ("30", "EDU000000"),
        ("31", "JUV000000"),
        ("32", "JUV000000"),
        ("33", "YAF000000"),
        ("34", "JNF000000"),
        ("35", "JNF001000"),
        ("36", "NON000000"),
        ("37", "REF008000"),
        ("40", "LCO010000"),
        ("41", "HUM000000"),
        ("42", "TRU000000"),
        ("43", "SEL000000"),
        ("44", "FAM000000"),
        ("45", "PET000000"),
        ("46", "PHO000000"),
        ("47", "ARC000000"),
        ("48", "MED000000"),
        ("49", "LAW000000"),
        ("50", "COM000000"),
    ])
});

/// Sub-group → BIC subject code
pub static BIC: Table = Lazy::new(|| {
    HashMap::from([
        ("01", "FA"),
        ("02", "FA"),
        ("03", "FF"),
        ("04", "FH"),
        ("05", "FM"),
        ("06", "FR"),
        ("07", "DC"),
        ("08", "DD"),
        ("09", "FX"),
        ("10", "FV"),
        ("11", "BG"),
        ("12", "HB"),
        ("13", "HP"),
        ("14", "HR"),
        ("15", "JM"),
        ("16", "JH"),
        ("17", "JP"),
        ("18", "KC"),
        ("19", "PD"),
        ("20", "WN"),
        ("21", "VF"),
        ("22", "WB"),
        ("23", "WF"),
        ("24", "WM"),
        ("25", "WT"),
        ("26", "WS"),
        ("27", "A"),
        ("28", "AV"),
        ("29", "CF"),
        ("30", "JN"),
        ("31", "YBC"),
        ("32", "YFB"),
        ("33", "YFB"),
        ("34", "YN"),
        ("35", "YBG"),
        ("36", "WZ"),
        ("37", "CBD"),
        ("40", "DN"),
        ("41", "WH"),
        ("42", "JKV"),
        ("43", "VS"),
        ("44", "VFV"),
        ("45", "WNG"),
        ("46", "AJ"),
        ("47", "AM"),
        ("48", "M"),
        ("49", "L"),
        ("50", "U"),
    ])
});

/// Sub-group → Thema subject category
pub static THEMA_SUBJECT: Table = Lazy::new(|| {
    HashMap::from([
        ("01", "FBA"),
        ("02", "FBA"),
        ("03", "FF"),
        ("04", "FH"),
        ("05", "FM"),
        ("06", "FR"),
        ("07", "DC"),
        ("08", "DD"),
        ("09", "XQ"),
        ("10", "FV"),
        ("11", "DNB"),
        ("12", "NH"),
        ("13", "QD"),
        ("14", "QR"),
        ("15", "JM"),
        ("16", "JB"),
        ("17", "JP"),
        ("18", "KC"),
        ("19", "PD"),
        ("20", "WN"),
        ("21", "VF"),
        ("22", "WB"),
        ("23", "WF"),
        ("24", "WM"),
        ("25", "WT"),
        ("26", "S"),
        ("27", "A"),
        ("28", "AV"),
        ("29", "CF"),
        ("30", "JN"),
        ("31", "YBC"),
        ("32", "YFB"),
        ("33", "YFB"),
        ("34", "YN"),
        ("35", "YBG"),
        ("36", "WZ"),
        ("37", "CBD"),
        ("40", "DN"),
        ("41", "WH"),
        ("42", "DNXC"),
        ("43", "VS"),
        ("44", "VFV"),
        ("45", "WNG"),
        ("46", "AJ"),
        ("47", "AM"),
        ("48", "M"),
        ("49", "L"),
        ("50", "U"),
    ])
});

/// Age-group label → Thema interest age qualifier
pub static THEMA_INTEREST_AGE: Table = Lazy::new(|| {
    HashMap::from([
        ("0+", "5AB"),
        ("3+", "5AC"),
        ("5+", "5AF"),
        ("7+", "5AH"),
        ("9+", "5AK"),
        ("10+", "5AL"),
        ("12+", "5AN"),
        ("15+", "5AS"),
    ])
});

/// Sub-group → fiction genre (only applied outside the non-fiction main group)
pub static FICTION_GENRES: Table = Lazy::new(|| {
    HashMap::from([
        ("03", "Jännitys"),
        ("04", "Jännitys"),
        ("05", "Fantasia"),
        ("06", "Romantiikka"),
        ("09", "Sarjakuvat"),
        ("10", "Historia"),
        ("14", "Uskonto"),
        ("26", "Urheilu"),
        ("41", "Huumori"),
        ("45", "Eläimet"),
    ])
});

/// Internal stakeholder role → ONIX contributor role (List 17)
pub static CONTRIBUTOR_ROLES: Table = Lazy::new(|| {
    HashMap::from([
        ("AUT", "A01"),
        ("CRE", "A09"),
        ("ILL", "A12"),
        ("REA", "E07"),
        ("TRA", "B06"),
        ("EDI", "B01"),
        ("PHO", "A13"),
        ("COV", "A36"),
        ("DES", "A11"),
        ("MAP", "A39"),
        ("COM", "C01"),
        ("SEL", "C02"),
        ("ADA", "B05"),
        ("ABR", "B04"),
        ("PRE", "A15"),
        ("INT", "A24"),
        ("AFT", "A19"),
        ("NOT", "A20"),
        ("CON", "A32"),
    ])
});

/// ONIX contributor role → ordering priority, higher sorts first
pub static ROLE_PRIORITIES: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    HashMap::from([
        ("A01", 99),
        ("A09", 98),
        ("A12", 97),
        ("E07", 96),
        ("B06", 95),
        ("B01", 94),
        ("A13", 93),
        ("A36", 92),
        ("A11", 91),
        ("A39", 90),
        ("C01", 89),
        ("C02", 88),
        ("B05", 87),
        ("B04", 86),
        ("A15", 85),
        ("A24", 84),
        ("A19", 83),
        ("A20", 82),
        ("A32", 81),
    ])
});

/// Owner code → publisher name
pub static PUBLISHERS: Table = Lazy::new(|| {
    HashMap::from([
        ("1", "Kustannus Pohjoistuuli Oy"),
        ("2", "Revontuli Kirjat"),
        ("3", "Kaamos Audio"),
        ("5", "Lumikki Lastenkirjat"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mapped_role_has_a_priority() {
        for onix in CONTRIBUTOR_ROLES.values() {
            assert!(ROLE_PRIORITIES.contains_key(onix), "no priority for {}", onix);
        }
    }

    #[test]
    fn test_author_has_highest_priority() {
        let max = ROLE_PRIORITIES.values().max().copied();
        assert_eq!(max, ROLE_PRIORITIES.get("A01").copied());
    }

    #[test]
    fn test_marketing_material_has_no_subjects() {
        assert!(!BISAC.contains_key("38"));
        assert!(!BIC.contains_key("38"));
        assert!(!THEMA_SUBJECT.contains_key("38"));
    }
}
