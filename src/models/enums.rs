//! Shared domain enums

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CodeDomain
// ---------------------------------------------------------------------------

/// Code tables held by the catalog backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeDomain {
    LibraryClass,
    MainGroup,
    SubGroup,
    VatCodes,
    Resources,
    Creditors,
    AgeGroups,
}

impl std::fmt::Display for CodeDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CodeDomain::LibraryClass => "library_class",
            CodeDomain::MainGroup => "main_group",
            CodeDomain::SubGroup => "sub_group",
            CodeDomain::VatCodes => "vat_codes",
            CodeDomain::Resources => "resources",
            CodeDomain::Creditors => "creditors",
            CodeDomain::AgeGroups => "age_groups",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// KeywordOntology
// ---------------------------------------------------------------------------

/// Controlled vocabularies reported by the bibliographic keyword search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordOntology {
    /// Fiction ontology
    Kauno,
    /// General Finnish ontology
    Yso,
    /// General Finnish thesaurus
    Ysa,
    /// Swedish general thesaurus
    Allars,
}

impl KeywordOntology {
    /// Recognise the `source` attribute of a search result
    pub fn from_source(source: &str) -> Option<Self> {
        match source.trim().to_lowercase().as_str() {
            "kauno" => Some(KeywordOntology::Kauno),
            "yso" => Some(KeywordOntology::Yso),
            "ysa" => Some(KeywordOntology::Ysa),
            "allars" => Some(KeywordOntology::Allars),
            _ => None,
        }
    }

    pub fn scheme_id(self) -> &'static str {
        match self {
            KeywordOntology::Kauno => "69",
            KeywordOntology::Yso => "71",
            KeywordOntology::Ysa => "64",
            KeywordOntology::Allars => "65",
        }
    }

    pub fn scheme_name(self) -> &'static str {
        match self {
            KeywordOntology::Kauno => "KAUNO - ontology for fiction",
            KeywordOntology::Yso => "YSO - General Finnish ontology",
            KeywordOntology::Ysa => "YSA - Yleinen suomalainen asiasanasto",
            KeywordOntology::Allars => "Allärs - Allmän tesaurus på svenska",
        }
    }

    /// Whether terms of this ontology feed the free keyword aggregate
    pub fn is_aggregated(self) -> bool {
        !matches!(self, KeywordOntology::Allars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_domain_labels_match_serde() {
        assert_eq!(CodeDomain::VatCodes.to_string(), "vat_codes");
        let domain: CodeDomain = serde_json::from_str("\"age_groups\"").unwrap();
        assert_eq!(domain, CodeDomain::AgeGroups);
        assert_eq!(
            serde_json::to_string(&CodeDomain::LibraryClass).unwrap(),
            format!("\"{}\"", CodeDomain::LibraryClass)
        );
    }

    #[test]
    fn test_keyword_ontology_sources() {
        assert_eq!(KeywordOntology::from_source("YSO"), Some(KeywordOntology::Yso));
        assert_eq!(KeywordOntology::from_source("allars"), Some(KeywordOntology::Allars));
        assert_eq!(KeywordOntology::from_source("lcsh"), None);
        assert!(!KeywordOntology::Allars.is_aggregated());
        assert!(KeywordOntology::Kauno.is_aggregated());
    }
}
