//! Data models for Onix Mapper

pub mod enums;
pub mod facts;
pub mod onix;
pub mod raw;
pub mod report;

// Re-export commonly used types
pub use enums::{CodeDomain, KeywordOntology};
pub use facts::{ContributorKind, PrintEvent, ProductFacts, RawContributor, RawSubjectRecord};
pub use raw::RawRecord;
pub use report::ProductReport;
