//! Mapping rules from backend vocabulary to ONIX-shaped values
//!
//! Everything here is deterministic and free of I/O except where a
//! collaborator trait is passed in explicitly.

pub mod audience;
pub mod classification;
pub mod contributors;
pub mod fields;
pub mod prices;
pub mod resources;
pub mod sanitizer;
pub mod tables;
