//! Onix Mapper
//!
//! Normalizes book product records from two alternative catalog backends
//! into ONIX-shaped metadata: identifiers, titles, contributors, subjects,
//! prices, audiences, extents and supporting resources.

pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
