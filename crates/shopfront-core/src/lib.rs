//! # shopfront-core
//!
//! Core crate for the Shopfront client. Contains configuration schemas,
//! typed identifiers, domain events, provider traits, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Shopfront crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
