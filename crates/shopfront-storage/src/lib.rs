//! # shopfront-storage
//!
//! Device-local persistence for the Shopfront client: storage providers
//! (file-backed and in-memory), the token store, and device identity.

pub mod identity;
pub mod providers;
pub mod token;

pub use token::TokenStore;
