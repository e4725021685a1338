//! # shopfront-api
//!
//! The authenticated HTTP client for the Shopfront backend. Every
//! outbound request carries the stored credential, and any
//! authorization-failure response triggers the single session-expiry
//! policy: clear the credential, broadcast [`signal::SessionSignal::Expired`],
//! and re-raise the error to the caller.

pub mod client;
pub mod signal;

pub use client::HttpBackend;
pub use signal::SessionSignal;
