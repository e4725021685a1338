//! # shopfront-session
//!
//! The session controller: owns the authentication lifecycle
//! (Loading, Authenticated, Unauthenticated), persists and validates the
//! credential through the token store and backend API, and executes the
//! explicit post-transition effect list (push-token registration,
//! realtime connect/disconnect).

pub mod controller;
pub mod effect;

pub use controller::{SessionController, SessionState};
pub use effect::Effect;
