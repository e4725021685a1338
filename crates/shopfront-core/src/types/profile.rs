//! The cached user profile returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::StoreId;

/// User profile attached to a validated credential.
///
/// The profile is cached on-device alongside the token and refreshed on
/// every successful credential validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Store identifier (also the realtime room the client joins).
    pub id: StoreId,
    /// Display name of the store owner.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Subscription plan name (e.g. `"free"`, `"pro"`).
    pub plan: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}
