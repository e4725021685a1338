//! Session signals broadcast by the HTTP client.

/// Cross-cutting session signal observed by the session controller (and
/// any embedding UI, which treats `Expired` as "redirect to sign-in").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// No expiry has been observed.
    Active,
    /// The backend rejected the credential; the session is over.
    Expired,
}
