//! Which flow the user belongs in.

use super::user::User;

/// Top-level flow selected from the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Nobody is signed in.
    Authentication,
    /// Signed in but the phone number is not verified yet.
    Verification,
    Marketplace,
}

impl Destination {
    /// The verification flag, not token presence, gates the marketplace.
    pub fn for_user(user: Option<&User>) -> Self {
        match user {
            None => Self::Authentication,
            Some(user) if !user.is_verified => Self::Verification,
            Some(_) => Self::Marketplace,
        }
    }
}
