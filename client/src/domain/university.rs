//! Universities users belong to.

use std::fmt;

/// Backend identifier of a university.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniversityId(u64);

impl UniversityId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UniversityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entry of the fixed reference list served by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct University {
    pub id: UniversityId,
    pub name: String,
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub alpha_two_code: Option<String>,
}
