use std::{fmt, str::FromStr};

use uuid::Uuid;

/// Ownership token stored in the cache while a lock is held.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LockToken(String);

impl LockToken {
    /// Generates a new random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LockToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LockToken {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl FromStr for LockToken {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl PartialEq<str> for LockToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
