//! Account identifier type with `agr_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An Agora account identifier, always prefixed with `agr_`.
///
/// The governance core treats accounts as opaque names; how they map to keys
/// or contract addresses is a concern of the hosting ledger runtime.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

/// The supplied string is not a well-formed account identifier.
#[derive(Debug, Error)]
#[error("invalid account id {0:?}: must start with `agr_` and be non-empty after the prefix")]
pub struct InvalidAccountId(pub String);

impl AccountId {
    /// The standard prefix for all Agora account identifiers.
    pub const PREFIX: &'static str = "agr_";

    /// Create a new account id from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `agr_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "account id must start with agr_");
        Self(s)
    }

    /// Fallible constructor for identifiers coming from untrusted input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidAccountId> {
        let s = raw.into();
        if s.starts_with(Self::PREFIX) && s.len() > Self::PREFIX.len() {
            Ok(Self(s))
        } else {
            Err(InvalidAccountId(s))
        }
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefixed_ids() {
        let id = AccountId::parse("agr_alice").unwrap();
        assert_eq!(id.as_str(), "agr_alice");
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!(AccountId::parse("alice").is_err());
        assert!(AccountId::parse("agr_").is_err());
    }

    #[test]
    #[should_panic]
    fn new_panics_on_bad_prefix() {
        let _ = AccountId::new("bob");
    }
}
