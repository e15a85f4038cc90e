//! Node identity tokens.

use std::fmt;

use uuid::Uuid;

/// Unique token distinguishing otherwise identical nodes.
///
/// 64 lowercase hex characters taken from two v4 UUIDs, which leaves 244 random bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    pub fn generate() -> Self {
        let mut token = String::with_capacity(64);
        token.push_str(&Uuid::new_v4().simple().to_string());
        token.push_str(&Uuid::new_v4().simple().to_string());
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading `width` characters, for compact display.
    pub fn short(&self, width: usize) -> &str {
        let end = width.min(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identity {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn given_generated_identity_when_inspected_then_is_64_hex_chars() {
        let id = Identity::generate();
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn given_many_identities_when_generated_then_all_distinct() {
        let ids: HashSet<Identity> = (0..1000).map(|_| Identity::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn given_width_beyond_length_when_short_then_returns_whole_token() {
        let id = Identity::generate();
        assert_eq!(id.short(8).len(), 8);
        assert_eq!(id.short(100), id.as_str());
    }
}
