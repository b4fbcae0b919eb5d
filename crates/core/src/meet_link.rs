//! Validated Google Meet link value object.
//!
//! A `MeetLink` is compared by value and immutable once constructed. The
//! submission path only ever sees links that already passed validation, so
//! downstream components can treat the inner string as opaque.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A validated Google Meet URL.
///
/// Accepted shape: `http://` or `https://` followed by
/// `meet.google.com/<code>`, where `<code>` is a non-empty run of lowercase
/// letters, digits and dashes (the canonical form is `abc-defg-hij`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MeetLink(String);

const HOST_PREFIX: &str = "meet.google.com/";

impl MeetLink {
    /// Validate and wrap a raw link.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();

        let rest = raw
            .strip_prefix("https://")
            .or_else(|| raw.strip_prefix("http://"))
            .ok_or_else(|| DomainError::validation("invalid Google Meet URL"))?;

        let code = rest
            .strip_prefix(HOST_PREFIX)
            .ok_or_else(|| DomainError::validation("invalid Google Meet URL"))?;

        let valid_code = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid_code {
            return Err(DomainError::validation("invalid Google Meet URL"));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The meeting code portion of the link (everything after the host).
    pub fn code(&self) -> &str {
        // Validated in `parse`; the prefix is always present.
        let idx = self.0.find(HOST_PREFIX).unwrap_or(0) + HOST_PREFIX.len();
        &self.0[idx..]
    }
}

impl fmt::Display for MeetLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MeetLink {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MeetLink {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<MeetLink> for String {
    fn from(value: MeetLink) -> Self {
        value.0
    }
}
