//! Display name value object for places and regions

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A trimmed, non-empty name of at most 200 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName {
    #[validate(length(min = 1, max = 200))]
    value: String,
}

impl DisplayName {
    /// Create a display name, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the trimmed name is empty
    /// or longer than 200 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let candidate = Self {
            value: name.into().trim().to_string(),
        };
        candidate
            .validate()
            .map_err(|e| DomainError::ValidationError(format!("name: {e}")))?;
        Ok(candidate)
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = DisplayName::new("  Fushimi Inari  ").unwrap();
        assert_eq!(name.as_str(), "Fushimi Inari");
    }

    #[test]
    fn rejects_blank() {
        assert!(matches!(
            DisplayName::new("   "),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_overlong() {
        assert!(DisplayName::new("a".repeat(201)).is_err());
        assert!(DisplayName::new("a".repeat(200)).is_ok());
    }
}
