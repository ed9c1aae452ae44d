//! Customer name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CustomerName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerNameError {
    /// The input is empty or only whitespace.
    #[error("customer name cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("customer name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length in characters.
        max: usize,
    },
}

/// The name of a customer lead.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Must not be empty after trimming
/// - At most 100 characters (not bytes, so CJK names are not penalised)
///
/// ## Examples
///
/// ```
/// use monster_wash_core::CustomerName;
///
/// assert_eq!(CustomerName::parse("  张三 ").unwrap().as_str(), "张三");
/// assert!(CustomerName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerName(String);

impl CustomerName {
    /// Maximum length of a customer name, in characters.
    pub const MAX_LENGTH: usize = 100;

    /// Parse a `CustomerName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, CustomerNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CustomerNameError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(CustomerNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CustomerName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CustomerName {
    type Err = CustomerNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CustomerName {
    type Error = CustomerNameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CustomerName> for String {
    fn from(name: CustomerName) -> Self {
        name.0
    }
}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let name = CustomerName::parse("  Li Si\t").unwrap();
        assert_eq!(name.as_str(), "Li Si");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(CustomerName::parse(""), Err(CustomerNameError::Empty));
        assert_eq!(CustomerName::parse(" \n "), Err(CustomerNameError::Empty));
    }

    #[test]
    fn test_parse_too_long_counts_chars() {
        let at_limit = "洗".repeat(CustomerName::MAX_LENGTH);
        assert!(CustomerName::parse(&at_limit).is_ok());

        let over = "洗".repeat(CustomerName::MAX_LENGTH + 1);
        assert!(matches!(
            CustomerName::parse(&over),
            Err(CustomerNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<CustomerName>("\"  \"").is_err());
        let name: CustomerName = serde_json::from_str("\"王五\"").unwrap();
        assert_eq!(name.to_string(), "王五");
    }
}
