//! Validated CNPJ tax-registration value.

use super::AssociationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CNPJ registration in either bare (14 digits) or punctuated
/// (`00.000.000/0000-00`) form.
///
/// Only the format is validated; the registry check digits are not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cnpj(String);

impl Cnpj {
    /// Creates a validated CNPJ.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationDomainError::InvalidCnpj`] when the value is
    /// neither 14 digits nor the punctuated `00.000.000/0000-00` form.
    pub fn new(value: impl Into<String>) -> Result<Self, AssociationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if is_bare_form(trimmed) || is_punctuated_form(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(AssociationDomainError::InvalidCnpj(raw))
        }
    }

    /// Returns the CNPJ as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the stored value contains the given fragment.
    ///
    /// Used by the containment filter on association lists.
    #[must_use]
    pub fn contains(&self, fragment: &str) -> bool {
        self.0.contains(fragment)
    }
}

impl AsRef<str> for Cnpj {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_bare_form(value: &str) -> bool {
    value.len() == 14 && value.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_punctuated_form(value: &str) -> bool {
    if value.len() != 18 {
        return false;
    }
    value.char_indices().all(|(position, ch)| match position {
        2 | 6 => ch == '.',
        10 => ch == '/',
        15 => ch == '-',
        _ => ch.is_ascii_digit(),
    })
}
