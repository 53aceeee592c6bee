//! Error types for association domain validation.

use thiserror::Error;

/// Errors returned while constructing association domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssociationDomainError {
    /// The association name is empty after trimming.
    #[error("association name must not be empty")]
    EmptyName,

    /// The CNPJ does not match either accepted form.
    #[error("invalid CNPJ '{0}', expected 14 digits or 00.000.000/0000-00")]
    InvalidCnpj(String),
}
