//! Association aggregate root.

use super::{AssociationDomainError, AssociationId, Cnpj};
use serde::{Deserialize, Serialize};

/// Association aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    id: AssociationId,
    name: String,
    cnpj: Cnpj,
    status: bool,
}

/// Parameter object for reconstructing a persisted association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssociationData {
    /// Persisted association identifier.
    pub id: AssociationId,
    /// Persisted display name.
    pub name: String,
    /// Persisted CNPJ registration.
    pub cnpj: Cnpj,
    /// Persisted active flag.
    pub status: bool,
}

impl Association {
    /// Creates a new association with a generated identifier.
    ///
    /// `status` defaults to active when the caller supplies none.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationDomainError::EmptyName`] when the name is
    /// empty after trimming.
    pub fn new(
        name: impl Into<String>,
        cnpj: Cnpj,
        status: Option<bool>,
    ) -> Result<Self, AssociationDomainError> {
        Ok(Self {
            id: AssociationId::new(),
            name: validated_name(name)?,
            cnpj,
            status: status.unwrap_or(true),
        })
    }

    /// Reconstructs an association from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAssociationData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            cnpj: data.cnpj,
            status: data.status,
        }
    }

    /// Returns the association identifier.
    #[must_use]
    pub const fn id(&self) -> AssociationId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the CNPJ registration.
    #[must_use]
    pub const fn cnpj(&self) -> &Cnpj {
        &self.cnpj
    }

    /// Returns the active flag.
    #[must_use]
    pub const fn status(&self) -> bool {
        self.status
    }

    /// Replaces the display name.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationDomainError::EmptyName`] when the new name is
    /// empty after trimming.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), AssociationDomainError> {
        self.name = validated_name(name)?;
        Ok(())
    }

    /// Replaces the CNPJ registration.
    pub fn set_cnpj(&mut self, cnpj: Cnpj) {
        self.cnpj = cnpj;
    }

    /// Replaces the active flag.
    pub const fn set_status(&mut self, status: bool) {
        self.status = status;
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, AssociationDomainError> {
    let value = name.into();
    if value.trim().is_empty() {
        return Err(AssociationDomainError::EmptyName);
    }
    Ok(value)
}
