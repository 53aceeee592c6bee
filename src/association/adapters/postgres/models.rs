//! Diesel row models for association persistence.

use crate::association::domain::{
    Association, AssociationId, Cnpj, PersistedAssociationData,
};
use crate::association::ports::{AssociationRepositoryError, AssociationRepositoryResult};
use crate::store::schema::associations;
use diesel::prelude::*;

/// Query result row for association records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = associations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssociationRow {
    /// Association identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// CNPJ registration.
    pub cnpj: String,
    /// Active flag.
    pub status: bool,
}

/// Insert and update model for association records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = associations)]
pub(crate) struct NewAssociationRow {
    /// Association identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// CNPJ registration.
    pub cnpj: String,
    /// Active flag.
    pub status: bool,
}

/// Converts an aggregate into its row representation.
pub(crate) fn to_row(association: &Association) -> NewAssociationRow {
    NewAssociationRow {
        id: association.id().into_inner(),
        name: association.name().to_owned(),
        cnpj: association.cnpj().as_str().to_owned(),
        status: association.status(),
    }
}

/// Reconstructs the aggregate from a stored row.
pub(crate) fn row_to_association(
    row: AssociationRow,
) -> AssociationRepositoryResult<Association> {
    let cnpj = Cnpj::new(row.cnpj).map_err(AssociationRepositoryError::persistence)?;
    Ok(Association::from_persisted(PersistedAssociationData {
        id: AssociationId::from_uuid(row.id),
        name: row.name,
        cnpj,
        status: row.status,
    }))
}
