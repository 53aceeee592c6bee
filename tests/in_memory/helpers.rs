//! Shared fixtures and seeding helpers for the in-memory integration
//! tests.

use mutirao::association::{
    adapters::memory::InMemoryAssociationRepository,
    domain::Association,
    services::{AssociationLifecycleService, CreateAssociationRequest},
};
use mutirao::store::memory::InMemoryDb;
use mutirao::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use mutirao::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{User, UserRole},
    services::{CreateUserRequest, UserLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use uuid::Uuid;

/// All three lifecycle services wired over one shared database, the way
/// the composition root assembles them.
pub struct World {
    /// Association lifecycle service.
    pub associations: AssociationLifecycleService<InMemoryAssociationRepository>,
    /// User lifecycle service.
    pub users: UserLifecycleService<InMemoryUserRepository>,
    /// Task lifecycle service.
    pub tasks: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
}

/// Provides a fresh world for each test.
#[fixture]
pub fn world() -> World {
    let db = InMemoryDb::new();
    World {
        associations: AssociationLifecycleService::new(Arc::new(
            InMemoryAssociationRepository::new(db.clone()),
        )),
        users: UserLifecycleService::new(Arc::new(InMemoryUserRepository::new(db.clone()))),
        tasks: TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new(db)),
            Arc::new(DefaultClock),
        ),
    }
}

/// Seeds an editor user with the given e-mail.
///
/// # Errors
///
/// Returns an error when user creation fails.
pub async fn seed_user(world: &World, email: &str) -> Result<User, eyre::Report> {
    let user = world
        .users
        .create(
            Uuid::new_v4(),
            email,
            CreateUserRequest::new("Seeded User").with_role(UserRole::Editor),
        )
        .await?;
    Ok(user)
}

/// Seeds an association with the given name and CNPJ.
///
/// # Errors
///
/// Returns an error when association creation fails.
pub async fn seed_association(
    world: &World,
    name: &str,
    cnpj: &str,
) -> Result<Association, eyre::Report> {
    let association = world
        .associations
        .create(CreateAssociationRequest::new(name, cnpj))
        .await?;
    Ok(association)
}
