//! Shared in-memory database backing the memory adapters.
//!
//! One lock guards all three entity maps so that a lifecycle operation —
//! including cross-entity work such as cascade deletion and referential
//! integrity checks — executes as a single atomic unit, mirroring the
//! single-transaction guarantee of the relational store.

use crate::association::domain::{Association, AssociationId};
use crate::task::domain::{Task, TaskId};
use crate::user::domain::{User, UserId};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory database shared by the memory adapters.
///
/// Cloning is cheap and every clone observes the same state, so one
/// instance can back an association, user, and task repository at once.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDb {
    state: Arc<RwLock<DbState>>,
}

/// Entity tables. The task team relation lives inside each task
/// aggregate, playing the part of the join table.
#[derive(Debug, Default)]
pub(crate) struct DbState {
    pub(crate) associations: HashMap<AssociationId, Association>,
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) tasks: HashMap<TaskId, Task>,
}

impl InMemoryDb {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the shared read lock.
    pub(crate) fn read(&self) -> io::Result<RwLockReadGuard<'_, DbState>> {
        self.state
            .read()
            .map_err(|err| io::Error::other(err.to_string()))
    }

    /// Acquires the exclusive write lock.
    pub(crate) fn write(&self) -> io::Result<RwLockWriteGuard<'_, DbState>> {
        self.state
            .write()
            .map_err(|err| io::Error::other(err.to_string()))
    }
}
