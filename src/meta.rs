//! Catalogue and liveness data served by the platform's public metadata
//! endpoints.

use crate::task::domain::{TaskKind, TaskPriority, TaskStatus};
use crate::user::domain::UserRole;
use serde::Serialize;

/// The closed value sets clients may use in task and user payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumCatalogue {
    task_statuses: &'static [TaskStatus],
    task_priorities: &'static [TaskPriority],
    task_kinds: &'static [TaskKind],
    user_roles: &'static [UserRole],
}

impl EnumCatalogue {
    /// Returns the current catalogue.
    #[must_use]
    pub const fn current() -> Self {
        Self {
            task_statuses: &TaskStatus::ALL,
            task_priorities: &TaskPriority::ALL,
            task_kinds: &TaskKind::ALL,
            user_roles: &UserRole::ALL,
        }
    }

    /// Returns the task status values.
    #[must_use]
    pub const fn task_statuses(self) -> &'static [TaskStatus] {
        self.task_statuses
    }

    /// Returns the task priority values.
    #[must_use]
    pub const fn task_priorities(self) -> &'static [TaskPriority] {
        self.task_priorities
    }

    /// Returns the task kind values.
    #[must_use]
    pub const fn task_kinds(self) -> &'static [TaskKind] {
        self.task_kinds
    }

    /// Returns the user role values.
    #[must_use]
    pub const fn user_roles(self) -> &'static [UserRole] {
        self.user_roles
    }
}

impl Default for EnumCatalogue {
    fn default() -> Self {
        Self::current()
    }
}

/// Trivial liveness report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    status: &'static str,
}

impl ServiceStatus {
    /// Reports the service as up.
    #[must_use]
    pub const fn ok() -> Self {
        Self { status: "ok" }
    }

    /// Returns the status text.
    #[must_use]
    pub const fn status(self) -> &'static str {
        self.status
    }
}
