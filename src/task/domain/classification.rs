//! Task classification enumerations.
//!
//! Status is an open enumeration with no transition restrictions: any
//! value may be set to any other value. Priority and kind are independent
//! classification axes; a task always has a priority and may have a kind.

use super::{ParseTaskKindError, ParseTaskPriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Work has not started. The default for new tasks.
    #[default]
    Open,
    /// Work is under way.
    InProgress,
    /// Work is complete.
    Finished,
    /// Work was abandoned.
    Canceled,
}

impl TaskStatus {
    /// Every status, in catalogue order.
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Finished, Self::Canceled];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "inProgress",
            Self::Finished => "finished",
            Self::Canceled => "canceled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "open" => Ok(Self::Open),
            "inProgress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            "canceled" => Ok(Self::Canceled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Ordinary urgency. The default for new tasks.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// Every priority, in catalogue order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Task kind axis, independent of priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    /// Gathering of members.
    Meeting,
    /// Public or community event.
    Event,
    /// Upkeep of shared spaces and assets.
    Maintenance,
    /// Paperwork and governance.
    Administrative,
}

impl TaskKind {
    /// Every kind, in catalogue order.
    pub const ALL: [Self; 4] = [
        Self::Meeting,
        Self::Event,
        Self::Maintenance,
        Self::Administrative,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Event => "event",
            Self::Maintenance => "maintenance",
            Self::Administrative => "administrative",
        }
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = ParseTaskKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "meeting" => Ok(Self::Meeting),
            "event" => Ok(Self::Event),
            "maintenance" => Ok(Self::Maintenance),
            "administrative" => Ok(Self::Administrative),
            _ => Err(ParseTaskKindError(value.to_owned())),
        }
    }
}
