//! Task aggregate root and related lifecycle types.

use super::{ParseTaskStatusError, Patch, TaskId};
use crate::team::domain::{MemberId, TeamId, TeamMember};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task status.
///
/// The status machine is flat: any status may be set to any other, and the
/// completion shortcut forces [`TaskStatus::Completed`] regardless of the
/// prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Work has not started. Initial status for every task.
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Completed,
    /// Work is blocked on something external.
    Blocked,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Blocked => "BLOCKED",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "BLOCKED" => Ok(Self::Blocked),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// `assignee_id` and `team_id` are weak references: consumers re-resolve
/// them and tolerate dangling values except where an operation demands a
/// hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: TaskStatus,
    assignee_id: Option<MemberId>,
    team_id: Option<TeamId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field bundle for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Initial status.
    pub status: TaskStatus,
    /// Optional assignee reference.
    pub assignee_id: Option<MemberId>,
    /// Optional team reference.
    pub team_id: Option<TeamId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignee reference, if any.
    pub assignee_id: Option<MemberId>,
    /// Persisted team reference, if any.
    pub team_id: Option<TeamId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update over a task's own fields.
///
/// Relation changes (assignee, team) are handled separately by the lifecycle
/// service because they interact with the consistency invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title, when mentioned.
    pub title: Option<String>,
    /// Description patch.
    pub description: Patch<String>,
    /// Due date patch.
    pub due_date: Patch<DateTime<Utc>>,
    /// New status, when mentioned.
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Creates a new task with a fresh identifier and current timestamps.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            assignee_id: data.assignee_id,
            team_id: data.team_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            assignee_id: data.assignee_id,
            team_id: data.team_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<MemberId> {
        self.assignee_id
    }

    /// Returns the team reference, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the mentioned field changes and refreshes the timestamp.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &impl Clock) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        changes.description.apply(&mut self.description);
        changes.due_date.apply(&mut self.due_date);
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.touch(clock);
    }

    /// Assigns the task to a member, inheriting the member's team.
    ///
    /// The member's own team always replaces any previously set team, which
    /// is what keeps the invariant trivially true on this path.
    pub fn assign_to(&mut self, member: &TeamMember, clock: &impl Clock) {
        self.assignee_id = Some(member.id());
        self.team_id = Some(member.team_id());
        self.touch(clock);
    }

    /// Sets or clears the team reference.
    pub fn set_team(&mut self, team_id: Option<TeamId>, clock: &impl Clock) {
        self.team_id = team_id;
        self.touch(clock);
    }

    /// Forces the status to [`TaskStatus::Completed`], leaving relations
    /// untouched.
    pub fn complete(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Completed;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
