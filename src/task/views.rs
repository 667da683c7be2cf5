//! Externally visible response shape for tasks.
//!
//! Pure mapping, no I/O. The due date serialises as an RFC 3339 string or an
//! explicit `null`, never a missing field; other absent optionals are
//! omitted. The nested team view carries no member list on this path — task
//! hydration never resolves one.

use crate::task::domain::{Task, TaskId, TaskStatus};
use crate::task::services::TaskRelations;
use crate::team::views::{MemberView, TeamView};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response shape for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Status.
    pub status: TaskStatus,
    /// Due date; serialised as `null` when absent.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Hydrated team, omitted when unresolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamView>,
    /// Hydrated assignee, omitted when unresolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<MemberView>,
}

impl TaskView {
    /// Maps a stored task plus its resolved relations into the response
    /// shape.
    #[must_use]
    pub fn from_parts(task: &Task, relations: &TaskRelations) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            due_date: task.due_date(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            team: relations
                .team
                .as_ref()
                .map(|team| TeamView::from_team(team, None)),
            assignee: relations.assignee.as_ref().map(MemberView::from_member),
        }
    }
}
