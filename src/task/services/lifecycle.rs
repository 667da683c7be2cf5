//! Service layer for task creation, mutation, and filtered reads.
//!
//! Every mutating operation re-validates the assignee/team invariant on the
//! fully merged record immediately before the write, so a violation never
//! reaches storage, then hydrates relations for the response view.

use crate::error::ErrorCategory;
use crate::task::{
    domain::{NewTaskData, Patch, Task, TaskChanges, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{RelationError, RelationResolver, TaskRelations},
    views::TaskView,
};
use crate::team::{
    domain::{MemberId, Team, TeamId, TeamMember},
    ports::{TeamMemberRepository, TeamRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: Option<TaskStatus>,
    assignee_id: Option<MemberId>,
    team_id: Option<TeamId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            status: None,
            assignee_id: None,
            team_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the initial status (defaults to pending).
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the assignee reference.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the team reference.
    #[must_use]
    pub const fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

/// Request payload for partially updating a task.
///
/// Omitted fields stay untouched; description, due date, and team accept an
/// explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Patch<String>,
    due_date: Patch<DateTime<Utc>>,
    status: Option<TaskStatus>,
    assignee_id: Option<MemberId>,
    team_id: Patch<TeamId>,
}

impl UpdateTaskRequest {
    /// Creates an empty request touching nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Patch::Set(description.into());
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Patch::Clear;
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Patch::Set(due_date);
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Patch::Clear;
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a new assignee; the assignee's own team replaces the task's team.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets a new team.
    #[must_use]
    pub const fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Patch::Set(team_id);
        self
    }

    /// Clears the team. With an assignee still present the team is
    /// re-inferred from the assignee's own membership.
    #[must_use]
    pub const fn clear_team(mut self) -> Self {
        self.team_id = Patch::Clear;
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The referenced task does not exist.
    #[error("task with id {0} was not found")]
    NotFound(TaskId),

    /// Relation resolution or the consistency invariant failed.
    #[error(transparent)]
    Relation(#[from] RelationError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Maps the error onto the boundary taxonomy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorCategory::NotFound
            }
            Self::Relation(relation) => relation.category(),
            Self::Repository(TaskRepositoryError::DuplicateTask(_)) => ErrorCategory::Conflict,
            Self::Repository(TaskRepositoryError::Persistence(_)) => ErrorCategory::Internal,
        }
    }
}

/// Result type for task lifecycle operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, TR, MR, C>
where
    R: TaskRepository,
    TR: TeamRepository,
    MR: TeamMemberRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    relations: RelationResolver<TR, MR>,
    clock: Arc<C>,
}

impl<R, TR, MR, C> TaskLifecycleService<R, TR, MR, C>
where
    R: TaskRepository,
    TR: TeamRepository,
    MR: TeamMemberRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        relations: RelationResolver<TR, MR>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            relations,
            clock,
        }
    }

    /// Creates a task, resolving and validating its relations first.
    ///
    /// The stored team follows the precedence: explicit team in the request,
    /// then the resolved team, then the assignee's own team.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Relation`] for dangling identifiers or a
    /// contradictory assignee/team pair (nothing is persisted), or
    /// [`TaskLifecycleError::Repository`] when the write fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<TaskView> {
        let resolved = self
            .relations
            .resolve(request.assignee_id, request.team_id)
            .await?;

        let stored_team = request
            .team_id
            .or_else(|| resolved.team.as_ref().map(Team::id))
            .or_else(|| resolved.assignee.as_ref().map(TeamMember::team_id));

        let task = Task::new(
            NewTaskData {
                title: request.title,
                description: request.description,
                due_date: request.due_date,
                status: request.status.unwrap_or(TaskStatus::Pending),
                assignee_id: resolved.assignee.as_ref().map(TeamMember::id),
                team_id: stored_team,
            },
            &*self.clock,
        );

        let relations = self.revalidate(&task, resolved).await?;
        self.tasks.insert(&task).await?;
        Ok(TaskView::from_parts(&task, &relations))
    }

    /// Applies a partial update.
    ///
    /// A resolved team overrides the task's team; a resolved assignee
    /// overrides both the assignee and the team. Clearing the team while an
    /// assignee remains re-infers the assignee's own team. An explicit
    /// assignee/team pair that disagrees is rejected before any field is
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or a relation/repository error.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskView> {
        let mut task = self.task_or_not_found(id).await?;

        let resolved = self
            .relations
            .resolve(request.assignee_id, request.team_id.set_value().copied())
            .await?;

        task.apply_changes(
            TaskChanges {
                title: request.title,
                description: request.description,
                due_date: request.due_date,
                status: request.status,
            },
            &*self.clock,
        );

        if resolved.team.is_some() || !request.team_id.is_keep() {
            let target = resolved
                .team
                .as_ref()
                .map(Team::id)
                .or_else(|| request.team_id.set_value().copied());
            task.set_team(target, &*self.clock);
        }
        if let Some(assignee) = &resolved.assignee {
            task.assign_to(assignee, &*self.clock);
        }

        // A cleared team with a surviving assignee re-infers the assignee's
        // own team; a dangling assignee reference is tolerated as absent.
        if task.team_id().is_none() {
            if let Some(assignee_id) = task.assignee_id() {
                if let Some(member) = self.relations.find_member(assignee_id).await? {
                    task.set_team(Some(member.team_id()), &*self.clock);
                }
            }
        }

        let relations = self.revalidate(&task, TaskRelations::default()).await?;
        self.tasks.update(&task).await?;
        Ok(TaskView::from_parts(&task, &relations))
    }

    /// Assigns a task to a member, inheriting the member's team.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`RelationError::MemberNotFound`] when the member does not, or a
    /// repository error.
    pub async fn assign(
        &self,
        task_id: TaskId,
        member_id: MemberId,
    ) -> TaskLifecycleResult<TaskView> {
        let mut task = self.task_or_not_found(task_id).await?;
        let member = self.relations.member_or_not_found(member_id).await?;

        task.assign_to(&member, &*self.clock);

        let relations = self
            .revalidate(
                &task,
                TaskRelations {
                    assignee: Some(member),
                    team: None,
                },
            )
            .await?;
        self.tasks.update(&task).await?;
        Ok(TaskView::from_parts(&task, &relations))
    }

    /// Forces a task to completed status, leaving relations untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or a relation/repository error.
    pub async fn complete(&self, task_id: TaskId) -> TaskLifecycleResult<TaskView> {
        let mut task = self.task_or_not_found(task_id).await?;
        task.complete(&*self.clock);

        let relations = self.revalidate(&task, TaskRelations::default()).await?;
        self.tasks.update(&task).await?;
        Ok(TaskView::from_parts(&task, &relations))
    }

    /// Returns one task with hydrated relations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or a relation/repository error.
    pub async fn find_one(&self, id: TaskId) -> TaskLifecycleResult<TaskView> {
        let task = self.task_or_not_found(id).await?;
        let relations = self
            .relations
            .load_relations(&task, TaskRelations::default())
            .await?;
        Ok(TaskView::from_parts(&task, &relations))
    }

    /// Returns all tasks in list order with hydrated relations.
    ///
    /// # Errors
    ///
    /// Returns a relation/repository error when a lookup fails.
    pub async fn find_all(&self) -> TaskLifecycleResult<Vec<TaskView>> {
        let tasks = self.tasks.list_all().await?;
        let mut views = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let relations = self
                .relations
                .load_relations(task, TaskRelations::default())
                .await?;
            views.push(TaskView::from_parts(task, &relations));
        }
        Ok(views)
    }

    /// Returns one member's tasks in list order, optionally narrowed to an
    /// exact status.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::MemberNotFound`] when the member does not
    /// exist, or a relation/repository error.
    pub async fn find_by_assignee(
        &self,
        member_id: MemberId,
        status: Option<TaskStatus>,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        let member = self.relations.member_or_not_found(member_id).await?;
        let tasks = self.tasks.list_by_assignee(member.id(), status).await?;

        let mut views = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let relations = self
                .relations
                .load_relations(
                    task,
                    TaskRelations {
                        assignee: Some(member.clone()),
                        team: None,
                    },
                )
                .await?;
            views.push(TaskView::from_parts(task, &relations));
        }
        Ok(views)
    }

    /// Re-resolves relations from the merged record and re-runs the
    /// membership-consistency check before anything is written.
    async fn revalidate(
        &self,
        task: &Task,
        existing: TaskRelations,
    ) -> TaskLifecycleResult<TaskRelations> {
        let relations = self.relations.load_relations(task, existing).await?;
        if let Some(assignee) = &relations.assignee {
            self.relations
                .ensure_membership_consistency(assignee, task.team_id(), relations.team.as_ref())
                .await?;
        }
        Ok(relations)
    }

    async fn task_or_not_found(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }
}
