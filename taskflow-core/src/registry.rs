//! In-memory registry of projects and users.
//!
//! # Ownership
//!
//! ```text
//! Registry
//!   projects: [Project]      (append-only, creation order)
//!     tasks: [Task]          (append-only, insertion order)
//!       assignee: UserId ──┐ (non-owning, resolved on read)
//!   users: [User]      <───┘
//! ```
//!
//! Task listings always walk projects in creation order, then tasks in
//! insertion order. Lookups that name one entity fail with
//! [`RegistryError::NotFound`]; filters return an empty list instead.

use tracing::debug;

use crate::error::{require_present, EntityKind, RegistryError, RegistryResult};
use crate::identity::{IdPolicy, IdSource};
use crate::types::{Entity, Project, ProjectId, Task, TaskId, TaskStatus, User, UserId};

/// Input for [`Registry::create_task_in_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assignee: UserId,
    pub deadline: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>, assignee: UserId) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            assignee,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Top-level application state for one process run.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    projects: Vec<Project>,
    users: Vec<User>,
    ids: IdSource,
}

impl Registry {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            projects: Vec::new(),
            users: Vec::new(),
            ids: IdSource::new(policy),
        }
    }

    pub fn policy(&self) -> IdPolicy {
        self.ids.policy()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Always succeeds; project names need not be unique.
    pub fn create_project(&mut self, name: impl Into<String>) -> &Project {
        let id = ProjectId(self.ids.next(EntityKind::Project));
        let project = Project::new(id, name);
        debug!(project_id = %id, name = project.name(), "project created");
        self.projects.push(project);
        &self.projects[self.projects.len() - 1]
    }

    /// Fails with `Validation` if `name` or `email` is blank. No id is consumed
    /// on failure.
    pub fn create_user(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> RegistryResult<&User> {
        let (name, email) = (name.into(), email.into());
        require_present("name", &name)?;
        require_present("email", &email)?;
        let id = UserId(self.ids.next(EntityKind::User));
        let user = User::new(id, name, email)?;
        debug!(user_id = %id, name = user.name(), "user created");
        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }

    /// Resolves the project and assignee first; nothing is allocated or
    /// appended unless both exist and the title is present.
    pub fn create_task_in_project(
        &mut self,
        project_id: ProjectId,
        new: NewTask,
    ) -> RegistryResult<&Task> {
        let index = self.project_index(project_id)?;
        self.find_user_by_id(new.assignee)?;
        require_present("title", &new.title)?;

        let id = TaskId(self.ids.next(EntityKind::Task));
        let task = Task::new(id, new.title, new.description, Some(new.assignee), new.deadline)?;
        debug!(task_id = %id, project_id = %project_id, assignee = %new.assignee, "task created");

        let project = &mut self.projects[index];
        project.append_task(task);
        Ok(&project.tasks()[project.tasks().len() - 1])
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn find_project_by_id(&self, id: ProjectId) -> RegistryResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Project, id))
    }

    pub fn find_user_by_id(&self, id: UserId) -> RegistryResult<&User> {
        self.users
            .iter()
            .find(|u| u.id() == id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::User, id))
    }

    pub fn find_task_by_id(&self, id: TaskId) -> RegistryResult<&Task> {
        self.projects
            .iter()
            .find_map(|p| p.task(id))
            .ok_or_else(|| RegistryError::not_found(EntityKind::Task, id))
    }

    /// Every task, in project creation order then task insertion order.
    pub fn list_all_tasks(&self) -> Vec<&Task> {
        self.tasks().collect()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Both ids are resolved before anything changes, so a `NotFound` leaves
    /// every task untouched.
    pub fn assign_task(&mut self, task_id: TaskId, user_id: UserId) -> RegistryResult<&Task> {
        self.find_task_by_id(task_id)?;
        self.find_user_by_id(user_id)?;
        let task = self.task_mut(task_id)?;
        task.set_assignee(user_id);
        debug!(task_id = %task_id, user_id = %user_id, "task assigned");
        Ok(task)
    }

    /// Idempotent: completing a `Done` task succeeds and refreshes `updated_at`.
    pub fn mark_task_complete(&mut self, task_id: TaskId) -> RegistryResult<&Task> {
        let task = self.task_mut(task_id)?;
        task.set_status(TaskStatus::Done)?;
        debug!(task_id = %task_id, "task completed");
        Ok(task)
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    /// Tasks whose assignee is `user_id`. Unknown users simply match nothing.
    pub fn filter_tasks_by_assignee(&self, user_id: UserId) -> Vec<&Task> {
        self.tasks()
            .filter(|t| t.assignee() == Some(user_id))
            .collect()
    }

    pub fn filter_tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks().filter(|t| t.status() == status).collect()
    }

    // -----------------------------------------------------------------------
    // Rendering helpers
    // -----------------------------------------------------------------------

    /// [`Task::describe`] with the assignee resolved against this registry.
    pub fn describe_task(&self, task: &Task) -> String {
        let assignee = task.assignee().and_then(|id| self.find_user_by_id(id).ok());
        task.describe(assignee)
    }

    /// [`Project::list_tasks_description`] against this registry's users.
    pub fn project_task_lines(&self, project: &Project) -> Vec<String> {
        project.list_tasks_description(&self.users)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.projects.iter().flat_map(|p| p.tasks().iter())
    }

    fn task_mut(&mut self, id: TaskId) -> RegistryResult<&mut Task> {
        self.projects
            .iter_mut()
            .find_map(|p| p.task_mut(id))
            .ok_or_else(|| RegistryError::not_found(EntityKind::Task, id))
    }

    fn project_index(&self, id: ProjectId) -> RegistryResult<usize> {
        self.projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Project, id))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
