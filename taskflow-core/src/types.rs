//! Domain types for the taskflow registry.
//!
//! Every entity carries a typed id plus creation/update timestamps. Tasks refer
//! to their assignee by [`UserId`] only; user data is never copied into a task.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_present, RegistryError, RegistryResult};

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

macro_rules! impl_id_newtype {
    ($t:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(pub u64);

        impl $t {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<u64> for $t {
            fn from(v: u64) -> Self {
                Self(v)
            }
        }

        impl From<$t> for u64 {
            fn from(id: $t) -> Self {
                id.0
            }
        }
    };
}

impl_id_newtype!(ProjectId, "Identifier of a project.");
impl_id_newtype!(TaskId, "Identifier of a task.");
impl_id_newtype!(UserId, "Identifier of a user.");

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Identity plus timestamps, shared by every domain object.
pub trait Entity {
    type Id: Copy + Eq + fmt::Debug + fmt::Display;

    fn id(&self) -> Self::Id;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

/// Creation/update pair. `created_at` never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`; it never moves behind `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

macro_rules! impl_entity {
    ($t:ty, $id:ty) => {
        impl Entity for $t {
            type Id = $id;

            fn id(&self) -> $id {
                self.id
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.stamps.created_at
            }

            fn updated_at(&self) -> DateTime<Utc> {
                self.stamps.updated_at
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Status of a task. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 2] = [TaskStatus::InProgress, TaskStatus::Done];

    /// Whether a task in `self` may be moved to `next`.
    pub fn can_become(self, next: TaskStatus) -> bool {
        !(self == TaskStatus::Done && next == TaskStatus::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::InProgress => write!(f, "In progress"),
            TaskStatus::Done => write!(f, "Done"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in progress" | "in-progress" | "in_progress" | "inprogress" => {
                Ok(TaskStatus::InProgress)
            }
            "done" => Ok(TaskStatus::Done),
            other => Err(RegistryError::validation(
                "status",
                format!("unknown status '{other}'; expected: in progress, done"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A named, addressable person. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    #[serde(flatten)]
    stamps: Timestamps,
}

impl User {
    /// Fails with [`RegistryError::Validation`] when `name` or `email` is blank.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> RegistryResult<Self> {
        let name = name.into();
        let email = email.into();
        require_present("name", &name)?;
        require_present("email", &email)?;
        Ok(Self {
            id,
            name,
            email,
            stamps: Timestamps::now(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl_entity!(User, UserId);

/// A unit of work owned by exactly one [`Project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<UserId>,
    #[serde(flatten)]
    stamps: Timestamps,
}

impl Task {
    /// New tasks start `InProgress`. A blank deadline is stored as `None`.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        assignee: Option<UserId>,
        deadline: Option<String>,
    ) -> RegistryResult<Self> {
        let title = title.into();
        require_present("title", &title)?;
        Ok(Self {
            id,
            title,
            description: description.into(),
            status: TaskStatus::InProgress,
            deadline: deadline.filter(|d| !d.trim().is_empty()),
            assignee,
            stamps: Timestamps::now(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn deadline(&self) -> Option<&str> {
        self.deadline.as_deref()
    }

    pub fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> RegistryResult<()> {
        let value = value.into();
        require_present("title", &value)?;
        self.title = value;
        self.stamps.touch();
        Ok(())
    }

    /// `Done -> InProgress` is rejected; every other move (including
    /// `Done -> Done`) succeeds and refreshes `updated_at`.
    pub fn set_status(&mut self, status: TaskStatus) -> RegistryResult<()> {
        if !self.status.can_become(status) {
            return Err(RegistryError::validation(
                "status",
                format!("task {} is {} and cannot become {status}", self.id, self.status),
            ));
        }
        self.status = status;
        self.stamps.touch();
        Ok(())
    }

    pub fn set_assignee(&mut self, user: UserId) {
        self.assignee = Some(user);
        self.stamps.touch();
    }

    /// One-line summary: `"{id}: ({status}) | {assignee} | {title}: {description}"`.
    ///
    /// `assignee` is the live lookup of [`Task::assignee`]; pass `None` when the
    /// task has no assignee or the id no longer resolves.
    pub fn describe(&self, assignee: Option<&User>) -> String {
        let who = match (self.assignee, assignee) {
            (_, Some(user)) => user.name().to_owned(),
            (None, None) => "unassigned".to_owned(),
            (Some(id), None) => format!("unknown user #{id}"),
        };
        let mut line = format!(
            "{}: ({}) | {} | {}: {}",
            self.id, self.status, who, self.title, self.description
        );
        if let Some(deadline) = &self.deadline {
            line.push_str(&format!(" [due: {deadline}]"));
        }
        line
    }
}

impl_entity!(Task, TaskId);

/// A named container owning an ordered, append-only list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    tasks: Vec<Task>,
    /// Reserved for project membership; nothing populates it yet.
    members: BTreeSet<UserId>,
    #[serde(flatten)]
    stamps: Timestamps,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
            members: BTreeSet::new(),
            stamps: Timestamps::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn members(&self) -> &BTreeSet<UserId> {
        &self.members
    }

    /// Takes ownership of `task` and places it last.
    pub fn append_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.stamps.touch();
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// One [`Task::describe`] line per task, in insertion order. Assignees are
    /// resolved against `users`.
    pub fn list_tasks_description(&self, users: &[User]) -> Vec<String> {
        self.tasks
            .iter()
            .map(|task| {
                let assignee = task
                    .assignee
                    .and_then(|id| users.iter().find(|u| u.id == id));
                task.describe(assignee)
            })
            .collect()
    }
}

impl_entity!(Project, ProjectId);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User::new(UserId(1), "Ana", "ana@x.com").expect("user")
    }

    /// Sleeps long enough for `Utc::now()` to move past the previous reading.
    fn tick() {
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    fn task(id: u64, title: &str, assignee: Option<UserId>) -> Task {
        Task::new(TaskId(id), title, "desc", assignee, None).expect("task")
    }

    #[test]
    fn id_display_and_conversion() {
        assert_eq!(TaskId::from(7).to_string(), "7");
        assert_eq!(u64::from(UserId(3)), 3);
        assert_eq!(ProjectId(2).get(), 2);
    }

    #[test]
    fn user_requires_name_and_email() {
        let err = User::new(UserId(1), "", "a@b.c").unwrap_err();
        assert_eq!(err, RegistryError::validation("name", "must not be empty"));
        let err = User::new(UserId(1), "Ana", "  ").unwrap_err();
        assert!(matches!(err, RegistryError::Validation { field: "email", .. }));
    }

    #[test]
    fn new_task_is_in_progress_and_blank_deadline_is_none() {
        let t = Task::new(TaskId(1), "Write", "d", None, Some("  ".into())).expect("task");
        assert_eq!(t.status(), TaskStatus::InProgress);
        assert_eq!(t.deadline(), None);
        assert_eq!(t.created_at(), t.updated_at());
    }

    #[test]
    fn task_title_must_be_present() {
        assert!(Task::new(TaskId(1), "", "d", None, None).is_err());
        let mut t = task(1, "ok", None);
        assert!(t.set_title(" ").is_err());
        assert_eq!(t.title(), "ok");
        t.set_title("renamed").expect("set title");
        assert_eq!(t.title(), "renamed");
    }

    #[test]
    fn done_is_terminal() {
        let mut t = task(1, "t", None);
        t.set_status(TaskStatus::Done).expect("complete");
        t.set_status(TaskStatus::Done).expect("complete again");
        let err = t.set_status(TaskStatus::InProgress).unwrap_err();
        assert!(matches!(err, RegistryError::Validation { field: "status", .. }));
        assert_eq!(t.status(), TaskStatus::Done);
    }

    #[test]
    fn setters_refresh_updated_at_only() {
        let mut t = task(1, "t", None);
        let created = t.created_at();
        tick();
        t.set_assignee(UserId(4));
        assert_eq!(t.assignee(), Some(UserId(4)));
        assert_eq!(t.created_at(), created);
        assert!(t.updated_at() > created);
    }

    #[test]
    fn set_title_refreshes_updated_at() {
        let mut t = task(1, "t", None);
        tick();
        t.set_title("renamed").expect("set title");
        assert!(t.updated_at() > t.created_at());
    }

    #[test]
    fn rejected_title_leaves_updated_at() {
        let mut t = task(1, "t", None);
        tick();
        assert!(t.set_title("").is_err());
        assert_eq!(t.updated_at(), t.created_at());
    }

    #[test]
    fn repeated_done_refreshes_updated_at_each_time() {
        let mut t = task(1, "t", None);
        tick();
        t.set_status(TaskStatus::Done).expect("complete");
        let first = t.updated_at();
        assert!(first > t.created_at());
        tick();
        t.set_status(TaskStatus::Done).expect("complete again");
        assert!(t.updated_at() > first);
    }

    #[test]
    fn append_task_refreshes_project_updated_at() {
        let mut p = Project::new(ProjectId(1), "Launch");
        let created = p.created_at();
        tick();
        p.append_task(task(1, "t", None));
        assert_eq!(p.created_at(), created);
        assert!(p.updated_at() > created);
    }

    #[test]
    fn entities_serialize_with_flattened_timestamps() {
        let json = serde_json::to_value(ana()).expect("serialize");
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["id"], 1);
        assert!(json.get("created_at").is_some());
        assert!(json.get("updated_at").is_some());
    }

    #[test]
    fn describe_with_assignee() {
        let t = task(3, "Write spec", Some(UserId(1)));
        assert_eq!(
            t.describe(Some(&ana())),
            "3: (In progress) | Ana | Write spec: desc"
        );
    }

    #[test]
    fn describe_without_assignee_uses_placeholder() {
        let t = task(3, "Write spec", None);
        assert_eq!(t.describe(None), "3: (In progress) | unassigned | Write spec: desc");
        let dangling = task(4, "Other", Some(UserId(9)));
        assert!(dangling.describe(None).contains("unknown user #9"));
    }

    #[test]
    fn describe_includes_deadline() {
        let t = Task::new(TaskId(1), "t", "d", None, Some("friday".into())).expect("task");
        assert!(t.describe(None).ends_with("[due: friday]"));
    }

    #[test]
    fn project_keeps_insertion_order() {
        let mut p = Project::new(ProjectId(1), "Launch");
        p.append_task(task(2, "second-created-first", Some(UserId(1))));
        p.append_task(task(1, "first-created-second", None));
        let lines = p.list_tasks_description(&[ana()]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2: "));
        assert!(lines[0].contains("| Ana |"));
        assert!(lines[1].starts_with("1: "));
        assert!(p.members().is_empty());
    }

    #[test]
    fn project_task_lookup() {
        let mut p = Project::new(ProjectId(1), "Launch");
        p.append_task(task(5, "t", None));
        assert!(p.task(TaskId(5)).is_some());
        assert!(p.task(TaskId(6)).is_none());
        p.task_mut(TaskId(5))
            .expect("task")
            .set_status(TaskStatus::Done)
            .expect("done");
        assert_eq!(p.tasks()[0].status(), TaskStatus::Done);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn status_display() {
        assert_eq!(TaskStatus::InProgress.to_string(), "In progress");
        assert_eq!(TaskStatus::Done.to_string(), "Done");
    }
}
