//! Taskflow core library — ids, entities, errors, and the in-memory registry.
//!
//! Public API surface:
//! - [`identity`] — id allocation and [`IdPolicy`]
//! - [`types`] — ids, [`User`], [`Task`], [`Project`]
//! - [`error`] — [`RegistryError`]
//! - [`registry`] — [`Registry`] operations
//!
//! The crate performs no I/O; callers render results themselves.

pub mod error;
pub mod identity;
pub mod registry;
pub mod types;

pub use error::{EntityKind, RegistryError, RegistryResult};
pub use identity::{IdAllocator, IdPolicy};
pub use registry::{NewTask, Registry};
pub use types::{Entity, Project, ProjectId, Task, TaskId, TaskStatus, Timestamps, User, UserId};
