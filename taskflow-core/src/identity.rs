//! Identifier allocation.
//!
//! Ids start at 1 and only grow. A [`IdSource`] either hands out ids from one
//! counter shared by every entity kind, or keeps a separate counter per kind.

use crate::error::EntityKind;

/// Monotonic counter. `next()` is strictly greater than every earlier result.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// The most recently issued id, or 0 if none has been issued.
    pub fn last(&self) -> u64 {
        self.last
    }
}

/// How ids are shared between entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Users, tasks and projects each count from 1.
    #[default]
    PerKind,
    /// One counter across all kinds; ids are unique registry-wide.
    Shared,
}

/// The id source owned by a registry.
#[derive(Debug, Clone)]
pub enum IdSource {
    Shared(IdAllocator),
    PerKind {
        projects: IdAllocator,
        tasks: IdAllocator,
        users: IdAllocator,
    },
}

impl IdSource {
    pub fn new(policy: IdPolicy) -> Self {
        match policy {
            IdPolicy::Shared => IdSource::Shared(IdAllocator::new()),
            IdPolicy::PerKind => IdSource::PerKind {
                projects: IdAllocator::new(),
                tasks: IdAllocator::new(),
                users: IdAllocator::new(),
            },
        }
    }

    pub fn policy(&self) -> IdPolicy {
        match self {
            IdSource::Shared(_) => IdPolicy::Shared,
            IdSource::PerKind { .. } => IdPolicy::PerKind,
        }
    }

    pub fn next(&mut self, kind: EntityKind) -> u64 {
        match self {
            IdSource::Shared(all) => all.next(),
            IdSource::PerKind {
                projects,
                tasks,
                users,
            } => match kind {
                EntityKind::Project => projects.next(),
                EntityKind::Task => tasks.next(),
                EntityKind::User => users.next(),
            },
        }
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}
