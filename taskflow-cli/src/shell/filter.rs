//! Menu 6: filter tasks by assignee or by status.

use std::io::{BufRead, Write};

use anyhow::Result;
use taskflow_core::{Entity, TaskStatus, UserId};

use super::Shell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterBy {
    User,
    Status,
}

/// Maps "1"/"2" onto the two entries of a numbered choice.
fn pick<T: Copy>(raw: &str, choices: [T; 2]) -> std::result::Result<T, String> {
    match raw.parse::<usize>() {
        Ok(n @ 1..=2) => Ok(choices[n - 1]),
        Ok(_) => Err("Invalid option".to_string()),
        Err(_) => Err("Option is not a number".to_string()),
    }
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn filter_tasks_menu(&mut self) -> Result<()> {
        if self.registry.projects().is_empty() {
            return self.console.say("No active projects. Create a project first.");
        }

        self.console.say("Filter tasks:")?;
        self.console.say(" 1. By user")?;
        self.console.say(" 2. By status")?;
        let Some(by) = self.console.ask("Choose an option: ", |raw| {
            pick(raw, [FilterBy::User, FilterBy::Status])
        })?
        else {
            return Ok(());
        };

        match by {
            FilterBy::User => self.filter_by_user(),
            FilterBy::Status => self.filter_by_status(),
        }
    }

    fn filter_by_user(&mut self) -> Result<()> {
        if self.registry.users().is_empty() {
            return self.console.say("No users registered. Add a user first.");
        }
        self.print_users()?;
        let Some(user_id) = self.ask_id("Select a user: ", "User", |reg, id| {
            reg.find_user_by_id(UserId(id)).map(|u| u.id())
        })?
        else {
            return Ok(());
        };

        let lines: Vec<String> = self
            .registry
            .filter_tasks_by_assignee(user_id)
            .into_iter()
            .map(|t| self.registry.describe_task(t))
            .collect();
        self.print_lines(lines, "No matching tasks.")
    }

    fn filter_by_status(&mut self) -> Result<()> {
        for (n, status) in TaskStatus::ALL.iter().enumerate() {
            self.console.say(format!(" {}. {status}", n + 1))?;
        }
        let Some(status) = self
            .console
            .ask("Enter an option: ", |raw| pick(raw, TaskStatus::ALL))?
        else {
            return Ok(());
        };

        let lines: Vec<String> = self
            .registry
            .filter_tasks_by_status(status)
            .into_iter()
            .map(|t| self.registry.describe_task(t))
            .collect();
        self.print_lines(lines, "No matching tasks.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::tests::session;
    use taskflow_core::{NewTask, Registry};

    /// Launch: "a" (Ana, done), "b" (Bo); Ops: "c" (Ana).
    fn seeded() -> Registry {
        let mut reg = Registry::default();
        let launch = reg.create_project("Launch").id();
        let ops = reg.create_project("Ops").id();
        let ana = reg.create_user("Ana", "ana@x.com").expect("ana").id();
        let bo = reg.create_user("Bo", "bo@x.com").expect("bo").id();
        let a = reg
            .create_task_in_project(launch, NewTask::new("a", "", ana))
            .expect("a")
            .id();
        reg.create_task_in_project(launch, NewTask::new("b", "", bo))
            .expect("b");
        reg.create_task_in_project(ops, NewTask::new("c", "", ana))
            .expect("c");
        reg.mark_task_complete(a).expect("complete a");
        reg
    }

    #[test]
    fn pick_validates_choice() {
        assert_eq!(pick("1", [FilterBy::User, FilterBy::Status]), Ok(FilterBy::User));
        assert_eq!(pick("2", TaskStatus::ALL), Ok(TaskStatus::Done));
        assert_eq!(pick("3", TaskStatus::ALL), Err("Invalid option".to_string()));
        assert_eq!(pick("x", TaskStatus::ALL), Err("Option is not a number".to_string()));
    }

    #[test]
    fn filter_by_user_lists_across_projects() {
        let (_, out) = session(seeded(), "6\n1\n1\n8\n");
        assert!(out.contains("1: (Done) | Ana | a: "));
        assert!(out.contains("3: (In progress) | Ana | c: "));
        assert!(!out.contains("| Bo | b"));
    }

    #[test]
    fn filter_by_status_done() {
        let (_, out) = session(seeded(), "6\n2\n2\n8\n");
        assert!(out.contains("1: (Done) | Ana | a: "));
        assert!(!out.contains("| c: "));
        assert!(!out.contains("| b: "));
    }

    #[test]
    fn filter_by_status_without_matches() {
        let mut reg = Registry::default();
        let p = reg.create_project("Launch").id();
        let ana = reg.create_user("Ana", "ana@x.com").expect("ana").id();
        reg.create_task_in_project(p, NewTask::new("a", "", ana))
            .expect("a");
        let (_, out) = session(reg, "6\n2\n2\n8\n");
        assert!(out.contains("No matching tasks."));
    }

    #[test]
    fn filter_requires_projects() {
        let (_, out) = session(Registry::default(), "6\n8\n");
        assert!(out.contains("No active projects. Create a project first."));
    }
}
