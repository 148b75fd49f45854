//! Menus 3, 4, 5 and 7: add, list, assign and complete tasks.

use std::io::{BufRead, Write};

use anyhow::Result;
use taskflow_core::{Entity, NewTask, ProjectId, TaskId, UserId};

use super::Shell;

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn add_task_menu(&mut self) -> Result<()> {
        if self.registry.projects().is_empty() {
            return self.console.say("No projects. Create a project first.");
        }
        if self.registry.users().is_empty() {
            return self.console.say("No users registered. Add a user first.");
        }

        self.print_projects()?;
        let Some(project_id) = self.ask_id("Enter current project id: ", "Project", |reg, id| {
            reg.find_project_by_id(ProjectId(id)).map(|p| p.id())
        })?
        else {
            return Ok(());
        };

        let Some(title) = self.console.ask("Enter task title: ", |raw| {
            if raw.is_empty() {
                Err("Task title must not be empty.".to_string())
            } else {
                Ok(raw.to_owned())
            }
        })?
        else {
            return Ok(());
        };
        let Some(description) = self.console.ask_text("Enter task description: ")? else {
            return Ok(());
        };
        let Some(deadline) = self.console.ask_text("Enter deadline (optional): ")? else {
            return Ok(());
        };

        self.print_users()?;
        let Some(assignee) = self.ask_id(
            "Choose an assignee for the task by entering their id: ",
            "User",
            |reg, id| reg.find_user_by_id(UserId(id)).map(|u| u.id()),
        )?
        else {
            return Ok(());
        };

        let new = NewTask {
            title,
            description,
            assignee,
            deadline: Some(deadline),
        };
        if let Err(err) = self.registry.create_task_in_project(project_id, new) {
            return self.console.error(format!("ERROR: {err}"));
        }
        self.print_project_tasks(project_id)
    }

    pub(super) fn list_tasks_menu(&mut self) -> Result<()> {
        if self.registry.projects().is_empty() {
            return self.console.say("No projects. Create a project first.");
        }
        self.console.heading("List of current tasks in all projects:")?;
        let ids: Vec<ProjectId> = self.registry.projects().iter().map(|p| p.id()).collect();
        for id in ids {
            self.print_project_tasks(id)?;
        }
        Ok(())
    }

    pub(super) fn assign_task_menu(&mut self) -> Result<()> {
        if self.registry.projects().is_empty() {
            return self.console.say("No active projects. Create a project first.");
        }
        if self.registry.users().is_empty() {
            return self.console.say("No users registered. Add a user first.");
        }
        if self.registry.list_all_tasks().is_empty() {
            return self.console.say("No active tasks. Add a task first.");
        }

        let lines = self.all_task_lines();
        self.print_lines(lines, "")?;
        let Some((task_id, title)) = self.ask_id("Choose a task id: ", "Task", |reg, id| {
            reg.find_task_by_id(TaskId(id))
                .map(|t| (t.id(), t.title().to_owned()))
        })?
        else {
            return Ok(());
        };
        self.console
            .say(format!("Select a user for the {task_id}: {title} task."))?;

        self.print_users()?;
        let Some(user_id) = self.ask_id("Select a user for the task: ", "User", |reg, id| {
            reg.find_user_by_id(UserId(id)).map(|u| u.id())
        })?
        else {
            return Ok(());
        };

        if let Err(err) = self.registry.assign_task(task_id, user_id) {
            return self.console.error(format!("ERROR: Failed to set task assignee: {err}"));
        }
        self.print_updated_task(task_id)
    }

    pub(super) fn complete_task_menu(&mut self) -> Result<()> {
        if self.registry.list_all_tasks().is_empty() {
            return self.console.say("No active tasks. Add a task first.");
        }

        let lines = self.all_task_lines();
        self.print_lines(lines, "")?;
        let Some(task_id) = self.ask_id("Choose a task by id: ", "Task", |reg, id| {
            reg.find_task_by_id(TaskId(id)).map(|t| t.id())
        })?
        else {
            return Ok(());
        };

        if let Err(err) = self.registry.mark_task_complete(task_id) {
            return self.console.error(format!("ERROR: {err}"));
        }
        self.print_updated_task(task_id)
    }

    /// Every task line, project order then insertion order.
    fn all_task_lines(&self) -> Vec<String> {
        self.registry
            .list_all_tasks()
            .into_iter()
            .map(|t| self.registry.describe_task(t))
            .collect()
    }

    fn print_updated_task(&mut self, id: TaskId) -> Result<()> {
        let task = self.registry.find_task_by_id(id)?;
        let line = self.registry.describe_task(task);
        self.console.success("Updated task:")?;
        self.console.say(line)
    }
}
