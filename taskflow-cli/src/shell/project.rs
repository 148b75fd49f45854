//! Menu 1: create a project.

use std::io::{BufRead, Write};

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};
use taskflow_core::{Entity, ProjectId};

use super::Shell;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "tasks")]
    tasks: usize,
    #[tabled(rename = "created (UTC)")]
    created: String,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn create_project_menu(&mut self) -> Result<()> {
        self.console.heading("CREATE PROJECT")?;
        let Some(name) = self.console.ask_text("Project name: ")? else {
            return Ok(());
        };
        self.registry.create_project(name);
        self.console.success("Project created!")?;
        self.console.say("Current projects list:")?;
        self.print_projects()
    }

    pub(super) fn print_projects(&mut self) -> Result<()> {
        let rows: Vec<ProjectRow> = self
            .registry
            .projects()
            .iter()
            .map(|p| ProjectRow {
                id: p.id().get(),
                name: p.name().to_owned(),
                tasks: p.tasks().len(),
                created: p.created_at().format("%H:%M:%S").to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        self.console.say(table)
    }

    /// "Project {name} current tasks:" followed by one line per task.
    pub(super) fn print_project_tasks(&mut self, id: ProjectId) -> Result<()> {
        let project = self.registry.find_project_by_id(id)?;
        let header = format!("Project {} current tasks:", project.name());
        let lines = self.registry.project_task_lines(project);
        self.console.heading(header)?;
        self.print_lines(lines, "  (no tasks)")?;
        self.console.say("")
    }
}
