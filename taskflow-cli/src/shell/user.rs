//! Menu 2: create a user.

use std::io::{BufRead, Write};

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};
use taskflow_core::Entity;

use super::Shell;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "email")]
    email: String,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn create_user_menu(&mut self) -> Result<()> {
        self.console.heading("CREATE USER")?;
        let Some(name) = self.console.ask_text("Enter user name: ")? else {
            return Ok(());
        };
        let Some(email) = self.console.ask_text("Enter user email: ")? else {
            return Ok(());
        };
        if let Err(err) = self.registry.create_user(name, email) {
            return self.console.error(format!("ERROR: {err}"));
        }
        self.console.say("")?;
        self.console.say("Current users:")?;
        self.print_users()
    }

    pub(super) fn print_users(&mut self) -> Result<()> {
        let rows: Vec<UserRow> = self
            .registry
            .users()
            .iter()
            .map(|u| UserRow {
                id: u.id().get(),
                name: u.name().to_owned(),
                email: u.email().to_owned(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        self.console.say(table)
    }
}
