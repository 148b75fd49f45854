//! Interactive menu shell over a [`Registry`].
//!
//! The shell owns the registry for the whole session. Each menu flow reads
//! what it needs through [`Console`], calls one registry operation, prints the
//! result and returns to the main menu. Registry errors are shown to the
//! operator and never end the session; only I/O failures do.

mod console;
mod filter;
mod project;
mod task;
mod user;

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use taskflow_core::{Registry, RegistryResult};
use tracing::debug;

pub use console::Console;

// ---------------------------------------------------------------------------
// Menu options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CreateProject,
    CreateUsers,
    AddTasks,
    ListTasks,
    AssignTasks,
    FilterTasks,
    CompleteTasks,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 8] = [
        MenuOption::CreateProject,
        MenuOption::CreateUsers,
        MenuOption::AddTasks,
        MenuOption::ListTasks,
        MenuOption::AssignTasks,
        MenuOption::FilterTasks,
        MenuOption::CompleteTasks,
        MenuOption::Exit,
    ];

    fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|o| *o == self)
            .map_or(0, |i| i + 1)
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuOption::CreateProject => "Create project",
            MenuOption::CreateUsers => "Create users",
            MenuOption::AddTasks => "Add tasks",
            MenuOption::ListTasks => "List tasks",
            MenuOption::AssignTasks => "Assign tasks to users",
            MenuOption::FilterTasks => "Filter tasks by user or status",
            MenuOption::CompleteTasks => "Mark tasks complete",
            MenuOption::Exit => "Exit",
        };
        write!(f, "{}. {label}", self.number())
    }
}

impl FromStr for MenuOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a menu number"))?;
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| format!("no menu option {n}"))
    }
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

pub struct Shell<R, W> {
    registry: Registry,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(registry: Registry, input: R, output: W) -> Self {
        Self {
            registry,
            console: Console::new(input, output),
        }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Main loop: show the menu, run one flow, repeat until `Exit` or EOF.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.console.read_line("Enter option number: ")? else {
                break;
            };
            match line.parse::<MenuOption>() {
                Ok(MenuOption::Exit) => break,
                Ok(option) => {
                    debug!(?option, "menu option selected");
                    self.dispatch(option)?;
                }
                Err(_) => self.console.error("ERROR: Invalid option")?,
            }
            if self.console.at_eof() {
                break;
            }
        }
        self.console.say("Bye.")
    }

    fn print_menu(&mut self) -> Result<()> {
        self.console.say("")?;
        for option in MenuOption::ALL {
            self.console.say(option)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, option: MenuOption) -> Result<()> {
        match option {
            MenuOption::CreateProject => self.create_project_menu(),
            MenuOption::CreateUsers => self.create_user_menu(),
            MenuOption::AddTasks => self.add_task_menu(),
            MenuOption::ListTasks => self.list_tasks_menu(),
            MenuOption::AssignTasks => self.assign_task_menu(),
            MenuOption::FilterTasks => self.filter_tasks_menu(),
            MenuOption::CompleteTasks => self.complete_task_menu(),
            MenuOption::Exit => Ok(()),
        }
    }

    /// Prompts for a numeric id of `kind` and resolves it with `resolve`.
    ///
    /// Non-numeric input prints "{kind} id is not a number."; an id that does
    /// not resolve prints "{kind} not found.". Both count as a failed attempt.
    fn ask_id<T>(
        &mut self,
        label: &str,
        kind: &str,
        resolve: impl Fn(&Registry, u64) -> RegistryResult<T>,
    ) -> Result<Option<T>> {
        let registry = &self.registry;
        self.console.ask(label, |raw| {
            let id: u64 = raw
                .parse()
                .map_err(|_| format!("{kind} id is not a number."))?;
            resolve(registry, id).map_err(|err| {
                if err.is_not_found() {
                    format!("{kind} not found.")
                } else {
                    err.to_string()
                }
            })
        })
    }

    /// Prints `lines`, or `empty` when there are none.
    fn print_lines(&mut self, lines: Vec<String>, empty: &str) -> Result<()> {
        if lines.is_empty() {
            return self.console.say(empty);
        }
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    pub(crate) type TestShell = Shell<Cursor<Vec<u8>>, Vec<u8>>;

    pub(crate) fn shell_with(registry: Registry, input: &str) -> TestShell {
        colored::control::set_override(false);
        Shell::new(registry, Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    /// Runs a full session and returns the registry state and the transcript.
    pub(crate) fn session(registry: Registry, input: &str) -> (Registry, String) {
        let mut shell = shell_with(registry, input);
        shell.run().expect("session");
        let registry = shell.registry().clone();
        let out = String::from_utf8(shell.into_output()).expect("utf8");
        (registry, out)
    }

    #[test]
    fn menu_option_parsing() {
        assert_eq!("1".parse::<MenuOption>(), Ok(MenuOption::CreateProject));
        assert_eq!(" 7 ".parse::<MenuOption>(), Ok(MenuOption::CompleteTasks));
        assert_eq!("8".parse::<MenuOption>(), Ok(MenuOption::Exit));
        assert!("0".parse::<MenuOption>().is_err());
        assert!("9".parse::<MenuOption>().is_err());
        assert!("two".parse::<MenuOption>().is_err());
    }

    #[test]
    fn menu_option_display_is_numbered() {
        assert_eq!(MenuOption::CreateProject.to_string(), "1. Create project");
        assert_eq!(MenuOption::Exit.to_string(), "8. Exit");
    }

    #[test]
    fn exit_ends_session() {
        let (_, out) = session(Registry::default(), "8\n1\n");
        assert!(out.contains("1. Create project"));
        assert!(out.ends_with("Bye.\n"));
        assert!(!out.contains("Project name:"));
    }

    #[test]
    fn eof_ends_session() {
        let (_, out) = session(Registry::default(), "");
        assert!(out.ends_with("Bye.\n"));
    }

    #[test]
    fn invalid_option_reshows_menu() {
        let (_, out) = session(Registry::default(), "abc\n42\n8\n");
        assert_eq!(out.matches("ERROR: Invalid option").count(), 2);
        assert_eq!(out.matches("8. Exit").count(), 3);
    }
}
