//! Interactive shell
//!
//! A read-dispatch loop over one session. Each input line is parsed into a
//! [`ShellCommand`] and dispatched; errors are printed and the loop goes on.
//! The session is saved after every command that may have changed it.

use std::io::{self, BufRead, Write};

use tracing::debug;

use super::folder::{add_hit, delete_item, save_after_write, show_lists, target_folder};
use super::search::run_search;
use crate::app::App;
use crate::display::format_session;
use crate::error::{GroceryError, GroceryResult};
use crate::models::{ItemKey, Session};

const HELP: &str = "\
Commands:
  search <query>          Search the catalogue
  add <n> [folder]        Add result n of the last search
  folder <name>           Select the folder new items go to
  delete <folder> <key>   Delete an item from a folder
  lists [folder]          Show the grocery lists
  session                 Show what this session added
  help                    Show this help
  quit                    Leave the shell";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Add {
        position: usize,
        folder: Option<String>,
    },
    SelectFolder(String),
    Delete {
        folder: String,
        key: String,
    },
    Lists(Option<String>),
    Session,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    /// Parse one input line
    pub fn parse(line: &str) -> GroceryResult<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let rest_or_none = || (!rest.is_empty()).then(|| rest.to_string());

        match verb.to_lowercase().as_str() {
            "" => Ok(Self::Empty),
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "add" | "a" => {
                let (number, folder) = match rest.split_once(char::is_whitespace) {
                    Some((number, folder)) => (number, Some(folder.trim().to_string())),
                    None => (rest, None),
                };
                let position = number.parse().map_err(|_| {
                    GroceryError::Validation(format!(
                        "'{}' is not a result number (usage: add <n> [folder])",
                        number
                    ))
                })?;
                Ok(Self::Add { position, folder })
            }
            "folder" | "f" => match rest_or_none() {
                Some(name) => Ok(Self::SelectFolder(name)),
                None => Err(GroceryError::Validation("Usage: folder <name>".into())),
            },
            "delete" | "d" => match rest.rsplit_once(char::is_whitespace) {
                Some((folder, key)) => Ok(Self::Delete {
                    folder: folder.trim_end().to_string(),
                    key: key.to_string(),
                }),
                None => Err(GroceryError::Validation(
                    "Usage: delete <folder> <key>".into(),
                )),
            },
            "lists" | "ls" | "l" => Ok(Self::Lists(rest_or_none())),
            "session" => Ok(Self::Session),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(GroceryError::Validation(format!(
                "Unknown command '{}'; type 'help'",
                other
            ))),
        }
    }

    /// Whether running the command can change the session
    fn mutates_session(&self) -> bool {
        matches!(
            self,
            Self::Search(_) | Self::Add { .. } | Self::SelectFolder(_) | Self::Delete { .. }
        )
    }
}

/// Run one command against the session
///
/// Returns the key of the store item the command wrote, if any.
pub fn dispatch(
    app: &App,
    session: &mut Session,
    command: &ShellCommand,
) -> GroceryResult<Option<ItemKey>> {
    match command {
        ShellCommand::Search(query) => run_search(app, session, query).map(|_| None),
        ShellCommand::Add { position, folder } => {
            let hit = app
                .search_service()
                .remembered_hit(session, *position)?
                .clone();
            add_hit(app, session, &hit, folder.as_deref()).map(Some)
        }
        ShellCommand::SelectFolder(name) => {
            let folder = target_folder(session, Some(name))?;
            println!("New items go to '{}'", folder);
            session.selected_folder = Some(folder);
            session.touch();
            Ok(None)
        }
        ShellCommand::Delete { folder, key } => delete_item(app, session, folder, key),
        ShellCommand::Lists(folder) => show_lists(app, folder.as_deref()).map(|_| None),
        ShellCommand::Session => {
            print!("{}", format_session(session, app.symbols()));
            Ok(None)
        }
        ShellCommand::Help => {
            println!("{}", HELP);
            Ok(None)
        }
        ShellCommand::Quit | ShellCommand::Empty => Ok(None),
    }
}

/// Read commands from `input` until `quit` or end of input
pub fn run_shell<R: BufRead>(app: &App, session: &mut Session, input: R) -> GroceryResult<()> {
    println!(
        "Grocery shell, session {}. Type 'help' for commands.",
        session.id.short()
    );

    let mut lines = input.lines();
    loop {
        print!("{}> ", session.selected_folder.as_deref().unwrap_or("grocery"));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };
        debug!(?command, "Shell command");

        if command == ShellCommand::Quit {
            break;
        }

        let written = dispatch(app, session, &command).unwrap_or_else(|e| {
            println!("Error: {}", e);
            None
        });

        if command.mutates_session() {
            if let Err(e) = save_after_write(app, session, written.as_ref()) {
                println!("Error: {}", e);
            }
        }
    }

    app.sessions.save(session)
}
