//! Session CLI commands

use clap::Subcommand;

use crate::app::App;
use crate::display::{format_session, format_session_list};
use crate::error::{GroceryError, GroceryResult};
use crate::models::SessionId;

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Show the entries added in the session and their running total
    Show,
    /// Start a new session and make it current
    Start,
    /// End a session, discarding its state
    End {
        /// Session id (defaults to the current session)
        id: Option<String>,
    },
    /// List persisted sessions
    List,
}

/// Parse a session id given on the command line
pub fn parse_session_id(raw: &str) -> GroceryResult<SessionId> {
    raw.parse()
        .map_err(|e| GroceryError::Session(format!("Invalid session id '{}': {}", raw, e)))
}

/// Handle a session command
pub fn handle_session_command(
    app: &App,
    explicit: Option<SessionId>,
    cmd: SessionCommands,
) -> GroceryResult<()> {
    let sessions = &app.sessions;

    match cmd {
        SessionCommands::Show => {
            let session = sessions.open_or_create(explicit)?;
            print!("{}", format_session(&session, app.symbols()));
        }

        SessionCommands::Start => {
            let session = sessions.start()?;
            println!("Started session {}", session.id);
            println!("It is now the current session.");
        }

        SessionCommands::End { id } => {
            let id = match id {
                Some(raw) => Some(parse_session_id(&raw)?),
                None => explicit.or(sessions.current_id()?),
            };
            let Some(id) = id else {
                println!("No active session.");
                return Ok(());
            };

            if sessions.end(&id)? {
                println!("Ended session {}", id);
            } else {
                return Err(GroceryError::session_not_found(id.to_string()));
            }
        }

        SessionCommands::List => {
            let all = sessions.list()?;
            let current = match sessions.current_id()? {
                Some(id) => all.iter().find(|s| s.id == id),
                None => None,
            };
            print!("{}", format_session_list(&all, current));
        }
    }

    Ok(())
}
