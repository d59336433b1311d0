//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod folder;
pub mod search;
pub mod session;
pub mod shell;

pub use export::{handle_export, ExportArgs, ExportFormat};
pub use folder::{handle_add, AddArgs};
pub use search::run_search;
pub use session::{handle_session_command, parse_session_id, SessionCommands};
pub use shell::{run_shell, ShellCommand};
