//! Session formatting

use super::Symbols;
use crate::models::Session;

/// Format a session with the entries it added and their running total
pub fn format_session(session: &Session, symbols: Symbols<'_>) -> String {
    let mut output = String::new();
    output.push_str(&format!("Session: {}\n", session.id));
    output.push_str(&format!(
        "Started: {}\n",
        session.started_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(folder) = &session.selected_folder {
        output.push_str(&format!("Folder:  {}\n", folder));
    }

    if session.mirror.is_empty() {
        output.push_str("\nNo items added in this session.\n");
    } else {
        output.push_str("\nAdded in this session:\n");
        for mirrored in session.mirror.entries() {
            output.push_str(&format!(
                "  [{}] {}  (key {})\n",
                mirrored.folder,
                symbols.entry_line(&mirrored.entry),
                mirrored.key
            ));
        }
    }

    output.push_str(&format!(
        "\nRunning total: {}\n",
        symbols.normalized(session.mirror.running_total())
    ));
    output
}

/// One line per session
pub fn format_session_list(sessions: &[Session], current: Option<&Session>) -> String {
    if sessions.is_empty() {
        return "No sessions found.".to_string();
    }

    let mut output = String::new();
    for session in sessions {
        let marker = if current.map(|c| c.id) == Some(session.id) {
            "*"
        } else {
            " "
        };
        output.push_str(&format!(
            "{} {}  {:>3} items  {}  updated {}\n",
            marker,
            session.id.short(),
            session.mirror.len(),
            session.mirror.running_total(),
            session.updated_at.format("%Y-%m-%d %H:%M")
        ));
    }
    output
}
