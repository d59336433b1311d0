//! Search command

use crate::app::App;
use crate::display::format_search_results;
use crate::error::GroceryResult;
use crate::models::Session;

/// Search the catalogue and print numbered results
pub fn run_search(app: &App, session: &mut Session, query: &str) -> GroceryResult<()> {
    let outcome = app.search_service().search(session, query)?;

    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning);
    }
    print!("{}", format_search_results(&outcome.results, app.symbols()));
    if outcome.results.is_empty() {
        println!();
    } else {
        println!("\nUse 'add <number>' to put a result on a list.");
    }
    Ok(())
}
