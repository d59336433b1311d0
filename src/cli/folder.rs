//! Grocery list commands
//!
//! Adding, deleting and listing items in the shared folders.

use clap::Args;
use serde_json::Value;

use crate::app::App;
use crate::display::{format_add_outcome, format_delete_outcome, format_folder_listing};
use crate::error::{GroceryError, GroceryResult};
use crate::services::DeleteOutcome;
use crate::models::{normalize_folder_name, validate_folder_key, ItemKey, ProductHit, Session};

/// Arguments of `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Number of a result from the last search
    #[arg(required_unless_present = "hit")]
    pub result: Option<usize>,

    /// Raw catalogue record (JSON) to add instead of a search result
    #[arg(long, conflicts_with = "result")]
    pub hit: Option<String>,

    /// Target folder (defaults to the session's selected folder)
    #[arg(short, long)]
    pub folder: Option<String>,
}

/// Handle `add`; returns the key the store gave the new item
pub fn handle_add(app: &App, session: &mut Session, args: AddArgs) -> GroceryResult<ItemKey> {
    let hit = match (&args.hit, args.result) {
        (Some(raw), _) => parse_hit(app, raw)?,
        (None, Some(position)) => app
            .search_service()
            .remembered_hit(session, position)?
            .clone(),
        (None, None) => {
            return Err(GroceryError::Validation(
                "Give a result number or --hit".into(),
            ))
        }
    };

    add_hit(app, session, &hit, args.folder.as_deref())
}

fn parse_hit(app: &App, raw: &str) -> GroceryResult<ProductHit> {
    let record: Value = serde_json::from_str(raw)
        .map_err(|e| GroceryError::Validation(format!("Invalid --hit JSON: {}", e)))?;
    Ok(ProductHit::from_catalogue(
        &record,
        &app.settings.catalogue.store_id,
    ))
}

/// Folder to write to: the given one, else the session's selection
pub fn target_folder(session: &Session, folder: Option<&str>) -> GroceryResult<String> {
    match folder.or(session.selected_folder.as_deref()) {
        Some(name) => normalize_folder_name(name),
        None => Err(GroceryError::Validation(
            "No folder given; pass --folder or select one first".into(),
        )),
    }
}

/// Add one hit and print the result
pub fn add_hit(
    app: &App,
    session: &mut Session,
    hit: &ProductHit,
    folder: Option<&str>,
) -> GroceryResult<ItemKey> {
    let folder = target_folder(session, folder)?;
    let outcome = app
        .sync_engine()
        .add_to_folder(&mut session.mirror, hit, &folder)?;
    session.touch();

    if let Some(warning) = &outcome.translation_warning {
        eprintln!("Warning: {}", warning);
    }
    println!("{}", format_add_outcome(&outcome, app.symbols()));
    println!(
        "Session total: {}",
        app.symbols().normalized(session.mirror.running_total())
    );
    Ok(outcome.key)
}

/// Delete `folder/key` and print the result
///
/// Returns the key when an item was actually removed from the store.
pub fn delete_item(
    app: &App,
    session: &mut Session,
    folder: &str,
    key: &str,
) -> GroceryResult<Option<ItemKey>> {
    let key = ItemKey::new(key.trim());
    if key.as_str().is_empty() {
        return Err(GroceryError::Validation("Item key cannot be empty".into()));
    }

    let outcome = app
        .sync_engine()
        .delete_from_folder(&mut session.mirror, folder, &key)?;
    session.touch();

    println!(
        "{}",
        format_delete_outcome(&outcome, folder, &key, app.symbols())
    );
    println!(
        "Session total: {}",
        app.symbols().normalized(session.mirror.running_total())
    );
    Ok(matches!(outcome, DeleteOutcome::Deleted { .. }).then_some(key))
}

/// Save the session after a command that may have written `written`
///
/// The store write is not undone when the session file cannot be saved,
/// so the failure names the item it concerns.
pub fn save_after_write(
    app: &App,
    session: &Session,
    written: Option<&ItemKey>,
) -> GroceryResult<()> {
    app.sessions.save(session).map_err(|e| {
        if let Some(key) = written {
            eprintln!("Warning: {}", unsaved_write_warning(key, &e));
        }
        e
    })
}

fn unsaved_write_warning(key: &ItemKey, err: &GroceryError) -> String {
    format!(
        "item {} was written to the store but the session could not be saved: {}",
        key, err
    )
}

/// Print every folder, or only `folder`
pub fn show_lists(app: &App, folder: Option<&str>) -> GroceryResult<()> {
    let fetched = app.sync_engine().list_all_folders();
    if let Some(error) = &fetched.error {
        eprintln!("Error: {}", error);
    }

    let mut listing = fetched.listing;
    if let Some(name) = folder {
        let name = validate_folder_key(name)?;
        if fetched.error.is_none() && listing.get(name).is_none() {
            return Err(GroceryError::folder_not_found(name));
        }
        listing.retain_folder(name);
    }

    println!("{}", format_folder_listing(&listing, app.symbols()).trim_end());
    if listing.len() > 1 {
        println!(
            "\nAll lists: {}",
            app.symbols().normalized(listing.grand_total())
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::CatalogueClient;
    use crate::config::{GroceryPaths, Settings};
    use crate::models::Money;
    use crate::store::JsonFileStore;
    use crate::translate::{PassthroughTranslator, Translator};
    use std::fs;
    use tempfile::TempDir;

    struct NoCatalogue;

    impl CatalogueClient for NoCatalogue {
        fn search(&self, _query: &str) -> Vec<ProductHit> {
            Vec::new()
        }
    }

    fn app(temp_dir: &TempDir) -> App {
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = JsonFileStore::new(temp_dir.path().join("grocery_lists.json"));
        App::with_parts(
            paths,
            Settings::default(),
            Box::new(store),
            Box::new(NoCatalogue),
            Translator::new(Box::new(PassthroughTranslator), "es", "en"),
        )
    }

    fn leche() -> ProductHit {
        ProductHit {
            description: Some("leche".into()),
            base_price: Some(Money::from_decimal(1000.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_failed_session_save_keeps_store_write() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir);
        // A file where the sessions directory should be makes every save fail
        fs::create_dir_all(app.paths.data_dir()).unwrap();
        fs::write(app.paths.sessions_dir(), "not a directory").unwrap();

        let mut session = Session::new();
        let key = add_hit(&app, &mut session, &leche(), Some("home")).unwrap();

        assert!(save_after_write(&app, &session, Some(&key)).is_err());
        let listing = app.sync_engine().list_all_folders().listing;
        let home = listing.get("home").unwrap();
        assert!(home.items.contains_key(&key));
    }

    #[test]
    fn test_unsaved_write_warning_names_the_key() {
        let warning = unsaved_write_warning(
            &ItemKey::from("-Nk1"),
            &GroceryError::Io("disk full".into()),
        );
        assert!(warning.starts_with("item -Nk1 was written to the store"));
        assert!(warning.ends_with("disk full"));
    }

    #[test]
    fn test_delete_reports_only_removed_keys() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir);
        let mut session = Session::new();
        let key = add_hit(&app, &mut session, &leche(), Some("home")).unwrap();

        let missing = delete_item(&app, &mut session, "home", "missing").unwrap();
        assert_eq!(missing, None);

        let removed = delete_item(&app, &mut session, "home", key.as_str()).unwrap();
        assert_eq!(removed, Some(key));
        assert_eq!(session.mirror.running_total(), Money::zero());
    }

    #[test]
    fn test_target_folder_prefers_argument() {
        let mut session = Session::new();
        session.selected_folder = Some("home".into());

        assert_eq!(target_folder(&session, Some(" office ")).unwrap(), "office");
        assert_eq!(target_folder(&session, None).unwrap(), "home");
    }

    #[test]
    fn test_target_folder_required() {
        let session = Session::new();
        assert!(target_folder(&session, None).unwrap_err().is_validation());
        assert!(target_folder(&session, Some("a/b")).is_err());
    }
}
