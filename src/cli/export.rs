//! CLI command for exporting grocery lists

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::app::App;
use crate::error::{GroceryError, GroceryResult};
use crate::export::{export_listing_csv, export_listing_json, export_listing_yaml};
use crate::models::validate_folder_key;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// One row per item
    Csv,
    /// Folders with totals, machine-readable
    Json,
    /// Folders with totals, human-readable
    Yaml,
}

/// Arguments of `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short = 't', long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Only export this folder
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `export`
pub fn handle_export(app: &App, args: ExportArgs) -> GroceryResult<()> {
    let fetched = app.sync_engine().list_all_folders();
    if let Some(error) = fetched.error {
        return Err(GroceryError::Export(error));
    }

    let mut listing = fetched.listing;
    if let Some(name) = &args.folder {
        let name = validate_folder_key(name)?;
        if listing.get(name).is_none() {
            return Err(GroceryError::folder_not_found(name));
        }
        listing.retain_folder(name);
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            GroceryError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv => {
            export_listing_csv(&listing, &mut writer)?;
        }
        ExportFormat::Json => export_listing_json(&listing, &mut writer)?,
        ExportFormat::Yaml => export_listing_yaml(&listing, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| GroceryError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        println!(
            "Exported {} folder(s) to: {}",
            listing.len(),
            path.display()
        );
    }
    Ok(())
}
