use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grocery::cli::folder::{delete_item, save_after_write, show_lists};
use grocery::cli::{
    handle_add, handle_export, handle_session_command, parse_session_id, run_search, run_shell,
    AddArgs, ExportArgs, SessionCommands,
};
use grocery::config::{paths::GroceryPaths, settings::Settings};
use grocery::models::SessionId;
use grocery::storage::initialize_storage;
use grocery::App;

#[derive(Parser)]
#[command(
    name = "grocery",
    version,
    about = "Shared grocery lists with catalogue search",
    long_about = "grocery-cli searches a supermarket catalogue, translates product \
                  descriptions and converts prices, and keeps named grocery lists \
                  in a shared store. Each session tracks what it added and the \
                  running total."
)]
struct Cli {
    /// Session to work in (defaults to the current session)
    #[arg(long, global = true, env = "GROCERY_SESSION")]
    session: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the product catalogue
    #[command(alias = "s")]
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Add a product to a folder
    Add(AddArgs),

    /// Delete an item from a folder
    #[command(alias = "rm")]
    Delete {
        /// Folder name
        folder: String,
        /// Item key (as shown by `lists`)
        #[arg(allow_hyphen_values = true)]
        key: String,
    },

    /// Show the grocery lists
    #[command(alias = "ls")]
    Lists {
        /// Only show this folder
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Session management commands
    #[command(subcommand)]
    Session(SessionCommands),

    /// Start the interactive shell
    Shell,

    /// Export the grocery lists
    Export(ExportArgs),

    /// Initialize configuration
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GROCERY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = GroceryPaths::new()?;
    let explicit: Option<SessionId> = cli
        .session
        .as_deref()
        .map(parse_session_id)
        .transpose()?;

    match cli.command {
        Some(Commands::Search { query }) => {
            let app = open_app(paths)?;
            let mut session = app.sessions.open_or_create(explicit)?;
            let result = run_search(&app, &mut session, &query.join(" "));
            app.sessions.save(&session)?;
            result?;
        }
        Some(Commands::Add(args)) => {
            let app = open_app(paths)?;
            let mut session = app.sessions.open_or_create(explicit)?;
            let key = handle_add(&app, &mut session, args)?;
            save_after_write(&app, &session, Some(&key))?;
        }
        Some(Commands::Delete { folder, key }) => {
            let app = open_app(paths)?;
            let mut session = app.sessions.open_or_create(explicit)?;
            let removed = delete_item(&app, &mut session, &folder, &key)?;
            save_after_write(&app, &session, removed.as_ref())?;
        }
        Some(Commands::Lists { folder }) => {
            let app = open_app(paths)?;
            show_lists(&app, folder.as_deref())?;
        }
        Some(Commands::Session(cmd)) => {
            let app = open_app(paths)?;
            handle_session_command(&app, explicit, cmd)?;
        }
        Some(Commands::Shell) => {
            let app = open_app(paths)?;
            let mut session = app.sessions.open_or_create(explicit)?;
            run_shell(&app, &mut session, io::stdin().lock())?;
        }
        Some(Commands::Export(args)) => {
            let app = open_app(paths)?;
            handle_export(&app, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing grocery-cli at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Default settings written to {}", paths.settings_file().display());
            } else {
                println!("Already initialized; settings left unchanged.");
            }
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            print_config(&paths, &settings);
        }
        None => {
            println!("grocery-cli - shared grocery lists");
            println!();
            println!("Run 'grocery --help' for usage information.");
            println!("Run 'grocery shell' to start the interactive shell.");
        }
    }

    Ok(())
}

/// Load settings and wire up the store and external services
fn open_app(paths: GroceryPaths) -> Result<App> {
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    Ok(App::new(paths, settings)?)
}

fn print_config(paths: &GroceryPaths, settings: &Settings) {
    println!("grocery-cli Configuration");
    println!("=========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Sessions:         {}", paths.sessions_dir().display());
    println!();
    println!("Settings:");
    println!("  Exchange rate:   {}", settings.exchange_rate);
    println!("  Store backend:   {:?}", settings.store.backend);
    if let Some(url) = &settings.store.url {
        println!("  Store url:       {}", url);
    }
    println!("  Translator:      {:?}", settings.translation.provider);
    println!(
        "  Catalogue:       {} ({})",
        settings.catalogue.index_name, settings.catalogue.url
    );
    println!(
        "  Catalogue key:   {}",
        if settings.catalogue.api_key.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!(
        "  Retries:         {} attempts, {}s apart",
        settings.retry.attempts, settings.retry.backoff_secs
    );
}
