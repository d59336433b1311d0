//! grocery-cli - shared grocery lists from the command line
//!
//! Search a supermarket catalogue, translate product descriptions, convert
//! prices from colones to dollars, and keep named grocery lists ("folders")
//! in a shared list store. Each user session keeps its own log of the items
//! it added and their running total.
//!
//! ## Architecture
//!
//! - `models`: core data types (money, entries, folders, sessions)
//! - `store`: the shared list store (Firebase REST or a local JSON file)
//! - `catalogue` / `translate`: external product search and translation
//! - `services`: search, add/delete/list synchronization, retries
//! - `storage`: local persistence of settings and sessions
//! - `display` / `export` / `cli`: presentation

pub mod app;
pub mod catalogue;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;
pub mod translate;

pub use app::App;
pub use error::{GroceryError, GroceryResult};
