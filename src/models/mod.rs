//! Core data models for grocery-cli
//!
//! Catalogue hits, persisted list entries, folders as read back from the
//! list store, and the per-session mirror of what the user added.

pub mod currency;
pub mod entry;
pub mod folder;
pub mod ids;
pub mod money;
pub mod product;
pub mod session;

pub use currency::CurrencyConverter;
pub use entry::ListEntry;
pub use folder::{normalize_folder_name, validate_folder_key, Folder, FolderListing, StoredItem};
pub use ids::{ItemKey, SessionId};
pub use money::Money;
pub use product::ProductHit;
pub use session::{MirroredEntry, Session, SessionMirror};
