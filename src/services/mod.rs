//! Service layer for grocery-cli
//!
//! The service layer sits between the presentation (CLI, shell) and the
//! external collaborators (catalogue, translator, list store), keeping the
//! session mirror consistent with what was written remotely.

pub mod retry;
pub mod search;
pub mod sync;

pub use retry::{RetryExhausted, RetryPolicy};
pub use search::{SearchOutcome, SearchResult, SearchService};
pub use sync::{AddOutcome, DeleteOutcome, FetchOutcome, SyncEngine};
