//! Background maintenance of the session store

mod session;

pub use session::{CleanupResult, SessionCleanupConfig, SessionCleanupService};
