//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::snapshot::SessionSnapshot;
use crate::error::Result;

/// An abstract repository for persisting session snapshots.
///
/// The engine never performs I/O itself; front ends hand snapshots to an
/// implementation of this trait (TOML files, browser storage, a database).
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(SessionSnapshot))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    fn find_by_id(&self, session_id: &str) -> Result<Option<SessionSnapshot>>;

    /// Saves a session, replacing any previous snapshot with the same ID.
    fn save(&self, session: &SessionSnapshot) -> Result<()>;

    /// Deletes a session. Deleting a missing session is not an error.
    fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all stored sessions, most recently updated first.
    fn list_all(&self) -> Result<Vec<SessionSnapshot>>;
}
