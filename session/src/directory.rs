//! Entry-level directory operations over a session.

use dirmap_entry::Entry;
use dirmap_filter::IntoSearchFilter;

use crate::config::Config;
use crate::error::SessionResult;
use crate::session::{DirectorySession, ProtocolEntry, SearchScope};

/// A session paired with its configuration.
///
/// Adds and deletes constructed entries and runs searches below the
/// configured base.
#[derive(Debug)]
pub struct Directory<S> {
    session: S,
    config: Config,
}

impl<S: DirectorySession> Directory<S> {
    pub fn new(session: S, config: Config) -> Self {
        Self { session, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Create `entry` in the directory.
    pub fn add(&mut self, entry: &Entry) -> SessionResult<()> {
        let attributes = entry.protocol_attributes();
        self.session
            .add(entry.path(), entry.object_classes(), &attributes)?;
        tracing::info!(path = %entry.path(), model = %entry.model_name(), "entry added");
        Ok(())
    }

    /// Remove `entry` from the directory.
    pub fn delete(&mut self, entry: &Entry) -> SessionResult<()> {
        self.session.delete(entry.path())?;
        tracing::info!(path = %entry.path(), "entry deleted");
        Ok(())
    }

    /// Search below the configured `base_dn`.
    pub fn search(
        &mut self,
        filter: impl IntoSearchFilter,
        scope: SearchScope,
    ) -> SessionResult<Vec<ProtocolEntry>> {
        let base = self.config.base_dn.clone();
        self.search_from(&base, filter, scope)
    }

    /// Search below an explicit base.
    pub fn search_from(
        &mut self,
        base: &str,
        filter: impl IntoSearchFilter,
        scope: SearchScope,
    ) -> SessionResult<Vec<ProtocolEntry>> {
        let filter = filter.into_search_filter();
        let entries = self.session.search(base, &filter, scope)?;
        tracing::debug!(
            base = %base,
            filter = %filter,
            ?scope,
            results = entries.len(),
            "search completed"
        );
        Ok(entries)
    }
}
