//! Query engine over a private copy of `places.sqlite`.
//!
//! Firefox holds its live database locked, so every connection works on a
//! fresh temporary copy which is deleted when the session ends.
//!
//! The engine is single-threaded: all operations take `&mut self`, and
//! callers sharing one engine must serialise access themselves.

mod functions;
mod query;
#[cfg(test)]
pub(crate) mod schema;

pub use functions::{HOSTNAME_FN, hostname};
pub use query::{SearchQuery, build_search, split_terms};

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params_from_iter};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{Span, debug, error, info};

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::profile::ProfileLocator;

/// One search hit: a URL (or hostname when aggregating) and its title.
/// Both columns are nullable in `moz_places`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub url: Option<String>,
    pub title: Option<String>,
}

/// Lifecycle of a [`HistoryEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Disconnected,
    Connected,
    Closed,
}

/// An open connection and the temporary copy it reads.
///
/// Field order matters: the connection is dropped before the copy is deleted.
struct Session {
    conn: Connection,
    copy: NamedTempFile,
    source: PathBuf,
}

impl Session {
    /// Copy `source` to a new temporary file and open it
    fn open(source: &Path) -> Result<Self> {
        let copy = tempfile::Builder::new()
            .prefix("foxhist-places-")
            .suffix(".sqlite")
            .tempfile()?;
        std::fs::copy(source, copy.path())?;

        let conn = Connection::open(copy.path())?;
        conn.pragma_update(None, "query_only", "ON")?;
        functions::register(&conn)?;

        Ok(Self {
            conn,
            copy,
            source: source.to_path_buf(),
        })
    }

    fn close(self) -> Result<()> {
        let Session { conn, copy, .. } = self;
        conn.close().map_err(|(_, e)| e)?;
        copy.close()?;
        Ok(())
    }
}

/// Searches Firefox history through a private database copy
pub struct HistoryEngine {
    config: SearchConfig,
    locator: ProfileLocator,
    session: Option<Session>,
    state: EngineState,
    span: Span,
}

impl HistoryEngine {
    /// Create a disconnected engine. Events are recorded inside `span`.
    pub fn new(config: SearchConfig, locator: ProfileLocator, span: Span) -> Self {
        Self {
            config,
            locator,
            session: None,
            state: EngineState::Disconnected,
            span,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Adjust options; they apply to the next connect or search
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Source database of the open session
    pub fn database_path(&self) -> Option<&Path> {
        self.session.as_ref().map(|s| s.source.as_path())
    }

    /// Path of the temporary copy backing the open session
    pub fn copy_path(&self) -> Option<&Path> {
        self.session.as_ref().map(|s| s.copy.path())
    }

    /// Locate the history database and open a fresh copy of it.
    ///
    /// An open session is closed first. Discovery errors propagate, as do
    /// failures copying or opening the database.
    pub fn establish_connection(&mut self) -> Result<()> {
        if self.session.is_some() {
            self.close()?;
        }

        let located = self.locator.locate(&self.config.profile_paths)?;
        let _enter = self.span.enter();

        let source = located.ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "history database not found in the selected profile",
            )
        })?;

        let session = Session::open(&source)?;
        info!(
            "Opened history copy {} of {}",
            session.copy.path().display(),
            source.display()
        );
        self.session = Some(session);
        self.state = EngineState::Connected;
        Ok(())
    }

    /// Search URLs and titles for every space-separated term in `query`.
    ///
    /// Returns `None` when the statement cannot run (no open connection,
    /// missing table, locked file); the failure is logged. An empty vector
    /// means nothing matched.
    pub fn search(&mut self, query: &str) -> Option<Vec<HistoryRow>> {
        let _enter = self.span.enter();

        let Some(session) = self.session.as_ref() else {
            error!("Search attempted without an open history connection");
            return None;
        };

        let statement = build_search(query, &self.config);
        debug!("Running search: {}", statement.sql);

        match run(&session.conn, &statement) {
            Ok(rows) => {
                debug!("Search returned {} rows", rows.len());
                Some(rows)
            }
            Err(e) => {
                error!("Error in query ({}) execution: {}", statement.sql, e);
                None
            }
        }
    }

    /// Close the connection and delete its temporary copy
    pub fn close(&mut self) -> Result<()> {
        let session = self.session.take().ok_or(Error::NotConnected)?;
        self.state = EngineState::Closed;

        let _enter = self.span.enter();
        debug!("Closing history copy {}", session.copy.path().display());
        session.close()
    }
}

fn run(conn: &Connection, statement: &SearchQuery) -> rusqlite::Result<Vec<HistoryRow>> {
    let mut stmt = conn.prepare(&statement.sql)?;
    let rows = stmt.query_map(params_from_iter(statement.params.iter()), |row| {
        Ok(HistoryRow {
            url: row.get(0)?,
            title: row.get(1)?,
        })
    })?;
    rows.collect()
}
