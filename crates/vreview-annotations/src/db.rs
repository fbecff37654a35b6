//! Embedded DuckDB handle.
//!
//! The connection is not `Sync`, so it lives behind a single mutex. Every
//! query holds the lock only for the duration of one statement.

use std::path::Path;
use std::sync::Mutex;

use duckdb::Connection;

use crate::error::{AnnotationError, AnnotationResult};

/// Shared in-memory DuckDB instance that hosts every registered view.
pub struct AnnotationDb {
    conn: Mutex<Connection>,
}

impl AnnotationDb {
    /// Open a fresh in-memory database.
    pub fn open_in_memory() -> AnnotationResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` against the connection.
    pub fn with_conn<T, F>(&self, f: F) -> AnnotationResult<T>
    where
        F: FnOnce(&Connection) -> duckdb::Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AnnotationError::lock_poisoned(e.to_string()))?;
        Ok(f(&conn)?)
    }
}

impl std::fmt::Debug for AnnotationDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationDb").finish_non_exhaustive()
    }
}

/// Render a string as a single-quoted SQL literal.
pub fn sql_string_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Render a list of file paths as a DuckDB list literal.
///
/// Returns `None` if any path is not valid UTF-8.
pub(crate) fn sql_path_list<P: AsRef<Path>>(paths: &[P]) -> Option<String> {
    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        items.push(sql_string_literal(path.as_ref().to_str()?));
    }
    Some(format!("[{}]", items.join(", ")))
}
