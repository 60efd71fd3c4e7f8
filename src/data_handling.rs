use std::error::Error;
use std::fmt;
use std::path::Path;

use rusqlite::{ffi, Connection};

pub type Result<T> = std::result::Result<T, DataError>;

// Tables are created on open so a fresh database file is immediately usable.
// Foreign keys are off by default in SQLite and must be switched on per
// connection, before anything else runs.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS department (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS role (
    id            INTEGER PRIMARY KEY,
    title         TEXT NOT NULL,
    salary        INTEGER NOT NULL CHECK (salary >= 0),
    department_id INTEGER NOT NULL REFERENCES department (id)
);

CREATE TABLE IF NOT EXISTS employee (
    id         INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL,
    role_id    INTEGER NOT NULL REFERENCES role (id),
    manager_id INTEGER REFERENCES employee (id)
);
";

/// Store and its related methods are the main API for running catalog
/// queries against the tracker database.  It owns the process-wide SQLite
/// connection for the lifetime of the program; the per-entity operations
/// live in the department, role, and personnel modules.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path`, enable foreign-key
    /// enforcement, and create any missing tables.  Fails fast with
    /// DataError::Connection if the file cannot be opened, so the caller can
    /// abort before presenting any menu.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(&path).map_err(DataError::Connection)?;
        log::debug!("opened database at {}", path.as_ref().display());
        Self::bootstrap(conn)
    }

    /// Open an in-memory database with the same schema.  Used by the tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DataError::Connection)?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(DataError::Connection)?;
        conn.execute_batch(SCHEMA).map_err(DataError::Connection)?;

        Ok(Store { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[derive(Debug)]
pub enum DataError {
    Connection(rusqlite::Error),
    Constraint(rusqlite::Error),
    Reference(rusqlite::Error),
    Sqlite(rusqlite::Error),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::DataError::*;

        match self {
            Connection(e) => write!(f, "could not open database: {}", e),
            Constraint(e) => write!(f, "constraint violated: {}", e),
            Reference(e) => write!(f, "foreign key not satisfied: {}", e),
            Sqlite(e) => write!(f, "database error: {}", e),
        }
    }
}

impl Error for DataError {}

impl From<rusqlite::Error> for DataError {
    /// Classify a SQLite failure.  Foreign-key and not-null violations both
    /// mean a bound id no longer names an existing row, so they surface as
    /// Reference; the remaining constraint class (uniqueness, checks) is
    /// Constraint; anything else is a plain database error.
    fn from(error: rusqlite::Error) -> DataError {
        if let rusqlite::Error::SqliteFailure(cause, _) = &error {
            if cause.code == rusqlite::ErrorCode::ConstraintViolation {
                return match cause.extended_code {
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY | ffi::SQLITE_CONSTRAINT_NOTNULL => {
                        DataError::Reference(error)
                    }
                    _ => DataError::Constraint(error),
                };
            }
        }

        DataError::Sqlite(error)
    }
}
