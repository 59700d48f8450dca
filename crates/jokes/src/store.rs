use crate::error::Error;
use jokes_core::favorites::{DeleteOutcome, FavoritesStore, InsertOutcome};
use jokes_core::joke::{Flags, Joke, JokeError, JokeId, JokePayload, JokeType, WireJoke};
use log::info;
use rusqlite::types::Type;
use rusqlite::Error::FromSqlConversionFailure;
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS jokes (
        id          INTEGER PRIMARY KEY,
        category    TEXT NOT NULL,
        type        TEXT NOT NULL,
        joke        TEXT,
        setup       TEXT,
        delivery    TEXT,
        lang        TEXT NOT NULL,
        safe        INTEGER NOT NULL,
        explicit    INTEGER NOT NULL,
        nsfw        INTEGER NOT NULL,
        political   INTEGER NOT NULL,
        racist      INTEGER NOT NULL,
        religious   INTEGER NOT NULL,
        sexist      INTEGER NOT NULL
    );
";

const COLUMNS: &str = "id, category, type, joke, setup, delivery, lang, safe, \
                       explicit, nsfw, political, racist, religious, sexist";

/// Favorite jokes in a local SQLite database
///
/// One row per joke keyed by its id, with the six content flags flattened
/// into columns.
pub struct SqliteFavorites {
    conn: Mutex<Connection>,
}

impl SqliteFavorites {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let store = Self::init(Connection::open(path)?)?;
        info!("Favorites database opened at {}", path.display());
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, Error> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&Connection) -> Result<T, Error>,
    {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        f(&conn)
    }
}

impl FavoritesStore for SqliteFavorites {
    type Error = Error;

    fn insert(&self, joke: &Joke) -> Result<InsertOutcome, Error> {
        let (text, setup, delivery) = match &joke.payload {
            JokePayload::Single { text } => (Some(text.as_str()), None, None),
            JokePayload::TwoPart { setup, delivery } => {
                (None, Some(setup.as_str()), Some(delivery.as_str()))
            }
        };

        self.with_conn(|conn| {
            let changed = conn.execute(
                &format!(
                    "INSERT OR IGNORE INTO jokes ({COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
                ),
                rusqlite::params![
                    joke.id,
                    joke.category,
                    joke.joke_type().as_str(),
                    text,
                    setup,
                    delivery,
                    joke.lang,
                    joke.safe,
                    joke.flags.explicit,
                    joke.flags.nsfw,
                    joke.flags.political,
                    joke.flags.racist,
                    joke.flags.religious,
                    joke.flags.sexist,
                ],
            )?;

            Ok(if changed == 0 {
                InsertOutcome::AlreadyPresent
            } else {
                InsertOutcome::Inserted
            })
        })
    }

    fn delete(&self, id: JokeId) -> Result<DeleteOutcome, Error> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM jokes WHERE id = ?1", [id])?;
            Ok(if changed == 0 {
                DeleteOutcome::NotFound
            } else {
                DeleteOutcome::Removed
            })
        })
    }

    fn list_all(&self) -> Result<Vec<Joke>, Error> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM jokes ORDER BY id"))?;
            let rows = stmt.query_map([], row_to_joke)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    fn get(&self, id: JokeId) -> Result<Option<Joke>, Error> {
        self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {COLUMNS} FROM jokes WHERE id = ?1"),
                    [id],
                    row_to_joke,
                )
                .optional()?)
        })
    }
}

/// Rows go through the wire conversion so a missing payload column is
/// rejected instead of loaded as an empty joke.
fn row_to_joke(row: &Row) -> rusqlite::Result<Joke> {
    let joke_type: String = row.get(2)?;
    let joke_type = joke_type
        .parse::<JokeType>()
        .map_err(|e| FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let wire = WireJoke {
        id: row.get(0)?,
        category: row.get(1)?,
        joke_type,
        joke: row.get(3)?,
        setup: row.get(4)?,
        delivery: row.get(5)?,
        lang: row.get(6)?,
        safe: row.get(7)?,
        flags: Flags {
            explicit: row.get(8)?,
            nsfw: row.get(9)?,
            political: row.get(10)?,
            racist: row.get(11)?,
            religious: row.get(12)?,
            sexist: row.get(13)?,
        },
    };

    Joke::try_from(wire).map_err(|e| {
        let column = match e {
            JokeError::MissingPart {
                field: "delivery", ..
            } => 5,
            JokeError::MissingPart { .. } => 4,
            _ => 3,
        };
        FromSqlConversionFailure(column, Type::Null, Box::new(e))
    })
}
