//! Minimal `moz_places` layout for fixtures.

/// The columns of Firefox's `moz_places` that searches read, plus the ones
/// that make fixtures look like a real profile.
pub const MOZ_PLACES: &str = r#"
CREATE TABLE IF NOT EXISTS moz_places (
    id INTEGER PRIMARY KEY,
    url LONGVARCHAR,
    title LONGVARCHAR,
    rev_host LONGVARCHAR,
    visit_count INTEGER DEFAULT 0,
    hidden INTEGER DEFAULT 0 NOT NULL,
    typed INTEGER DEFAULT 0 NOT NULL,
    frecency INTEGER DEFAULT -1 NOT NULL,
    last_visit_date INTEGER,
    guid TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS moz_places_url_uniqueindex ON moz_places (url);
CREATE INDEX IF NOT EXISTS moz_places_frecencyindex ON moz_places (frecency);
CREATE INDEX IF NOT EXISTS moz_places_lastvisitdateindex ON moz_places (last_visit_date);
"#;

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    #[test]
    fn test_schema_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(MOZ_PLACES).unwrap();

        let columns: Vec<String> = conn
            .prepare("SELECT name FROM pragma_table_info('moz_places')")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        for required in ["url", "title", "frecency", "visit_count", "last_visit_date"] {
            assert!(columns.contains(&required.to_string()), "missing {required}");
        }
    }
}
