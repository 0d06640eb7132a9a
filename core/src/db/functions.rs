//! SQL functions registered on every history connection.

use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

/// Name under which [`hostname`] is callable from SQL
pub const HOSTNAME_FN: &str = "hostname";

const UNKNOWN_HOST: &str = "Unknown";

/// Third `/`-delimited component of a URL, or `"Unknown"` when there is none.
///
/// `https://example.com/a` yields `example.com`; `about:config` yields
/// `Unknown`. Ports and credentials are kept as part of the component.
pub fn hostname(url: &str) -> &str {
    url.split('/').nth(2).unwrap_or(UNKNOWN_HOST)
}

/// Register `hostname(url)` on a connection
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        HOSTNAME_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let url = ctx.get::<Option<String>>(0)?;
            Ok(url
                .as_deref()
                .map(hostname)
                .unwrap_or(UNKNOWN_HOST)
                .to_string())
        },
    )
}
