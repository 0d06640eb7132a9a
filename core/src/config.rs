//! Search options supplied by the caller before connecting.

use std::fmt;

/// Comma-separated fragments, relative to the home directory, probed for
/// `profiles.ini` in order.
pub const DEFAULT_PROFILE_PATHS: &str = ".mozilla/firefox, \
    snap/firefox/common/.mozilla/firefox, \
    .var/app/org.mozilla.firefox/.mozilla/firefox, \
    Library/Application Support/Firefox";

pub const DEFAULT_LIMIT: i64 = 10;

/// Ranking criterion for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Firefox's frecency score
    Frecency,
    /// Number of visits
    Visit,
    /// Last visit timestamp
    Recent,
    /// URL (or hostname when aggregating), lexicographic
    #[default]
    Url,
}

impl Order {
    /// Map a configuration value onto an order. Unrecognised values fall
    /// back to [`Order::Url`] rather than failing.
    pub fn from_config(value: &str) -> Self {
        match value {
            "frecency" => Order::Frecency,
            "visit" => Order::Visit,
            "recent" => Order::Recent,
            _ => Order::Url,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Frecency => "frecency",
            Order::Visit => "visit",
            Order::Recent => "recent",
            Order::Url => "url",
        }
    }
}

impl From<&str> for Order {
    fn from(value: &str) -> Self {
        Self::from_config(value)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options read by [`crate::HistoryEngine`]. Values are used as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Collapse results to one row per hostname
    pub aggregate: bool,
    pub order: Order,
    /// Passed straight to SQL `LIMIT`; SQLite treats negatives as unbounded
    pub limit: i64,
    /// Comma-separated candidate profile roots, relative to the home directory
    pub profile_paths: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            aggregate: false,
            order: Order::Frecency,
            limit: DEFAULT_LIMIT,
            profile_paths: DEFAULT_PROFILE_PATHS.to_string(),
        }
    }
}

impl SearchConfig {
    /// Interpret the string form of the aggregate option: only `"true"`
    /// enables aggregation.
    pub fn aggregate_flag(value: &str) -> bool {
        value == "true"
    }
}

/// Split a comma-separated path list, trimming whitespace around each entry
pub fn split_profile_paths(csv: &str) -> Vec<&str> {
    csv.split(',').map(str::trim).collect()
}
