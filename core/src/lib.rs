//! Keyword search over a Firefox profile's browsing history.
//!
//! [`ProfileLocator`] finds `places.sqlite` through `profiles.ini`, and
//! [`HistoryEngine`] searches a private copy of it.

pub mod config;
pub mod db;
pub mod error;
pub mod profile;

pub use config::{Order, SearchConfig};
pub use db::{EngineState, HistoryEngine, HistoryRow};
pub use error::{Error, Result};
pub use profile::{ProfileLocator, ProfileSelection};
