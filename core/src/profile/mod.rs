//! Firefox profile discovery.
//!
//! Probes candidate roots under the home directory for `profiles.ini`,
//! then resolves the selected profile's `places.sqlite`.

mod registry;

pub use registry::Registry;

use std::path::{Path, PathBuf};

use tracing::{Span, debug, error};

use crate::config::split_profile_paths;
use crate::error::{Error, Result};

pub const REGISTRY_FILE: &str = "profiles.ini";
pub const PLACES_FILE: &str = "places.sqlite";

/// Section read when no other profile selection is configured
const FIRST_PROFILE_SECTION: &str = "Profile0";

/// Which registry entry supplies the profile directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileSelection {
    /// Always `[Profile0]`
    #[default]
    First,
    /// The profile Firefox marks as default, falling back to `[Profile0]`
    Default,
}

/// Resolves the history database of a Firefox profile
#[derive(Debug, Clone)]
pub struct ProfileLocator {
    home: PathBuf,
    selection: ProfileSelection,
    span: Span,
}

impl ProfileLocator {
    /// Create a locator rooted at `home`. Events are recorded inside `span`.
    pub fn new(home: impl Into<PathBuf>, span: Span) -> Self {
        Self {
            home: home.into(),
            selection: ProfileSelection::default(),
            span,
        }
    }

    /// Create a locator rooted at the current user's home directory
    pub fn from_home_dir(span: Span) -> Result<Self> {
        let base = directories::BaseDirs::new().ok_or(Error::HomeDirNotFound)?;
        Ok(Self::new(base.home_dir(), span))
    }

    pub fn with_selection(mut self, selection: ProfileSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Find the first candidate root holding a profile registry.
    ///
    /// Candidates are tried in order and the first match wins.
    pub fn find_firefox_root(&self, search_paths: &str) -> Result<PathBuf> {
        let _enter = self.span.enter();
        let mut searched = Vec::new();

        for fragment in split_profile_paths(search_paths) {
            let candidate = self.home.join(fragment);
            debug!("Checking path: {}", candidate.display());
            if candidate.join(REGISTRY_FILE).exists() {
                return Ok(candidate);
            }
            searched.push(candidate);
        }

        Err(Error::ProfilesNotFound { searched })
    }

    /// Resolve the path of `places.sqlite`.
    ///
    /// Fails when no candidate holds `profiles.ini` or the registry lacks the
    /// profile entry. A registry pointing at a missing database is logged and
    /// yields `Ok(None)`.
    pub fn locate(&self, search_paths: &str) -> Result<Option<PathBuf>> {
        let firefox_root = self.find_firefox_root(search_paths)?;
        let _enter = self.span.enter();

        let registry_path = firefox_root.join(REGISTRY_FILE);
        debug!("Config path {}", registry_path.display());
        let registry = Registry::read(&registry_path)?;

        let profile_dir = self.profile_dir(&registry).ok_or_else(|| Error::ProfileEntry {
            registry: registry_path.clone(),
            section: FIRST_PROFILE_SECTION.to_string(),
        })?;

        // An absolute Path (IsRelative=0) replaces the root on join
        let places = firefox_root.join(profile_dir).join(PLACES_FILE);
        debug!("Sql path {}", places.display());

        if !places.exists() {
            error!("Firefox places.sqlite not found at {}", places.display());
            return Ok(None);
        }

        Ok(Some(places))
    }

    fn profile_dir<'a>(&self, registry: &'a Registry) -> Option<&'a str> {
        let first = || registry.get(FIRST_PROFILE_SECTION, "Path");
        match self.selection {
            ProfileSelection::First => first(),
            ProfileSelection::Default => registry.default_profile_path().or_else(first),
        }
    }
}
