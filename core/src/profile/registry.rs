//! Reader for Firefox's `profiles.ini`.
//!
//! Sections are matched case-sensitively and keys case-insensitively.
//! Lines starting with `;` or `#` are comments; both `key=value` and
//! `key: value` are accepted.

use std::path::Path;

use crate::error::Result;

/// A parsed profile registry
#[derive(Debug, Clone, Default)]
pub struct Registry {
    sections: Vec<Section>,
}

#[derive(Debug, Clone)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Registry {
    /// Read and parse a registry file
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse registry text. Malformed lines are skipped.
    pub fn parse(content: &str) -> Self {
        let mut sections: Vec<Section> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.push(Section {
                    name: name.trim().to_string(),
                    entries: Vec::new(),
                });
                continue;
            }

            // Entries before the first section header have nowhere to go
            let Some(section) = sections.last_mut() else {
                continue;
            };

            if let Some((key, value)) = line.split_once(['=', ':']) {
                section
                    .entries
                    .push((key.trim().to_lowercase(), value.trim().to_string()));
            }
        }

        Self { sections }
    }

    /// Look up `key` in `section`. Later duplicates win.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.sections
            .iter()
            .filter(|s| s.name == section)
            .flat_map(|s| s.entries.iter())
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .last()
    }

    /// Names of all sections, in file order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Resolve the profile directory Firefox treats as default.
    ///
    /// An `[Install...]` section's `Default` path wins, then the first
    /// `[Profile...]` section flagged `Default=1`.
    pub fn default_profile_path(&self) -> Option<&str> {
        let install_default = self
            .section_names()
            .filter(|name| name.starts_with("Install"))
            .find_map(|name| self.get(name, "Default"));
        if install_default.is_some() {
            return install_default;
        }

        self.section_names()
            .filter(|name| name.starts_with("Profile"))
            .find(|name| self.get(name, "Default") == Some("1"))
            .and_then(|name| self.get(name, "Path"))
    }
}
