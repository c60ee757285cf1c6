//! Deterministic codepoint assignment (made by FontLab https://www.fontlab.com/)
//!
//! Icons are numbered in (category, file name) order starting at a fixed
//! private-use base. The result depends only on the names in the icon tree,
//! never on modification times or the order the OS lists directories in.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::discovery::{CategoryDiscovery, IconDiscovery, IconSource, DEFAULT_EXTENSION};
use crate::error::{Result, TypiconError};

/// First codepoint handed out when no base is configured.
pub const DEFAULT_BASE: u32 = 0xF101;

const MAX_CODEPOINT: u32 = 0x10FFFF;

const PRIVATE_USE_AREAS: [(u32, u32); 3] = [
    (0xE000, 0xF8FF),
    (0xF0000, 0xFFFFD),
    (0x100000, 0x10FFFD),
];

/// What to do when two icons strip to the same identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Fail the run, naming both files.
    #[default]
    Reject,
    /// Keep the first entry's position but give it the later icon's codepoint.
    LastWins,
}

/// Identifier to codepoint mapping in assignment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CodepointMap {
    entries: IndexMap<String, u32>,
    #[serde(skip)]
    base: u32,
}

impl CodepointMap {
    /// Number icons in the order given, starting at `base`.
    pub fn from_icons(icons: &[IconSource], base: u32, policy: CollisionPolicy) -> Result<Self> {
        if !is_private_use(base) {
            warn!("codepoint base U+{base:04X} is outside the private use areas");
        }

        let mut entries: IndexMap<String, u32> = IndexMap::with_capacity(icons.len());
        let mut owners: HashMap<&str, &str> = HashMap::with_capacity(icons.len());
        let mut next = base;

        for (count, icon) in icons.iter().enumerate() {
            if next > MAX_CODEPOINT {
                return Err(TypiconError::CodepointOverflow {
                    identifier: icon.identifier.clone(),
                    base,
                    count: count + 1,
                });
            }

            if let Some(first) = owners.insert(&icon.identifier, &icon.relative) {
                match policy {
                    CollisionPolicy::Reject => {
                        return Err(TypiconError::DuplicateIdentifier {
                            identifier: icon.identifier.clone(),
                            first: first.to_string(),
                            second: icon.relative.clone(),
                        });
                    }
                    CollisionPolicy::LastWins => {
                        warn!(
                            "{} overrides {first} for identifier {:?}",
                            icon.relative, icon.identifier
                        );
                    }
                }
            }

            entries.insert(icon.identifier.clone(), next);
            next += 1;
        }

        debug!(
            "assigned {} codepoints starting at U+{base:04X}",
            entries.len()
        );
        Ok(Self { entries, base })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn get(&self, identifier: &str) -> Option<u32> {
        self.entries.get(identifier).copied()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries.iter().map(|(id, cp)| (id.as_str(), *cp))
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }
}

/// Codepoint assignment settings.
#[derive(Debug, Clone)]
pub struct Assigner {
    pub base: u32,
    pub extension: String,
    pub collisions: CollisionPolicy,
    pub follow_symlinks: bool,
}

impl Default for Assigner {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            extension: DEFAULT_EXTENSION.to_string(),
            collisions: CollisionPolicy::default(),
            follow_symlinks: true,
        }
    }
}

impl Assigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discovery(&self, root: &Path) -> CategoryDiscovery {
        CategoryDiscovery::new(root)
            .extension(&self.extension)
            .follow_symlinks(self.follow_symlinks)
    }

    /// Discover icons under `root` and number them.
    pub fn assign(&self, root: &Path) -> Result<CodepointMap> {
        let icons = self.discovery(root).discover()?;
        CodepointMap::from_icons(&icons, self.base, self.collisions)
    }
}

/// Assign codepoints to every `<root>/<category>/<name>.svg` with the defaults.
pub fn assign_codepoints(root: impl AsRef<Path>) -> Result<CodepointMap> {
    Assigner::default().assign(root.as_ref())
}

/// Whether `cp` lies in one of the Unicode private use areas.
pub fn is_private_use(cp: u32) -> bool {
    PRIVATE_USE_AREAS
        .iter()
        .any(|(lo, hi)| (*lo..=*hi).contains(&cp))
}
