//! Icon discovery helpers for typicon-core (made by FontLab https://www.fontlab.com/)

use std::io;
use std::path::{Component, Path, PathBuf};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, TypiconError};

/// Extension used for icon definition files unless configured otherwise.
pub const DEFAULT_EXTENSION: &str = "svg";

/// One icon definition file inside a category directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSource {
    pub category: String,
    pub identifier: String,
    pub path: PathBuf,
    /// `<category>/<file name>`, always with forward slashes.
    pub relative: String,
}

/// Trait for enumerating icons from some backing store.
///
/// Implementations must return icons in their final assignment order.
pub trait IconDiscovery {
    fn discover(&self) -> Result<Vec<IconSource>>;
}

/// Lists `<root>/<category>/<icon>.<ext>` in (category, file name) order.
///
/// Only the first two levels are inspected: loose files directly under the
/// root and directories nested inside a category are skipped. Symlinked
/// categories and icons are followed unless disabled.
#[derive(Debug, Clone)]
pub struct CategoryDiscovery {
    root: PathBuf,
    extension: String,
    follow_symlinks: bool,
}

impl CategoryDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            follow_symlinks: true,
        }
    }

    /// Set the icon file extension, with or without the leading dot.
    pub fn extension(mut self, ext: impl AsRef<str>) -> Self {
        self.extension = ext.as_ref().trim_start_matches('.').to_string();
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn matches_extension(&self, entry: &DirEntry) -> bool {
        let suffix = format!(".{}", self.extension);
        entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(suffix.as_bytes())
    }

    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_symlinks)
            .into_iter()
            .map(|entry| entry.map_err(|err| walk_error(err, dir)))
            .collect()
    }

    fn categories(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut categories = Vec::new();

        for entry in self.list(&self.root)? {
            if !entry.file_type().is_dir() {
                debug!("skipping non-category entry {}", entry.path().display());
                continue;
            }
            categories.push((utf8_name(&entry)?, entry.into_path()));
        }

        categories.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(categories)
    }

    fn icons_in(&self, category: &str, dir: &Path) -> Result<Vec<IconSource>> {
        let mut icons = Vec::new();

        for entry in self.list(dir)? {
            if !entry.file_type().is_file() || !self.matches_extension(&entry) {
                continue;
            }
            let file_name = utf8_name(&entry)?;
            let identifier = match icon_identifier(&file_name, &self.extension) {
                Some(id) => id.to_string(),
                None => {
                    if has_extension(&file_name, &self.extension) {
                        warn!("skipping icon with empty name: {}", entry.path().display());
                    }
                    continue;
                }
            };

            icons.push(IconSource {
                category: category.to_string(),
                identifier,
                relative: format!("{category}/{file_name}"),
                path: entry.into_path(),
            });
        }

        icons.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(icons)
    }
}

impl IconDiscovery for CategoryDiscovery {
    fn discover(&self) -> Result<Vec<IconSource>> {
        if !self.root.exists() {
            return Err(TypiconError::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(TypiconError::io(
                &self.root,
                io::Error::other("icon root is not a directory"),
            ));
        }

        let mut found = Vec::new();
        for (category, dir) in self.categories()? {
            let icons = self.icons_in(&category, &dir)?;
            debug!("category {category}: {} icons", icons.len());
            found.extend(icons);
        }

        for icon in &found {
            trace!("discovered {}", icon.relative);
        }

        Ok(found)
    }
}

/// Derive an icon identifier by stripping exactly one trailing `.<ext>`.
///
/// Returns `None` when the name has a different extension or nothing is
/// left after stripping.
pub fn icon_identifier<'a>(file_name: &'a str, ext: &str) -> Option<&'a str> {
    let stem = file_name.strip_suffix(ext)?.strip_suffix('.')?;
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// Render a path with `/` separators regardless of host platform.
///
/// Fails with [`TypiconError::NonUtf8Name`] rather than substituting
/// replacement characters.
pub fn normalize_separators(path: &Path) -> Result<String> {
    let mut out = String::new();

    for component in path.components() {
        let text = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| TypiconError::NonUtf8Name(path.to_path_buf()))?;
        match component {
            Component::Prefix(_) => out.push_str(&text.replace('\\', "/")),
            Component::RootDir => out.push('/'),
            _ => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(text);
            }
        }
    }

    Ok(out)
}

fn has_extension(file_name: &str, ext: &str) -> bool {
    file_name
        .strip_suffix(ext)
        .is_some_and(|rest| rest.ends_with('.'))
}

fn utf8_name(entry: &DirEntry) -> Result<String> {
    entry
        .file_name()
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| TypiconError::NonUtf8Name(entry.path().to_path_buf()))
}

fn walk_error(err: walkdir::Error, dir: &Path) -> TypiconError {
    if err.io_error().is_none() {
        return TypiconError::Walk(err);
    }
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());
    match err.into_io_error() {
        Some(source) => TypiconError::io(path, source),
        None => TypiconError::io(path, io::Error::other("walk failed")),
    }
}
