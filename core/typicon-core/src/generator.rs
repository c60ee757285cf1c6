//! Hand-off to the external font generator (made by FontLab https://www.fontlab.com/)

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::codepoints::CodepointMap;
use crate::config::{AssetType, BuildConfig, FontType};
use crate::discovery::{normalize_separators, IconSource};

/// Options for one generator run, in the generator's own vocabulary.
///
/// `codepoints` replaces the generator's own assignment and `files` replaces
/// its directory listing: every icon path, slash-separated and sorted as a
/// whole string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub input_dir: String,
    pub output_dir: String,
    pub name: String,
    pub font_types: Vec<FontType>,
    pub asset_types: Vec<AssetType>,
    pub prefix: String,
    pub font_height: u32,
    pub codepoints: CodepointMap,
    pub templates: BTreeMap<AssetType, String>,
    pub get_icon_id: IconIdRule,
    pub files: Vec<String>,
}

/// How the generator derives an icon identifier from a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconIdRule {
    /// File name without its extension, ignoring the category directory.
    #[default]
    Basename,
}

impl GenerationRequest {
    /// Fails if any path handed to the generator is not valid UTF-8.
    pub fn new(
        config: &BuildConfig,
        codepoints: CodepointMap,
        icons: &[IconSource],
    ) -> crate::error::Result<Self> {
        let templates = config
            .templates
            .iter()
            .map(|(asset, path)| normalize_separators(path).map(|p| (*asset, p)))
            .collect::<crate::error::Result<BTreeMap<_, _>>>()?;

        let mut files = icons
            .iter()
            .map(|icon| normalize_separators(&icon.path))
            .collect::<crate::error::Result<Vec<_>>>()?;
        // The generator lists files by full path string, not by category.
        files.sort();

        Ok(Self {
            input_dir: normalize_separators(&config.input_dir)?,
            output_dir: normalize_separators(&config.output_dir)?,
            name: config.name.clone(),
            font_types: config.font_types.clone(),
            asset_types: config.asset_types.clone(),
            prefix: config.prefix.clone(),
            font_height: config.font_height,
            codepoints,
            templates,
            get_icon_id: IconIdRule::Basename,
            files,
        })
    }

    /// One file per font type and one per asset type.
    pub fn expected_outputs(&self) -> Vec<PathBuf> {
        let dir = PathBuf::from(&self.output_dir);
        let fonts = self.font_types.iter().map(|t| t.extension());
        let assets = self.asset_types.iter().map(|t| t.extension());

        fonts
            .chain(assets)
            .map(|ext| dir.join(format!("{}.{ext}", self.name)))
            .collect()
    }
}

/// The font generation collaborator.
pub trait FontGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<()>;
}

/// Runs `program [args...] <request.json>` once per build.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl FontGenerator for CommandGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<()> {
        let program = self.program.to_string_lossy().into_owned();

        let mut file = tempfile::Builder::new()
            .prefix("typicon-request-")
            .suffix(".json")
            .tempfile()
            .context("creating generation request file")?;
        serde_json::to_writer_pretty(&mut file, request)?;
        file.flush()?;
        debug!("generation request written to {}", file.path().display());

        info!(
            "running {program} for {} glyphs ({} font types)",
            request.codepoints.len(),
            request.font_types.len()
        );
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(file.path())
            .output()
            .with_context(|| format!("failed to start generator {program}"))?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!("{program}: {line}");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "generator {program} failed ({}): {}",
                output.status,
                stderr.trim()
            );
        }

        Ok(())
    }
}
