//! Build configuration (made by FontLab https://www.fontlab.com/)

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codepoints::{Assigner, CollisionPolicy, DEFAULT_BASE};
use crate::discovery::DEFAULT_EXTENSION;
use crate::error::{Result, TypiconError};

/// Program invoked with the generation request when none is configured.
pub const DEFAULT_GENERATOR: &str = "fantasticon-request";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    Eot,
    Woff2,
    Woff,
    Ttf,
    Svg,
}

impl FontType {
    pub const ALL: [FontType; 5] = [
        FontType::Eot,
        FontType::Woff2,
        FontType::Woff,
        FontType::Ttf,
        FontType::Svg,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            FontType::Eot => "eot",
            FontType::Woff2 => "woff2",
            FontType::Woff => "woff",
            FontType::Ttf => "ttf",
            FontType::Svg => "svg",
        }
    }
}

impl FromStr for FontType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FontType::ALL
            .into_iter()
            .find(|t| t.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown font type {s:?}"))
    }
}

impl fmt::Display for FontType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Css,
    Scss,
    Sass,
    Html,
    Json,
    Ts,
}

impl AssetType {
    pub const ALL: [AssetType; 6] = [
        AssetType::Css,
        AssetType::Scss,
        AssetType::Sass,
        AssetType::Html,
        AssetType::Json,
        AssetType::Ts,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            AssetType::Css => "css",
            AssetType::Scss => "scss",
            AssetType::Sass => "sass",
            AssetType::Html => "html",
            AssetType::Json => "json",
            AssetType::Ts => "ts",
        }
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AssetType::ALL
            .into_iter()
            .find(|t| t.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown asset type {s:?}"))
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Everything one font build needs. Missing JSON fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub name: String,
    pub font_types: Vec<FontType>,
    pub asset_types: Vec<AssetType>,
    pub prefix: String,
    pub font_height: u32,
    pub codepoint_base: u32,
    pub extension: String,
    pub templates: BTreeMap<AssetType, PathBuf>,
    pub collisions: CollisionPolicy,
    pub follow_symlinks: bool,
    pub generator: String,
    pub generator_args: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(AssetType::Css, PathBuf::from("./scripts/css.hbs"));

        Self {
            input_dir: PathBuf::from("./icons/SVG"),
            output_dir: PathBuf::from("./fonts"),
            name: "iconfont".to_string(),
            font_types: FontType::ALL.to_vec(),
            asset_types: vec![AssetType::Css],
            prefix: "hn".to_string(),
            font_height: 24,
            codepoint_base: DEFAULT_BASE,
            extension: DEFAULT_EXTENSION.to_string(),
            templates,
            collisions: CollisionPolicy::default(),
            follow_symlinks: true,
            generator: DEFAULT_GENERATOR.to_string(),
            generator_args: Vec::new(),
        }
    }
}

impl BuildConfig {
    /// Load a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| TypiconError::io(path, source))?;
        Self::from_json_str(&raw).map_err(|err| match err {
            TypiconError::Config { source, .. } => TypiconError::Config {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| TypiconError::Config {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.font_types.is_empty() {
            return Err(invalid("at least one font type is required"));
        }
        if self.font_height == 0 {
            return Err(invalid("font height must be positive"));
        }
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(invalid("icon extension must not be empty"));
        }
        if self.generator.trim().is_empty() {
            return Err(invalid("generator program must not be empty"));
        }
        for asset in self.templates.keys() {
            if !self.asset_types.contains(asset) {
                return Err(invalid(format!(
                    "template given for {asset} but {asset} is not a requested asset type"
                )));
            }
        }
        Ok(())
    }

    pub fn assigner(&self) -> Assigner {
        Assigner {
            base: self.codepoint_base,
            extension: self.extension.trim_start_matches('.').to_string(),
            collisions: self.collisions,
            follow_symlinks: self.follow_symlinks,
        }
    }

    /// Where the codepoint manifest for this build is written.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.codepoints.json", self.name))
    }
}

fn invalid(msg: impl Into<String>) -> TypiconError {
    TypiconError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_build() {
        let config = BuildConfig::default();
        assert_eq!(config.name, "iconfont");
        assert_eq!(config.prefix, "hn");
        assert_eq!(config.font_height, 24);
        assert_eq!(config.codepoint_base, 0xF101);
        assert!(config.follow_symlinks);
        assert_eq!(
            config.font_types,
            vec![
                FontType::Eot,
                FontType::Woff2,
                FontType::Woff,
                FontType::Ttf,
                FontType::Svg
            ]
        );
        assert_eq!(
            config.templates.get(&AssetType::Css),
            Some(&PathBuf::from("./scripts/css.hbs"))
        );
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BuildConfig::from_json_str(
            r#"{ "name": "glyphs", "fontTypes": ["woff2"], "collisions": "last-wins" }"#,
        )
        .expect("parse");

        assert_eq!(config.name, "glyphs");
        assert_eq!(config.font_types, vec![FontType::Woff2]);
        assert_eq!(config.collisions, CollisionPolicy::LastWins);
        assert_eq!(config.prefix, "hn");
    }

    #[test]
    fn rejects_unknown_font_type() {
        let err = BuildConfig::from_json_str(r#"{ "fontTypes": ["otf"] }"#).expect_err("otf");
        assert!(matches!(err, TypiconError::Config { .. }));
    }

    #[test]
    fn template_requires_matching_asset_type() {
        let mut config = BuildConfig::default();
        config
            .templates
            .insert(AssetType::Html, PathBuf::from("html.hbs"));

        let err = config.validate().expect_err("html not requested");
        assert!(err.to_string().contains("html"));
    }

    #[test]
    fn parses_type_names() {
        assert_eq!("WOFF2".parse::<FontType>(), Ok(FontType::Woff2));
        assert_eq!("scss".parse::<AssetType>(), Ok(AssetType::Scss));
        assert!("otf".parse::<FontType>().is_err());
    }

    #[test]
    fn empty_font_types_are_invalid() {
        let config = BuildConfig {
            font_types: Vec::new(),
            ..BuildConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn manifest_sits_next_to_fonts() {
        let config = BuildConfig::default();
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("./fonts/iconfont.codepoints.json")
        );
    }
}
