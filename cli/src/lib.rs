//! typicon CLI (made by FontLab https://www.fontlab.com/)

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{debug, info, warn};

use typicon_core::codepoints::{Assigner, CodepointMap, CollisionPolicy, DEFAULT_BASE};
use typicon_core::config::{AssetType, BuildConfig, FontType};
use typicon_core::discovery::{IconDiscovery, DEFAULT_EXTENSION};
use typicon_core::generator::{CommandGenerator, FontGenerator, GenerationRequest};
use typicon_core::output::{write_json_pretty, write_manifest, write_ndjson, write_plain};

/// CLI entrypoint for typicon.
#[derive(Debug, Parser)]
#[command(
    name = "typicon",
    version,
    about = "Deterministic icon-font builds (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the codepoint assigned to every icon
    Codepoints(CodepointsArgs),
    /// Assign codepoints and run the font generator
    Build(BuildArgs),
}

#[derive(Debug, Args)]
struct CodepointsArgs {
    /// Icon root containing one directory per category
    #[arg(value_hint = ValueHint::DirPath)]
    root: PathBuf,

    /// First codepoint (decimal, 0x… or U+…)
    #[arg(long = "base", value_parser = parse_codepoint, default_value_t = DEFAULT_BASE)]
    base: u32,

    /// Icon file extension
    #[arg(long = "ext", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Let later icons override earlier ones with the same identifier
    #[arg(long = "allow-duplicates", action = ArgAction::SetTrue)]
    allow_duplicates: bool,

    /// Skip symlinked categories and icons instead of following them
    #[arg(long = "no-follow-symlinks", action = ArgAction::SetTrue)]
    no_follow_symlinks: bool,

    /// Emit a single JSON object
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// JSON build config; flags override its values
    #[arg(short = 'c', long = "config", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Icon root containing one directory per category
    #[arg(short = 'i', long = "input", value_hint = ValueHint::DirPath)]
    input: Option<PathBuf>,

    /// Directory receiving fonts, stylesheet and manifest
    #[arg(short = 'o', long = "output", value_hint = ValueHint::DirPath)]
    output: Option<PathBuf>,

    /// Base name of the generated files
    #[arg(short = 'n', long = "name")]
    name: Option<String>,

    /// Glyph class prefix used by the stylesheet
    #[arg(short = 'p', long = "prefix")]
    prefix: Option<String>,

    /// Target font height
    #[arg(long = "font-height")]
    font_height: Option<u32>,

    /// Font formats to produce (eot,woff2,woff,ttf,svg)
    #[arg(long = "font-types", value_delimiter = ',')]
    font_types: Vec<FontType>,

    /// Auxiliary assets to produce (css,scss,sass,html,json,ts)
    #[arg(long = "asset-types", value_delimiter = ',')]
    asset_types: Vec<AssetType>,

    /// Template for an asset type, e.g. css=./scripts/css.hbs
    #[arg(long = "template", value_parser = parse_template)]
    templates: Vec<(AssetType, PathBuf)>,

    /// First codepoint (decimal, 0x… or U+…)
    #[arg(long = "base", value_parser = parse_codepoint)]
    base: Option<u32>,

    /// Icon file extension
    #[arg(long = "ext")]
    extension: Option<String>,

    /// Let later icons override earlier ones with the same identifier
    #[arg(long = "allow-duplicates", action = ArgAction::SetTrue)]
    allow_duplicates: bool,

    /// Skip symlinked categories and icons instead of following them
    #[arg(long = "no-follow-symlinks", action = ArgAction::SetTrue)]
    no_follow_symlinks: bool,

    /// Generator program, called with the request file as last argument
    #[arg(short = 'g', long = "generator", value_hint = ValueHint::CommandName)]
    generator: Option<String>,

    /// Extra argument passed to the generator before the request file
    #[arg(long = "generator-arg", allow_hyphen_values = true)]
    generator_args: Vec<String>,

    /// Print the generation request instead of running the generator
    #[arg(long = "dry-run", action = ArgAction::SetTrue, conflicts_with = "manifest")]
    dry_run: bool,

    /// Also write <output>/<name>.codepoints.json once the fonts are built
    #[arg(long = "manifest", action = ArgAction::SetTrue)]
    manifest: bool,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Codepoints(args) => run_codepoints(args),
        Command::Build(args) => run_build(args),
    }
}

fn run_codepoints(args: CodepointsArgs) -> Result<()> {
    let assigner = Assigner {
        base: args.base,
        extension: args.extension.clone(),
        collisions: collision_policy(args.allow_duplicates),
        follow_symlinks: !args.no_follow_symlinks,
    };
    let map = assigner
        .assign(&args.root)
        .with_context(|| format!("assigning codepoints under {}", args.root.display()))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.ndjson {
        write_ndjson(&map, &mut handle)?;
    } else if args.json {
        write_json_pretty(&map, &mut handle)?;
    } else {
        write_plain(&map, &mut handle)?;
    }

    Ok(())
}

fn run_build(args: BuildArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    config.validate()?;

    let assigner = config.assigner();
    let icons = assigner
        .discovery(&config.input_dir)
        .discover()
        .with_context(|| format!("discovering icons in {}", config.input_dir.display()))?;
    let map = CodepointMap::from_icons(&icons, assigner.base, assigner.collisions)?;
    log_range(&map);

    let request = GenerationRequest::new(&config, map, &icons)?;

    if args.dry_run {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, &request)?;
        writeln!(handle)?;
        return Ok(());
    }

    let generator = CommandGenerator::new(&config.generator).args(&config.generator_args);
    generator
        .generate(&request)
        .context("font generation failed")?;

    for path in request.expected_outputs() {
        if path.exists() {
            debug!("generated {}", path.display());
        } else {
            warn!("generator did not produce {}", path.display());
        }
    }

    if args.manifest {
        let manifest = config.manifest_path();
        write_manifest(&request.codepoints, &manifest)?;
        info!("wrote {}", manifest.display());
    }

    info!("Done!");
    Ok(())
}

fn resolve_config(args: &BuildArgs) -> Result<BuildConfig> {
    let mut config = match &args.config {
        Some(path) => BuildConfig::from_json_file(path)?,
        None => BuildConfig::default(),
    };

    if let Some(input) = &args.input {
        config.input_dir = input.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(name) = &args.name {
        config.name = name.clone();
    }
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(height) = args.font_height {
        config.font_height = height;
    }
    if !args.font_types.is_empty() {
        config.font_types = dedup_in_order(&args.font_types);
    }
    if !args.asset_types.is_empty() {
        config.asset_types = dedup_in_order(&args.asset_types);
        config
            .templates
            .retain(|asset, _| args.asset_types.contains(asset));
    }
    for (asset, path) in &args.templates {
        config.templates.insert(*asset, path.clone());
    }
    if let Some(base) = args.base {
        config.codepoint_base = base;
    }
    if let Some(ext) = &args.extension {
        config.extension = ext.clone();
    }
    if args.allow_duplicates {
        config.collisions = CollisionPolicy::LastWins;
    }
    if args.no_follow_symlinks {
        config.follow_symlinks = false;
    }
    if let Some(generator) = &args.generator {
        config.generator = generator.clone();
    }
    if !args.generator_args.is_empty() {
        config.generator_args = args.generator_args.clone();
    }

    Ok(config)
}

fn collision_policy(allow_duplicates: bool) -> CollisionPolicy {
    if allow_duplicates {
        CollisionPolicy::LastWins
    } else {
        CollisionPolicy::Reject
    }
}

fn dedup_in_order<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}

fn log_range(map: &CodepointMap) {
    match map.iter().map(|(_, cp)| cp).max() {
        Some(last) => info!(
            "assigned {} codepoints U+{:04X}..U+{last:04X}",
            map.len(),
            map.base()
        ),
        None => warn!("no icons found; the font will be empty"),
    }
}

fn parse_codepoint(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix("U+"))
        .or_else(|| trimmed.strip_prefix("u+"));

    let value = match hex {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => trimmed.parse::<u32>(),
    }
    .with_context(|| format!("invalid codepoint: {raw}"))?;

    if value > 0x10FFFF {
        return Err(anyhow!("codepoint {raw} is beyond U+10FFFF"));
    }
    Ok(value)
}

fn parse_template(raw: &str) -> Result<(AssetType, PathBuf)> {
    let (asset, path) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected <asset>=<path>, got {raw}"))?;
    let asset: AssetType = asset.parse().map_err(|e: String| anyhow!(e))?;
    if path.is_empty() {
        return Err(anyhow!("template path for {asset} is empty"));
    }
    Ok((asset, PathBuf::from(path)))
}
