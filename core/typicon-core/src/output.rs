//! Streaming output helpers (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::codepoints::CodepointMap;

#[derive(Serialize)]
struct Entry<'a> {
    identifier: &'a str,
    codepoint: u32,
    hex: String,
}

/// Write the mapping as one prettified JSON object in assignment order.
pub fn write_json_pretty(map: &CodepointMap, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(map)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write one `{identifier, codepoint, hex}` object per line (NDJSON).
pub fn write_ndjson(map: &CodepointMap, mut w: impl Write) -> Result<()> {
    for (identifier, codepoint) in map.iter() {
        let line = serde_json::to_string(&Entry {
            identifier,
            codepoint,
            hex: format!("U+{codepoint:04X}"),
        })?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Write `identifier<TAB>U+XXXX<TAB>decimal` lines.
pub fn write_plain(map: &CodepointMap, mut w: impl Write) -> Result<()> {
    for (identifier, codepoint) in map.iter() {
        writeln!(w, "{identifier}\tU+{codepoint:04X}\t{codepoint}")?;
    }
    Ok(())
}

/// Write the mapping to `path`, creating parent directories as needed.
pub fn write_manifest(map: &CodepointMap, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let file =
        fs::File::create(path).with_context(|| format!("creating manifest {}", path.display()))?;
    write_json_pretty(map, file).with_context(|| format!("writing manifest {}", path.display()))
}
