use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use lotolab_core::models::{DrawSet, RawDraw};

/// Accepted layouts: a bare list of draws, or a bundle with a `draws` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum DrawFile {
    List(Vec<RawDraw>),
    Bundle { draws: Vec<RawDraw> },
}

pub fn parse_draws(json: &str) -> Result<DrawSet> {
    let file: DrawFile =
        serde_json::from_str(json).context("Formato de sorteios não reconhecido")?;
    let records = match file {
        DrawFile::List(records) => records,
        DrawFile::Bundle { draws } => draws,
    };
    let set = DrawSet::from_raw(&records)?;
    Ok(set)
}

pub fn load_draws(path: &Path) -> Result<DrawSet> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossível abrir {:?}", path))?;
    parse_draws(&json).with_context(|| format!("Sorteios inválidos em {:?}", path))
}

/// Writes `draws` back in the list layout, oldest first.
pub fn write_draws(path: &Path, draws: &DrawSet) -> Result<()> {
    let json = serde_json::to_string_pretty(draws.chronological())?;
    std::fs::write(path, json).with_context(|| format!("Impossível gravar {:?}", path))?;
    Ok(())
}
