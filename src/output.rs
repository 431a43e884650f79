//! Fixture persistence.
//!
//! Writes the aggregates as compact JSON files consumed by the tracker UI.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::FixtureSet;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const COMPANIES_FILE: &str = "companies.json";
pub const TOP_COMPANIES_FILE: &str = "top-companies.json";
pub const TRENDING_FILE: &str = "trending.json";

/// Serializes `value` as compact JSON to `path`, replacing any existing file.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("serializing {}", path.display()))?;
    writer.flush()?;

    debug!(path = %path.display(), "Fixture written");
    Ok(())
}

/// Writes all four fixture files into `dir`, creating it if needed.
pub fn write_fixtures(dir: &Path, fixtures: &FixtureSet) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating output dir {}", dir.display()))?;

    write_json(&dir.join(QUESTIONS_FILE), &fixtures.questions)?;
    write_json(&dir.join(COMPANIES_FILE), &fixtures.companies)?;
    write_json(&dir.join(TOP_COMPANIES_FILE), &fixtures.top_companies)?;
    write_json(&dir.join(TRENDING_FILE), &fixtures.trending)?;

    Ok(())
}
