//! Discovery of per-company export directories.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory names under the problems root that never hold a company export.
const SKIPPED_DIRS: &[&str] = &["src", "node_modules", "target"];

/// A company export directory and the display name derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDir {
    pub slug: String,
    pub display_name: String,
    pub path: PathBuf,
}

/// Turns a directory slug into a display name.
///
/// Splits on `-` and `_`, uppercases the first character of each piece and
/// joins with single spaces. Repeated delimiters leave an empty piece, which
/// shows up as a double space.
pub fn format_company_name(slug: &str) -> String {
    slug.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_skipped(name: &str) -> bool {
    name.starts_with('.') || SKIPPED_DIRS.contains(&name)
}

/// Lists company directories under `root`, sorted by display name and then
/// by slug so later first-seen-wins decisions do not depend on the
/// filesystem's enumeration order.
pub fn scan_company_dirs(root: &Path) -> Result<Vec<CompanyDir>> {
    let mut dirs = Vec::new();

    let entries =
        fs::read_dir(root).with_context(|| format!("reading problems dir {}", root.display()))?;

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let Some(slug) = entry.file_name().to_str().map(str::to_string) else {
            debug!(path = %entry.path().display(), "Skipping non UTF-8 directory name");
            continue;
        };
        if is_skipped(&slug) {
            debug!(dir = %slug, "Skipping excluded directory");
            continue;
        }

        dirs.push(CompanyDir {
            display_name: format_company_name(&slug),
            path: entry.path(),
            slug,
        });
    }

    dirs.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.slug.cmp(&b.slug))
    });

    Ok(dirs)
}
