//! CSV parser for per-company question exports.
//!
//! Exports are read leniently: a missing or structurally broken file yields
//! no data instead of an error, rows without a numeric id are dropped and an
//! unparseable frequency becomes `0`.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::analyzers::types::{CompanyRow, Difficulty};

/// Row shape as it appears in the export, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    #[serde(rename = "ID")]
    id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
    #[serde(rename = "Difficulty")]
    difficulty: Option<String>,
    #[serde(rename = "Acceptance %")]
    acceptance: Option<String>,
    #[serde(rename = "Frequency %")]
    frequency: Option<String>,
}

impl RawRow {
    fn into_company_row(self) -> Option<CompanyRow> {
        let id = self.id.as_deref().and_then(parse_id)?;

        Some(CompanyRow {
            id,
            title: self.title.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            difficulty: self
                .difficulty
                .as_deref()
                .map(Difficulty::from)
                .unwrap_or_default(),
            acceptance: self.acceptance.unwrap_or_default(),
            frequency: parse_frequency(self.frequency.as_deref()),
        })
    }
}

fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Parses a frequency cell such as `"42.5"` or `"42.5%"`.
///
/// Returns `0.0` for absent, unparseable or non-finite values.
pub fn parse_frequency(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .map(|s| s.strip_suffix('%').unwrap_or(s).trim())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

/// Reads every valid row from a CSV source.
///
/// Any structural error fails the whole source; row-level problems are
/// handled by dropping or defaulting.
pub fn parse_rows<R: Read>(reader: R) -> csv::Result<Vec<CompanyRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.deserialize::<RawRow>() {
        match result?.into_company_row() {
            Some(row) => rows.push(row),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "Dropped rows without a numeric id");
    }

    Ok(rows)
}

/// Loads a company export from `path`.
///
/// Returns `Ok(None)` when the file does not exist or cannot be parsed as
/// CSV. Only failures to read an existing file are reported as errors.
/// Invalid UTF-8 is replaced with U+FFFD rather than failing the file.
pub fn parse_company_csv(path: &Path) -> Result<Option<Vec<CompanyRow>>> {
    if !path.exists() {
        debug!(path = %path.display(), "Export not found");
        return Ok(None);
    }

    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        debug!(path = %path.display(), "Export is not valid UTF-8, decoded lossily");
    }

    match parse_rows(text.as_bytes()) {
        Ok(rows) => {
            debug!(path = %path.display(), rows = rows.len(), "Parsed export");
            Ok(Some(rows))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping malformed export");
            Ok(None)
        }
    }
}

/// Case-insensitive set of curated top-company names.
#[derive(Debug, Default, Clone)]
pub struct TopCompanies {
    names: HashSet<String>,
}

impl TopCompanies {
    pub fn from_lines(raw: &str) -> Self {
        let names = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { names }
    }

    /// Loads the list from `path`, one name per line.
    ///
    /// A missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No top-company list, trending disabled");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading top-company list {}", path.display()))?;
        Ok(Self::from_lines(&raw))
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.names.contains(&display_name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "ID,Title,URL,Difficulty,Acceptance %,Frequency %\n";

    #[test]
    fn test_parse_rows_reads_all_columns() {
        let data = format!(
            "{HEADER}1,Two Sum,https://leetcode.com/problems/two-sum,Easy,55.1%,100.0\n"
        );
        let rows = parse_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, 1);
        assert_eq!(row.title, "Two Sum");
        assert_eq!(row.difficulty, Difficulty::Easy);
        assert_eq!(row.acceptance, "55.1%");
        assert_eq!(row.frequency, 100.0);
    }

    #[test]
    fn test_non_numeric_id_is_dropped() {
        let data = format!("{HEADER}abc,Bad,u,Easy,1%,10\n2,Good,u,Hard,2%,20\n");
        let rows = parse_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn test_non_numeric_frequency_is_zero() {
        let data = format!("{HEADER}3,Q,u,Medium,40%,n/a\n4,R,u,Medium,40%,\n");
        let rows = parse_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].frequency, 0.0);
        assert_eq!(rows[1].frequency, 0.0);
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let data = "ID,Frequency %\n7,12.5\n";
        let rows = parse_rows(data.as_bytes()).unwrap();

        assert_eq!(rows[0].title, "");
        assert_eq!(rows[0].url, "");
        assert_eq!(rows[0].difficulty, Difficulty::Unknown);
        assert_eq!(rows[0].acceptance, "");
        assert_eq!(rows[0].frequency, 12.5);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = format!("{HEADER}\n1,A,u,Easy,1%,1\n\n2,B,u,Easy,1%,2\n");
        let rows = parse_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_ragged_file_is_an_error() {
        let data = format!("{HEADER}1,A,u,Easy,1%,1\n2,B\n");
        assert!(parse_rows(data.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_frequency_variants() {
        assert_eq!(parse_frequency(Some("42.5")), 42.5);
        assert_eq!(parse_frequency(Some(" 42.5% ")), 42.5);
        assert_eq!(parse_frequency(Some("NaN")), 0.0);
        assert_eq!(parse_frequency(Some("inf")), 0.0);
        assert_eq!(parse_frequency(None), 0.0);
    }

    #[test]
    fn test_parse_company_csv_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let result = parse_company_csv(&tmp.path().join("all.csv")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_parse_company_csv_malformed_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("all.csv");
        fs::write(&path, format!("{HEADER}1,\"unterminated,u,Easy,1%,1\n2,B\n")).unwrap();

        let result = parse_company_csv(&path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_parse_company_csv_keeps_rows_with_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("all.csv");
        let mut data = format!("{HEADER}1,Two Sum,u,Easy,50%,90\n").into_bytes();
        data.extend_from_slice(b"2,Caf\xE9,u,Medium,1%,5\n");
        fs::write(&path, data).unwrap();

        let rows = parse_company_csv(&path).unwrap().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[1].title, "Caf\u{FFFD}");
        assert_eq!(rows[1].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_lenient_looking_ids_are_dropped() {
        let data = format!("{HEADER}12.0,A,u,Easy,1%,1\n12abc,B,u,Easy,1%,1\n 12 ,C,u,Easy,1%,1\n");
        let rows = parse_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "C");
    }

    #[test]
    fn test_top_companies_case_insensitive() {
        let top = TopCompanies::from_lines("Google\n  meta \n\nTWO SIGMA\n");

        assert_eq!(top.len(), 3);
        assert!(top.contains("google"));
        assert!(top.contains("Meta"));
        assert!(top.contains("Two Sigma"));
        assert!(!top.contains("Amazon"));
    }

    #[test]
    fn test_top_companies_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let top = TopCompanies::load(&tmp.path().join("top-companies.csv")).unwrap();
        assert!(top.is_empty());
    }
}
