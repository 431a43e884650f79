//! Data types used by the aggregation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty rating reported by the export.
///
/// Anything other than the three known labels (including an empty cell)
/// becomes [`Difficulty::Unknown`], which serializes as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Unknown,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "",
        }
    }
}

impl From<&str> for Difficulty {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Difficulty::from(s.as_str())
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One company's reported frequency for a question.
///
/// `is_top` is only tracked for the all-time aggregate; trending entries
/// leave it unset and it is omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFrequency {
    pub name: String,
    pub frequency: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_top: Option<bool>,
}

/// A question with every company that listed it in its all-time export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub title: String,
    pub url: String,
    pub difficulty: Difficulty,
    pub acceptance: String,
    pub companies: Vec<CompanyFrequency>,
}

/// A question as seen through top companies' recent-window exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingQuestion {
    pub id: u32,
    pub title: String,
    pub url: String,
    pub difficulty: Difficulty,
    pub acceptance: String,
    pub trending_companies: Vec<CompanyFrequency>,
}

/// A single validated row from a company export.
///
/// Rows without a numeric id never become a `CompanyRow`; every other
/// column has already been defaulted by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRow {
    pub id: u32,
    pub title: String,
    pub url: String,
    pub difficulty: Difficulty,
    pub acceptance: String,
    pub frequency: f64,
}

/// Everything a single ingestion run produces, ready to be written out.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FixtureSet {
    pub questions: Vec<Question>,
    pub companies: Vec<String>,
    pub top_companies: Vec<String>,
    pub trending: Vec<TrendingQuestion>,
}
