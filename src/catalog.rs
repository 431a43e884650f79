//! Read-side view over the written fixtures: loading, filtering and the
//! daily challenge pick.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::analyzers::types::{Difficulty, FixtureSet, Question, TrendingQuestion};
use crate::output::{COMPANIES_FILE, QUESTIONS_FILE, TOP_COMPANIES_FILE, TRENDING_FILE};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Loads the four fixture files written by an ingestion run.
pub fn load_fixtures(dir: &Path) -> Result<FixtureSet> {
    Ok(FixtureSet {
        questions: read_json(&dir.join(QUESTIONS_FILE))?,
        companies: read_json(&dir.join(COMPANIES_FILE))?,
        top_companies: read_json(&dir.join(TOP_COMPANIES_FILE))?,
        trending: read_json(&dir.join(TRENDING_FILE))?,
    })
}

/// Question list filter. Unset criteria match everything.
#[derive(Debug, Default, Clone)]
pub struct QuestionFilter {
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub company: Option<String>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !question
                .title
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if question.difficulty != difficulty {
                return false;
            }
        }
        if let Some(company) = self.company.as_deref().filter(|c| !c.is_empty()) {
            if !question.companies.iter().any(|c| c.name == company) {
                return false;
            }
        }
        true
    }

    /// Returns matching questions in their original order.
    pub fn apply<'a>(&self, questions: &'a [Question]) -> Vec<&'a Question> {
        questions.iter().filter(|q| self.matches(q)).collect()
    }
}

/// 32-bit wrapping `h = h * 31 + unit` hash over the UTF-16 code units of `s`.
fn date_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Picks the daily challenge for `date` among the `Medium` trending
/// questions, keeping their ranked order. Every caller gets the same pick for
/// the same day and trending list.
pub fn daily_challenge(trending: &[TrendingQuestion], date: NaiveDate) -> Option<&TrendingQuestion> {
    let mediums: Vec<_> = trending
        .iter()
        .filter(|q| q.difficulty == Difficulty::Medium)
        .collect();
    if mediums.is_empty() {
        return None;
    }

    let hash = date_hash(&date.format("%Y-%m-%d").to_string());
    let index = i64::from(hash).unsigned_abs() as usize % mediums.len();
    Some(mediums[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::CompanyFrequency;
    use crate::output::write_fixtures;
    use tempfile::TempDir;

    fn question(id: u32, title: &str, difficulty: Difficulty, companies: &[&str]) -> Question {
        Question {
            id,
            title: title.to_string(),
            url: String::new(),
            difficulty,
            acceptance: String::new(),
            companies: companies
                .iter()
                .map(|name| CompanyFrequency {
                    name: name.to_string(),
                    frequency: 1.0,
                    is_top: Some(false),
                })
                .collect(),
        }
    }

    fn trending(id: u32, difficulty: Difficulty) -> TrendingQuestion {
        TrendingQuestion {
            id,
            title: String::new(),
            url: String::new(),
            difficulty,
            acceptance: String::new(),
            trending_companies: vec![],
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let qs = vec![
            question(1, "Two Sum", Difficulty::Easy, &["Google"]),
            question(2, "LRU Cache", Difficulty::Medium, &[]),
        ];
        assert_eq!(QuestionFilter::default().apply(&qs).len(), 2);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let qs = vec![
            question(1, "Two Sum", Difficulty::Easy, &["Google"]),
            question(15, "3Sum", Difficulty::Medium, &["Google", "Meta"]),
            question(18, "4Sum", Difficulty::Medium, &["Amazon"]),
            question(146, "LRU Cache", Difficulty::Medium, &["Meta"]),
        ];
        let filter = QuestionFilter {
            search: Some("SUM".to_string()),
            difficulty: Some(Difficulty::Medium),
            company: Some("Google".to_string()),
        };

        let ids: Vec<_> = filter.apply(&qs).iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![15]);
    }

    #[test]
    fn test_daily_challenge_none_without_mediums() {
        let list = vec![trending(1, Difficulty::Easy), trending(2, Difficulty::Hard)];
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(daily_challenge(&list, date).is_none());
    }

    #[test]
    fn test_daily_challenge_only_picks_mediums_and_is_stable() {
        let list = vec![
            trending(1, Difficulty::Easy),
            trending(2, Difficulty::Medium),
            trending(3, Difficulty::Hard),
            trending(4, Difficulty::Medium),
            trending(5, Difficulty::Medium),
        ];
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let pick = daily_challenge(&list, date).unwrap();
        assert_eq!(pick.difficulty, Difficulty::Medium);
        assert_eq!(daily_challenge(&list, date).unwrap().id, pick.id);
    }

    #[test]
    fn test_date_hash_matches_reference_values() {
        assert_eq!(date_hash(""), 0);
        assert_eq!(date_hash("a"), 97);
        assert_eq!(date_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_load_fixtures_reads_written_files() {
        let tmp = TempDir::new().unwrap();
        let fixtures = FixtureSet {
            questions: vec![question(1, "Two Sum", Difficulty::Easy, &["Google"])],
            companies: vec!["Google".to_string()],
            top_companies: vec!["Google".to_string()],
            trending: vec![trending(1, Difficulty::Easy)],
        };
        write_fixtures(tmp.path(), &fixtures).unwrap();

        assert_eq!(load_fixtures(tmp.path()).unwrap(), fixtures);
    }

    #[test]
    fn test_load_fixtures_missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(load_fixtures(&tmp.path().join("nope")).is_err());
    }
}
