use crate::analyzers::types::{CompanyFrequency, CompanyRow, TrendingQuestion};
use crate::analyzers::utility::max_frequency;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Aggregates top companies' recent-window exports and ranks the result.
///
/// Uses the same first-row-wins dedup as
/// [`QuestionAggregator`](crate::analyzers::aggregate::QuestionAggregator)
/// but only ever sees top companies.
#[derive(Debug, Default)]
pub struct TrendingRanker {
    questions: BTreeMap<u32, TrendingQuestion>,
}

impl TrendingRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_company(&mut self, company: &str, rows: &[CompanyRow]) {
        for row in rows {
            let entry = CompanyFrequency {
                name: company.to_string(),
                frequency: row.frequency,
                is_top: None,
            };

            match self.questions.get_mut(&row.id) {
                Some(existing) => {
                    if !existing.trending_companies.iter().any(|c| c.name == company) {
                        existing.trending_companies.push(entry);
                    }
                }
                None => {
                    self.questions.insert(
                        row.id,
                        TrendingQuestion {
                            id: row.id,
                            title: row.title.clone(),
                            url: row.url.clone(),
                            difficulty: row.difficulty,
                            acceptance: row.acceptance.clone(),
                            trending_companies: vec![entry],
                        },
                    );
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the ranked trending list. See [`rank_order`].
    pub fn finish(self) -> Vec<TrendingQuestion> {
        let mut ranked: Vec<_> = self.questions.into_values().collect();
        ranked.sort_by(rank_order);
        ranked
    }
}

/// Ranking for trending questions: more distinct top companies first, then
/// higher peak frequency, then lower id.
pub fn rank_order(a: &TrendingQuestion, b: &TrendingQuestion) -> Ordering {
    b.trending_companies
        .len()
        .cmp(&a.trending_companies.len())
        .then_with(|| {
            max_frequency(&b.trending_companies).total_cmp(&max_frequency(&a.trending_companies))
        })
        .then_with(|| a.id.cmp(&b.id))
}
