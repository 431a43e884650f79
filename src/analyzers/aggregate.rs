use crate::analyzers::types::{CompanyFrequency, CompanyRow, Question};
use std::collections::BTreeMap;

/// Merges every company's all-time export into one record per question id.
///
/// The first row seen for a `(question, company)` pair wins; later rows for
/// the same pair are ignored, so feeding the same export twice changes
/// nothing.
#[derive(Debug, Default)]
pub struct QuestionAggregator {
    questions: BTreeMap<u32, Question>,
}

impl QuestionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one company's rows into the aggregate.
    pub fn add_company(&mut self, company: &str, is_top: bool, rows: &[CompanyRow]) {
        for row in rows {
            let entry = CompanyFrequency {
                name: company.to_string(),
                frequency: row.frequency,
                is_top: Some(is_top),
            };

            match self.questions.get_mut(&row.id) {
                Some(existing) => {
                    if !existing.companies.iter().any(|c| c.name == company) {
                        existing.companies.push(entry);
                    }
                }
                None => {
                    self.questions.insert(
                        row.id,
                        Question {
                            id: row.id,
                            title: row.title.clone(),
                            url: row.url.clone(),
                            difficulty: row.difficulty,
                            acceptance: row.acceptance.clone(),
                            companies: vec![entry],
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

    /// Returns the questions in ascending id order.
    pub fn finish(self) -> Vec<Question> {
        self.questions.into_values().collect()
    }
}
