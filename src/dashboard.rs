//! Progress dashboards computed from the fixtures and one user's progress.
//!
//! Each view also exposes a pool of questions to pick a random next problem
//! from: unsolved questions, unsolved top-company questions, trending
//! questions not yet done, and questions marked for revisit.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

use crate::analyzers::types::{Difficulty, FixtureSet, Question, TrendingQuestion};
use crate::progress::{ProgressMap, Status};

fn is_done(progress: &ProgressMap, id: u32) -> bool {
    progress.get(&id) == Some(&Status::Done)
}

/// Solved and total counts for one slice of the question list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub done: usize,
    pub total: usize,
}

impl Tally {
    fn count(&mut self, done: bool) {
        self.total += 1;
        if done {
            self.done += 1;
        }
    }
}

/// Solved counts across the whole question list, split by difficulty.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OverallProgress<'a> {
    pub easy: Tally,
    pub medium: Tally,
    pub hard: Tally,
    /// Solved questions with a known difficulty.
    pub solved: usize,
    /// Every question, including those without a difficulty.
    pub total: usize,
    pub unsolved: Vec<&'a Question>,
}

impl<'a> OverallProgress<'a> {
    /// Questions with an unknown difficulty count towards `total` only.
    pub fn build(questions: &'a [Question], progress: &ProgressMap) -> Self {
        let mut overall = OverallProgress {
            total: questions.len(),
            ..Default::default()
        };

        for q in questions {
            let tally = match q.difficulty {
                Difficulty::Easy => &mut overall.easy,
                Difficulty::Medium => &mut overall.medium,
                Difficulty::Hard => &mut overall.hard,
                Difficulty::Unknown => continue,
            };
            let done = is_done(progress, q.id);
            tally.count(done);
            if done {
                overall.solved += 1;
            } else {
                overall.unsolved.push(q);
            }
        }

        overall
    }

    pub fn by_difficulty(&self) -> [(Difficulty, Tally); 3] {
        [
            (Difficulty::Easy, self.easy),
            (Difficulty::Medium, self.medium),
            (Difficulty::Hard, self.hard),
        ]
    }
}

/// Progress on one top company's questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyProgress {
    pub name: String,
    pub tally: Tally,
}

/// Per-company progress over questions listed by at least one top company.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TopCompanyProgress<'a> {
    /// Most questions first; companies without any question are left out.
    pub companies: Vec<CompanyProgress>,
    pub unsolved: Vec<&'a Question>,
}

impl<'a> TopCompanyProgress<'a> {
    /// Only top-flagged company entries whose name is in `top_companies`
    /// are counted. Ties keep the order of `top_companies`.
    pub fn build(questions: &'a [Question], progress: &ProgressMap, top_companies: &[String]) -> Self {
        let mut tallies: Vec<CompanyProgress> = top_companies
            .iter()
            .map(|name| CompanyProgress {
                name: name.clone(),
                tally: Tally::default(),
            })
            .collect();
        let index: HashMap<&str, usize> = top_companies
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut unsolved = Vec::new();
        for q in questions {
            if !q.companies.iter().any(|c| c.is_top == Some(true)) {
                continue;
            }
            let done = is_done(progress, q.id);
            if !done {
                unsolved.push(q);
            }
            for c in q.companies.iter().filter(|c| c.is_top == Some(true)) {
                if let Some(&i) = index.get(c.name.as_str()) {
                    tallies[i].tally.count(done);
                }
            }
        }

        tallies.retain(|c| c.tally.total > 0);
        tallies.sort_by(|a, b| b.tally.total.cmp(&a.tally.total));

        Self {
            companies: tallies,
            unsolved,
        }
    }
}

/// Trending list with the user's in-progress questions moved to the front.
///
/// Both groups keep their ranked order.
pub fn in_progress_first<'a>(trending: &'a [TrendingQuestion], progress: &ProgressMap) -> Vec<&'a TrendingQuestion> {
    let (mut first, rest): (Vec<_>, Vec<_>) = trending
        .iter()
        .partition(|q| progress.get(&q.id) == Some(&Status::InProgress));
    first.extend(rest);
    first
}

/// Questions the user marked for revisit, in id order. Progress entries for
/// ids missing from `questions` are ignored.
pub fn revisit_pool<'a>(questions: &'a [Question], progress: &ProgressMap) -> Vec<&'a Question> {
    let by_id: HashMap<u32, &Question> = questions.iter().map(|q| (q.id, q)).collect();
    progress
        .iter()
        .filter(|(_, status)| **status == Status::Revisit)
        .filter_map(|(id, _)| by_id.get(id).copied())
        .collect()
}

/// All dashboard views for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub overall: OverallProgress<'a>,
    pub top_companies: TopCompanyProgress<'a>,
    pub trending: Vec<&'a TrendingQuestion>,
    pub revisit: Vec<&'a Question>,
}

impl<'a> Dashboard<'a> {
    pub fn build(fixtures: &'a FixtureSet, progress: &ProgressMap) -> Self {
        Self {
            overall: OverallProgress::build(&fixtures.questions, progress),
            top_companies: TopCompanyProgress::build(&fixtures.questions, progress, &fixtures.top_companies),
            trending: in_progress_first(&fixtures.trending, progress),
            revisit: revisit_pool(&fixtures.questions, progress),
        }
    }

    /// Trending questions not yet done, in-progress ones first.
    pub fn trending_pool(&self, progress: &ProgressMap) -> Vec<&'a TrendingQuestion> {
        self.trending
            .iter()
            .copied()
            .filter(|q| !is_done(progress, q.id))
            .collect()
    }
}

/// Picks one entry uniformly at random; `None` for an empty pool.
pub fn pick_random<'a, T, R: Rng + ?Sized>(pool: &[&'a T], rng: &mut R) -> Option<&'a T> {
    pool.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::CompanyFrequency;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: u32, difficulty: Difficulty, companies: &[(&str, bool)]) -> Question {
        Question {
            id,
            title: format!("Q{id}"),
            url: String::new(),
            difficulty,
            acceptance: String::new(),
            companies: companies
                .iter()
                .map(|(name, top)| CompanyFrequency {
                    name: name.to_string(),
                    frequency: 1.0,
                    is_top: Some(*top),
                })
                .collect(),
        }
    }

    fn trending(id: u32) -> TrendingQuestion {
        TrendingQuestion {
            id,
            title: String::new(),
            url: String::new(),
            difficulty: Difficulty::Medium,
            acceptance: String::new(),
            trending_companies: vec![],
        }
    }

    fn progress(entries: &[(u32, Status)]) -> ProgressMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_overall_progress_by_difficulty() {
        let qs = vec![
            question(1, Difficulty::Easy, &[]),
            question(2, Difficulty::Easy, &[]),
            question(3, Difficulty::Medium, &[]),
            question(4, Difficulty::Hard, &[]),
            question(5, Difficulty::Unknown, &[]),
        ];
        let p = progress(&[
            (1, Status::Done),
            (3, Status::InProgress),
            (4, Status::Done),
            (5, Status::Done),
        ]);

        let overall = OverallProgress::build(&qs, &p);

        assert_eq!(overall.easy, Tally { done: 1, total: 2 });
        assert_eq!(overall.medium, Tally { done: 0, total: 1 });
        assert_eq!(overall.hard, Tally { done: 1, total: 1 });
        assert_eq!(overall.solved, 2);
        assert_eq!(overall.total, 5);
        let unsolved: Vec<_> = overall.unsolved.iter().map(|q| q.id).collect();
        assert_eq!(unsolved, vec![2, 3]);
    }

    #[test]
    fn test_top_company_progress_sorted_and_drops_empty() {
        let qs = vec![
            question(1, Difficulty::Easy, &[("Google", true), ("Amazon", true)]),
            question(2, Difficulty::Easy, &[("Amazon", true)]),
            question(3, Difficulty::Easy, &[("Amazon", true), ("Stripe", false)]),
            question(4, Difficulty::Easy, &[("Stripe", false)]),
        ];
        let top = vec!["Google".to_string(), "Amazon".to_string(), "Two Sigma".to_string()];
        let p = progress(&[(1, Status::Done), (4, Status::Revisit)]);

        let view = TopCompanyProgress::build(&qs, &p, &top);

        assert_eq!(
            view.companies,
            vec![
                CompanyProgress {
                    name: "Amazon".to_string(),
                    tally: Tally { done: 1, total: 3 },
                },
                CompanyProgress {
                    name: "Google".to_string(),
                    tally: Tally { done: 1, total: 1 },
                },
            ]
        );
        let unsolved: Vec<_> = view.unsolved.iter().map(|q| q.id).collect();
        assert_eq!(unsolved, vec![2, 3]);
    }

    #[test]
    fn test_in_progress_questions_move_to_front() {
        let list = vec![trending(10), trending(20), trending(30), trending(40)];
        let p = progress(&[(30, Status::InProgress), (40, Status::InProgress), (10, Status::Done)]);

        let ids: Vec<_> = in_progress_first(&list, &p).iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![30, 40, 10, 20]);
    }

    #[test]
    fn test_revisit_pool_ignores_unknown_ids() {
        let qs = vec![question(1, Difficulty::Easy, &[]), question(2, Difficulty::Hard, &[])];
        let p = progress(&[(2, Status::Revisit), (99, Status::Revisit), (1, Status::Done)]);

        let ids: Vec<_> = revisit_pool(&qs, &p).iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_dashboard_trending_pool_skips_done() {
        let fixtures = FixtureSet {
            trending: vec![trending(1), trending(2), trending(3)],
            ..Default::default()
        };
        let p = progress(&[(1, Status::Done), (3, Status::InProgress)]);

        let dashboard = Dashboard::build(&fixtures, &p);
        let ids: Vec<_> = dashboard.trending_pool(&p).iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_pick_random_stays_in_pool() {
        let qs = vec![question(1, Difficulty::Easy, &[]), question(2, Difficulty::Easy, &[])];
        let pool: Vec<&Question> = qs.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let pick = pick_random(&pool, &mut rng).unwrap();
            assert!(pick.id == 1 || pick.id == 2);
        }
        let empty: Vec<&Question> = vec![];
        assert!(pick_random(&empty, &mut rng).is_none());
    }
}
