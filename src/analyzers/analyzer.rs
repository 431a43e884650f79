use crate::analyzers::aggregate::QuestionAggregator;
use crate::analyzers::trending::TrendingRanker;
use crate::analyzers::types::FixtureSet;
use crate::output::write_fixtures;
use crate::parser::{TopCompanies, parse_company_csv};
use crate::scanner::scan_company_dirs;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// All-time export inside each company directory.
pub const ALL_TIME_EXPORT: &str = "all.csv";
/// Recent-window export, only read for top companies.
pub const RECENT_EXPORT: &str = "thirty-days.csv";

/// Scans `problems_dir`, parses every company export and returns the
/// finished aggregates without touching the output directory.
#[tracing::instrument(skip_all, fields(problems_dir = %problems_dir.display()))]
pub fn build_fixtures(problems_dir: &Path, top_companies: &TopCompanies) -> Result<FixtureSet> {
    let company_dirs = scan_company_dirs(problems_dir)?;
    debug!(count = company_dirs.len(), "Company directories found");

    let mut questions = QuestionAggregator::new();
    let mut trending = TrendingRanker::new();
    let mut companies = BTreeSet::new();
    let mut top_names = BTreeSet::new();

    for dir in &company_dirs {
        let name = dir.display_name.as_str();
        let is_top = top_companies.contains(name);
        if is_top {
            top_names.insert(name.to_string());
        }

        if let Some(rows) = parse_company_csv(&dir.path.join(ALL_TIME_EXPORT))? {
            if !rows.is_empty() {
                companies.insert(name.to_string());
            }
            questions.add_company(name, is_top, &rows);
        }

        if is_top {
            if let Some(rows) = parse_company_csv(&dir.path.join(RECENT_EXPORT))? {
                trending.add_company(name, &rows);
            }
        }
    }

    debug!(
        questions = questions.len(),
        trending = trending.len(),
        "Aggregation finished"
    );

    Ok(FixtureSet {
        questions: questions.finish(),
        companies: companies.into_iter().collect(),
        top_companies: top_names.into_iter().collect(),
        trending: trending.finish(),
    })
}

/// Runs the whole ingestion: loads the top-company list, aggregates every
/// export under `problems_dir` and writes the fixtures to `output_dir`.
#[tracing::instrument(skip_all, fields(
    problems_dir = %problems_dir.display(),
    top_companies = %top_companies_path.display(),
    output_dir = %output_dir.display(),
))]
pub fn ingest(
    problems_dir: &Path,
    top_companies_path: &Path,
    output_dir: &Path,
) -> Result<FixtureSet> {
    let top_companies = TopCompanies::load(top_companies_path)?;
    debug!(count = top_companies.len(), "Top-company list loaded");

    let fixtures = build_fixtures(problems_dir, &top_companies)?;
    write_fixtures(output_dir, &fixtures)?;

    info!(
        questions = fixtures.questions.len(),
        companies = fixtures.companies.len(),
        top_companies = fixtures.top_companies.len(),
        trending = fixtures.trending.len(),
        "Parsed {} questions from {} companies ({} top, {} trending)",
        fixtures.questions.len(),
        fixtures.companies.len(),
        fixtures.top_companies.len(),
        fixtures.trending.len(),
    );

    Ok(fixtures)
}
