//! CLI entry point for the LeetCode tracker fixtures tool.
//!
//! Provides subcommands for ingesting per-company CSV exports into the JSON
//! fixtures the tracker UI loads, browsing those fixtures, and recording
//! per-user progress and daily-challenge completions in a local store.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use leetcode_fixtures::analyzers::analyzer::ingest;
use leetcode_fixtures::analyzers::types::Difficulty;
use leetcode_fixtures::analyzers::utility::max_frequency;
use leetcode_fixtures::catalog::{QuestionFilter, daily_challenge, load_fixtures};
use leetcode_fixtures::dashboard::{Dashboard, in_progress_first, pick_random};
use leetcode_fixtures::gamification::{DAILY_BONUS, GamificationStats, xp_value};
use leetcode_fixtures::infra::LocalStore;
use leetcode_fixtures::progress::{ProgressMap, ProgressSummary, Status};
use leetcode_fixtures::services::user_store::{IdentityProvider, User, UserStore};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "leetcode_fixtures")]
#[command(about = "Builds and browses LeetCode practice tracker fixtures", long_about = None)]
struct Cli {
    /// Local store holding the session and per-user progress
    #[arg(long, global = true, default_value = ".tracker/store.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate per-company CSV exports into JSON fixtures
    Ingest {
        /// Directory containing one subdirectory per company
        #[arg(short, long, default_value = "problems")]
        problems_dir: PathBuf,

        /// Directory the fixture files are written to
        #[arg(short, long, default_value = "public/data")]
        output_dir: PathBuf,

        /// Curated top-company list, one name per line
        #[arg(short, long, default_value = "data/top-companies.csv")]
        top_companies: PathBuf,
    },
    /// List questions, optionally filtered
    Questions {
        #[arg(short, long, default_value = "public/data")]
        data_dir: PathBuf,

        /// Case-insensitive title substring
        #[arg(short, long)]
        search: Option<String>,

        /// Easy, Medium or Hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Only questions listed by this company
        #[arg(short, long)]
        company: Option<String>,

        /// Maximum number of questions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the top of the trending list
    Trending {
        #[arg(short, long, default_value = "public/data")]
        data_dir: PathBuf,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// List the signed-in user's in-progress questions first
        #[arg(long, default_value_t = false)]
        in_progress_first: bool,
    },
    /// Show per-difficulty and per-top-company progress for the signed-in user
    Dashboard {
        #[arg(short, long, default_value = "public/data")]
        data_dir: PathBuf,
    },
    /// Suggest a random question to work on next
    Random {
        #[arg(short, long, default_value = "public/data")]
        data_dir: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Pool::Unsolved)]
        pool: Pool,
    },
    /// Show today's daily challenge
    Daily {
        #[arg(short, long, default_value = "public/data")]
        data_dir: PathBuf,

        /// Record the challenge as completed for the signed-in user
        #[arg(long, default_value_t = false)]
        complete: bool,

        /// Override today's UTC date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Sign in as a user
    SignIn {
        #[arg(short, long)]
        user: String,
    },
    /// Sign out the current user
    SignOut,
    /// Show the signed-in user
    Whoami,
    /// Record progress for a question
    SetStatus {
        #[arg(short, long, default_value = "public/data")]
        data_dir: PathBuf,

        /// Question id
        #[arg(long)]
        id: u32,

        /// todo, in_progress, done, revisit or unset
        #[arg(short, long)]
        status: Status,
    },
    /// List recorded progress for the signed-in user
    Progress,
    /// Show XP, level and streak for the signed-in user
    Stats,
}

/// Question pools the `random` command draws from.
#[derive(Clone, Copy, ValueEnum)]
enum Pool {
    /// Any question not marked done
    Unsolved,
    /// Unsolved questions listed by a top company
    Top,
    /// Trending questions not marked done
    Trending,
    /// Questions marked for revisit
    Revisit,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/leetcode_fixtures.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("leetcode_fixtures.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let store = LocalStore::new(cli.store);
    debug!(store = %store.path().display(), "Using local store");

    match cli.command {
        Commands::Ingest {
            problems_dir,
            output_dir,
            top_companies,
        } => {
            ingest(&problems_dir, &top_companies, &output_dir)?;
        }
        Commands::Questions {
            data_dir,
            search,
            difficulty,
            company,
            limit,
        } => {
            let fixtures = load_fixtures(&data_dir)?;
            let filter = QuestionFilter {
                search,
                difficulty: difficulty.as_deref().map(Difficulty::from),
                company,
            };
            let matches = filter.apply(&fixtures.questions);

            info!(results = matches.len(), total = fixtures.questions.len(), "Questions");
            for q in matches.iter().take(limit.unwrap_or(usize::MAX)) {
                info!(
                    id = q.id,
                    difficulty = %q.difficulty,
                    acceptance = %q.acceptance,
                    companies = q.companies.len(),
                    "{}",
                    q.title
                );
            }
        }
        Commands::Trending {
            data_dir,
            limit,
            in_progress_first: reorder,
        } => {
            let fixtures = load_fixtures(&data_dir)?;
            let progress = if reorder {
                let user = require_user(&store).await?;
                store.get_all_progress(&user).await?
            } else {
                ProgressMap::new()
            };
            let listed = in_progress_first(&fixtures.trending, &progress);
            for (rank, q) in listed.into_iter().take(limit).enumerate() {
                let status = progress.get(&q.id).copied().unwrap_or_default();
                info!(
                    rank = rank + 1,
                    id = q.id,
                    difficulty = %q.difficulty,
                    companies = q.trending_companies.len(),
                    max_frequency = max_frequency(&q.trending_companies),
                    status = %status,
                    "{}",
                    q.title
                );
            }
        }
        Commands::Dashboard { data_dir } => {
            let user = require_user(&store).await?;
            let fixtures = load_fixtures(&data_dir)?;
            let progress = store.get_all_progress(&user).await?;
            show_dashboard(&Dashboard::build(&fixtures, &progress));
        }
        Commands::Random { data_dir, pool } => {
            let user = require_user(&store).await?;
            let fixtures = load_fixtures(&data_dir)?;
            let progress = store.get_all_progress(&user).await?;
            let dashboard = Dashboard::build(&fixtures, &progress);
            let mut rng = rand::thread_rng();

            let pick = match pool {
                Pool::Unsolved => pick_random(&dashboard.overall.unsolved, &mut rng).map(|q| (q.id, &q.title, &q.url)),
                Pool::Top => pick_random(&dashboard.top_companies.unsolved, &mut rng).map(|q| (q.id, &q.title, &q.url)),
                Pool::Revisit => pick_random(&dashboard.revisit, &mut rng).map(|q| (q.id, &q.title, &q.url)),
                Pool::Trending => pick_random(&dashboard.trending_pool(&progress), &mut rng)
                    .map(|q| (q.id, &q.title, &q.url)),
            };
            match pick {
                Some((id, title, url)) => info!(id, url = %url, "Try next: {}", title),
                None => info!("Nothing left in this pool"),
            }
        }
        Commands::Daily {
            data_dir,
            complete,
            date,
        } => {
            let today = date.unwrap_or_else(|| Utc::now().date_naive());
            run_daily(&store, &data_dir, today, complete).await?;
        }
        Commands::SignIn { user } => {
            let user = store.sign_in(&user).await?;
            info!(uid = %user.uid, "Signed in");
        }
        Commands::SignOut => {
            store.sign_out().await?;
            info!("Signed out");
        }
        Commands::Whoami => match store.current_user().await? {
            Some(user) => info!(uid = %user.uid, "Signed in"),
            None => info!("Not signed in"),
        },
        Commands::SetStatus {
            data_dir,
            id,
            status,
        } => {
            set_status(&store, &data_dir, id, status).await?;
        }
        Commands::Progress => {
            let user = require_user(&store).await?;
            let progress = store.get_all_progress(&user).await?;
            for (id, status) in progress.iter().filter(|(_, s)| **s != Status::Unset) {
                info!(id, status = %status, "Progress");
            }
            let summary = ProgressSummary::from_progress(&progress);
            info!(
                todo = summary.todo,
                in_progress = summary.in_progress,
                done = summary.done,
                revisit = summary.revisit,
                "Progress summary"
            );
        }
        Commands::Stats => {
            let user = require_user(&store).await?;
            let stats = store.get_stats(&user).await?.unwrap_or_default();
            let (into_level, level_span) = stats.level_progress();
            info!(
                total_xp = stats.total_xp,
                level = stats.level,
                into_level,
                level_span,
                daily_streak = stats.daily_streak,
                "Stats"
            );
        }
    }

    Ok(())
}

fn show_dashboard(dashboard: &Dashboard<'_>) {
    let overall = &dashboard.overall;
    info!(solved = overall.solved, total = overall.total, "Overall progress");
    for (difficulty, tally) in overall.by_difficulty() {
        info!(done = tally.done, total = tally.total, "{}", difficulty);
    }

    for company in &dashboard.top_companies.companies {
        info!(
            done = company.tally.done,
            total = company.tally.total,
            "{}",
            company.name
        );
    }

    info!(
        unsolved = overall.unsolved.len(),
        unsolved_top = dashboard.top_companies.unsolved.len(),
        revisit = dashboard.revisit.len(),
        "Random pools"
    );
}

async fn require_user(store: &LocalStore) -> Result<User> {
    match store.current_user().await? {
        Some(user) => Ok(user),
        None => bail!("not signed in; run `sign-in --user <id>` first"),
    }
}

/// Shows the daily challenge for `today` and, when asked, records it.
#[tracing::instrument(skip(store, data_dir), fields(date = %today))]
async fn run_daily(store: &LocalStore, data_dir: &Path, today: NaiveDate, complete: bool) -> Result<()> {
    let fixtures = load_fixtures(data_dir)?;
    let Some(challenge) = daily_challenge(&fixtures.trending, today) else {
        info!("No medium trending questions, no daily challenge today");
        return Ok(());
    };

    info!(
        id = challenge.id,
        difficulty = %challenge.difficulty,
        url = %challenge.url,
        reward = xp_value(challenge.difficulty) + DAILY_BONUS,
        "Daily challenge: {}",
        challenge.title
    );

    if !complete {
        return Ok(());
    }

    let user = require_user(store).await?;
    let mut stats = store.get_stats(&user).await?.unwrap_or_default();
    if stats.complete_daily(challenge.id, challenge.difficulty, today) {
        store.upsert_stats(&user, &stats).await?;
        info!(
            total_xp = stats.total_xp,
            level = stats.level,
            daily_streak = stats.daily_streak,
            "Daily challenge completed"
        );
    } else {
        info!("Daily challenge already completed today");
    }
    Ok(())
}

/// Saves a status change and applies the matching XP award or revocation.
#[tracing::instrument(skip(store, data_dir))]
async fn set_status(store: &LocalStore, data_dir: &Path, id: u32, status: Status) -> Result<()> {
    let user = require_user(store).await?;
    let fixtures = load_fixtures(data_dir)?;
    let question = fixtures
        .questions
        .iter()
        .find(|q| q.id == id)
        .with_context(|| format!("question {id} not found in {}", data_dir.display()))?;

    let progress = store.get_all_progress(&user).await?;
    let old = progress.get(&id).copied().unwrap_or_default();

    store.upsert_progress(&user, id, status).await?;

    let mut stats: GamificationStats = store.get_stats(&user).await?.unwrap_or_default();
    if stats.on_status_change(question.difficulty, old, status) {
        store.upsert_stats(&user, &stats).await?;
    }

    info!(
        id,
        title = %question.title,
        old = %old,
        new = %status,
        total_xp = stats.total_xp,
        level = stats.level,
        "Status updated"
    );
    Ok(())
}
