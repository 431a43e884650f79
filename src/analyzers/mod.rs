//! Question aggregation and trending ranking.
//!
//! This module merges per-company CSV exports into one record per question,
//! builds the trending list from top companies' recent exports, and hands
//! the finished [`FixtureSet`](types::FixtureSet) to the fixture writer.

pub mod aggregate;
pub mod analyzer;
pub mod trending;
pub mod types;
pub mod utility;
