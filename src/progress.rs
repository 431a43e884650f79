//! Per-question progress state.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Progress a user has recorded for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    #[serde(rename = "")]
    Unset,
    Todo,
    InProgress,
    Done,
    Revisit,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unset => "",
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Done => "done",
            Status::Revisit => "revisit",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Unset => f.write_str("unset"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "" | "unset" | "none" => Status::Unset,
            "todo" => Status::Todo,
            "in_progress" | "in-progress" => Status::InProgress,
            "done" => Status::Done,
            "revisit" => Status::Revisit,
            other => bail!("unknown status '{other}'"),
        })
    }
}

/// Question id to recorded status for one user.
pub type ProgressMap = BTreeMap<u32, Status>;

/// Counts of each status across a progress map, ignoring unset entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub revisit: usize,
}

impl ProgressSummary {
    pub fn from_progress(progress: &ProgressMap) -> Self {
        let mut s = ProgressSummary::default();
        for status in progress.values() {
            match status {
                Status::Unset => {}
                Status::Todo => s.todo += 1,
                Status::InProgress => s.in_progress += 1,
                Status::Done => s.done += 1,
                Status::Revisit => s.revisit += 1,
            }
        }
        s
    }
}
