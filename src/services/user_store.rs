//! Traits for the identity provider and the per-user document store.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::gamification::GamificationStats;
use crate::progress::{ProgressMap, Status};

/// An authenticated user as seen by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
}

/// Sign-in state for the current client.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user, if any.
    async fn current_user(&self) -> Result<Option<User>>;

    async fn sign_in(&self, uid: &str) -> Result<User>;

    async fn sign_out(&self) -> Result<()>;
}

/// Per-user progress and gamification documents.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Every recorded status for `user`. Empty when nothing has been saved.
    async fn get_all_progress(&self, user: &User) -> Result<ProgressMap>;

    /// Writes the status for a single question, replacing any previous value.
    async fn upsert_progress(&self, user: &User, question_id: u32, status: Status) -> Result<()>;

    /// The saved stats for `user`, or `None` if they have never been written.
    async fn get_stats(&self, user: &User) -> Result<Option<GamificationStats>>;

    async fn upsert_stats(&self, user: &User, stats: &GamificationStats) -> Result<()>;
}
