use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::gamification::GamificationStats;
use crate::progress::{ProgressMap, Status};
use crate::services::user_store::{IdentityProvider, User, UserStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserDocument {
    #[serde(default)]
    progress: ProgressMap,
    #[serde(default)]
    gamification: Option<GamificationStats>,
}

/// On-disk layout:
/// ```json
/// {
///   "session": { "uid": "alice" },
///   "users": {
///     "alice": {
///       "progress": { "1": "done", "146": "revisit" },
///       "gamification": { "totalXP": 45, "level": 0, "dailyChallengeId": 146,
///                         "dailyChallengeDate": "2024-06-01", "dailyStreak": 1 }
///     }
///   }
/// }
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    session: Option<User>,
    #[serde(default)]
    users: BTreeMap<String, UserDocument>,
}

/// A single JSON file standing in for the hosted identity provider and
/// document store, so the CLI works offline.
///
/// Every write rewrites the whole file. A missing file is an empty store.
pub struct LocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoreDocument> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("parsing store {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(e).with_context(|| format!("reading store {}", self.path.display())),
        }
    }

    async fn save(&self, doc: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating store dir {}", parent.display()))?;
        }
        let body = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("writing store {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Store saved");
        Ok(())
    }

    async fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut StoreDocument) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        f(&mut doc);
        self.save(&doc).await
    }
}

#[async_trait]
impl IdentityProvider for LocalStore {
    async fn current_user(&self) -> Result<Option<User>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.session)
    }

    async fn sign_in(&self, uid: &str) -> Result<User> {
        let uid = uid.trim();
        if uid.is_empty() {
            bail!("user id must not be empty");
        }
        let user = User {
            uid: uid.to_string(),
        };
        let session = user.clone();
        self.update(move |doc| doc.session = Some(session)).await?;
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        self.update(|doc| doc.session = None).await
    }
}

#[async_trait]
impl UserStore for LocalStore {
    async fn get_all_progress(&self, user: &User) -> Result<ProgressMap> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        Ok(doc
            .users
            .remove(&user.uid)
            .map(|u| u.progress)
            .unwrap_or_default())
    }

    async fn upsert_progress(&self, user: &User, question_id: u32, status: Status) -> Result<()> {
        let uid = user.uid.clone();
        self.update(move |doc| {
            doc.users
                .entry(uid)
                .or_default()
                .progress
                .insert(question_id, status);
        })
        .await
    }

    async fn get_stats(&self, user: &User) -> Result<Option<GamificationStats>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        Ok(doc.users.remove(&user.uid).and_then(|u| u.gamification))
    }

    async fn upsert_stats(&self, user: &User, stats: &GamificationStats) -> Result<()> {
        let uid = user.uid.clone();
        let stats = stats.clone();
        self.update(move |doc| {
            doc.users.entry(uid).or_default().gamification = Some(stats);
        })
        .await
    }
}
