//! Experience points, levels and the daily-challenge streak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analyzers::types::Difficulty;
use crate::progress::Status;

/// Bonus XP on top of the question's own value for finishing the daily challenge.
pub const DAILY_BONUS: u64 = 20;

/// XP per level step; level `n` starts at `n² × XP_PER_LEVEL_UNIT`.
const XP_PER_LEVEL_UNIT: u64 = 50;

/// XP granted for solving a question of the given difficulty.
pub fn xp_value(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 25,
        Difficulty::Hard => 50,
        Difficulty::Unknown => 0,
    }
}

/// `floor(sqrt(xp / 50))`, computed in integers so level boundaries are exact.
pub fn compute_level(xp: u64) -> u32 {
    (xp / XP_PER_LEVEL_UNIT).isqrt() as u32
}

/// XP at which `level` begins. Inverse of [`compute_level`] at boundaries.
///
/// Saturates at `u64::MAX` for levels no XP total can reach.
pub fn xp_for_level(level: u32) -> u64 {
    let level = u64::from(level);
    level.saturating_mul(level).saturating_mul(XP_PER_LEVEL_UNIT)
}

mod date_or_empty {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

/// Per-user gamification document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamificationStats {
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub level: u32,
    #[serde(rename = "dailyChallengeId")]
    pub daily_challenge_id: Option<u32>,
    #[serde(rename = "dailyChallengeDate", with = "date_or_empty")]
    pub daily_challenge_date: Option<NaiveDate>,
    #[serde(rename = "dailyStreak")]
    pub daily_streak: u32,
}

impl GamificationStats {
    fn set_xp(&mut self, xp: u64) {
        self.total_xp = xp;
        self.level = compute_level(xp);
    }

    /// Adds (or, when `done` is false, takes back) the XP for one question.
    ///
    /// XP never goes below zero. Returns `false` when the difficulty is worth
    /// nothing and the stats were left untouched.
    pub fn award_xp(&mut self, difficulty: Difficulty, done: bool) -> bool {
        let delta = xp_value(difficulty);
        if delta == 0 {
            return false;
        }
        let xp = if done {
            self.total_xp.saturating_add(delta)
        } else {
            self.total_xp.saturating_sub(delta)
        };
        self.set_xp(xp);
        true
    }

    /// Applies XP accounting for a status change: entering `done` awards the
    /// question's XP, leaving `done` revokes it, anything else is ignored.
    pub fn on_status_change(&mut self, difficulty: Difficulty, old: Status, new: Status) -> bool {
        match (old == Status::Done, new == Status::Done) {
            (false, true) => self.award_xp(difficulty, true),
            (true, false) => self.award_xp(difficulty, false),
            _ => false,
        }
    }

    /// Records completion of the daily challenge on `today`.
    ///
    /// Completing the same question twice on the same day is a no-op and
    /// returns `false`. The streak grows only when the previous completion was
    /// exactly the day before; otherwise it restarts at 1.
    pub fn complete_daily(&mut self, question_id: u32, difficulty: Difficulty, today: NaiveDate) -> bool {
        if self.daily_challenge_date == Some(today) && self.daily_challenge_id == Some(question_id) {
            return false;
        }

        let continues = self
            .daily_challenge_date
            .zip(today.pred_opt())
            .is_some_and(|(last, yesterday)| last == yesterday);
        self.daily_streak = if continues { self.daily_streak.saturating_add(1) } else { 1 };

        let reward = xp_value(difficulty).saturating_add(DAILY_BONUS);
        self.set_xp(self.total_xp.saturating_add(reward));
        self.daily_challenge_id = Some(question_id);
        self.daily_challenge_date = Some(today);
        true
    }

    pub fn is_daily_completed(&self, today: NaiveDate) -> bool {
        self.daily_challenge_date == Some(today)
    }

    /// XP earned inside the current level and the XP span of that level.
    pub fn level_progress(&self) -> (u64, u64) {
        let level = compute_level(self.total_xp);
        let start = xp_for_level(level);
        let next = xp_for_level(level.saturating_add(1));
        (self.total_xp.saturating_sub(start), next.saturating_sub(start))
    }
}
