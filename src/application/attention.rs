//! # Attention Window
//!
//! After "OK hackbot", a user's unaddressed messages are treated as addressed for a short,
//! sliding period. Each stored entry holds the expiry as epoch milliseconds and is read at
//! most once: every read is immediately followed by a delete.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use tokio::sync::Mutex;

use crate::domain::traits::{Brain, Clock};

pub const KEY_PREFIX: &str = "attention";

/// Result of consuming a user's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attention {
    /// No entry was stored
    Idle,
    /// The entry was still live
    Listening { expires_at: DateTime<Utc> },
    /// The entry had run out
    Expired { expired_at: DateTime<Utc> },
}

pub struct AttentionWindow {
    brain: Arc<dyn Brain>,
    clock: Arc<dyn Clock>,
    span: Duration,
    // Per-user critical sections around the brain's get/remove/set
    locks: std::sync::Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AttentionWindow {
    pub fn new(brain: Arc<dyn Brain>, clock: Arc<dyn Clock>, span_seconds: i64) -> Self {
        Self {
            brain,
            clock,
            span: Duration::seconds(span_seconds),
            locks: std::sync::Mutex::new(HashMap::new()),
        }
    }

    pub fn key(user_id: &str) -> String {
        format!("{KEY_PREFIX}:{user_id}")
    }

    fn lock_for(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(user_id.to_string()).or_default().clone()
    }

    /// Drops the user's lock once no other task holds or waits on it.
    fn release(&self, user_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one in `lock`
        if Arc::strong_count(&lock) == 2 {
            locks.remove(user_id);
        }
    }

    /// Starts (or restarts) listening to `user_id`. Returns the new expiry.
    pub async fn listen(&self, user_id: &str) -> Result<DateTime<Utc>> {
        let lock = self.lock_for(user_id);
        let result = {
            let _guard = lock.lock().await;
            self.write_expiry(user_id).await
        };
        self.release(user_id, lock);
        result
    }

    /// Reads and deletes the entry for `user_id`, classifying it against the clock.
    pub async fn consume(&self, user_id: &str) -> Result<Attention> {
        let lock = self.lock_for(user_id);
        let result = {
            let _guard = lock.lock().await;
            self.take_entry(user_id).await
        };
        self.release(user_id, lock);
        result
    }

    async fn write_expiry(&self, user_id: &str) -> Result<DateTime<Utc>> {
        let expires_at = self.clock.now() + self.span;
        self.brain
            .set(
                &Self::key(user_id),
                expires_at.timestamp_millis().to_string(),
            )
            .await?;
        tracing::debug!("Listening to {} until {}", user_id, expires_at);
        Ok(expires_at)
    }

    async fn take_entry(&self, user_id: &str) -> Result<Attention> {
        let key = Self::key(user_id);
        let Some(raw) = self.brain.get(&key).await? else {
            return Ok(Attention::Idle);
        };
        self.brain.remove(&key).await?;

        let expires_at = parse_expiry(&raw)
            .with_context(|| format!("Corrupt attention entry for {user_id}"))?;
        if self.clock.now() <= expires_at {
            Ok(Attention::Listening { expires_at })
        } else {
            Ok(Attention::Expired {
                expired_at: expires_at,
            })
        }
    }
}

fn parse_expiry(raw: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = raw.trim().parse()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| anyhow!("timestamp {millis} out of range"))
}
