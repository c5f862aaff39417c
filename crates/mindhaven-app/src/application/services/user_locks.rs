use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use mindhaven_domain::shared::UserId;

const PRUNE_THRESHOLD: usize = 1024;

/// Serializes read-modify-write sequences per user inside this process.
///
/// Operations for different users never wait on each other.
#[derive(Default)]
pub struct UserWriteLocks {
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserWriteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, user_id: &UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            if locks.len() >= PRUNE_THRESHOLD {
                // Only the map holds an unused lock
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks.entry(user_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
