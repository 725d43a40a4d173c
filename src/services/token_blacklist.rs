//! Token blacklist service for server-side JWT invalidation.
//!
//! Logged-out tokens are held in memory until their natural expiry, so a
//! revoked token cannot be replayed while it is still formally valid.

use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Thread-safe token blacklist keyed by token hash.
#[derive(Clone)]
pub struct TokenBlacklist {
    tokens: Arc<DashMap<String, Instant>>,
    last_cleanup: Arc<RwLock<Instant>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Blacklist a token until its `exp` (Unix epoch seconds).
    pub async fn blacklist_token(&self, token: &str, exp: usize) {
        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as usize)
            .unwrap_or(0);

        if exp > now_secs {
            let ttl = Duration::from_secs((exp - now_secs) as u64);
            self.tokens
                .insert(Self::hash_token(token), Instant::now() + ttl);
            debug!("Token blacklisted, will expire in {:?}", ttl);
        }

        self.maybe_cleanup().await;
    }

    /// True when the token has been revoked and must be rejected.
    pub fn is_blacklisted(&self, token: &str) -> bool {
        let token_hash = Self::hash_token(token);

        if let Some(entry) = self.tokens.get(&token_hash) {
            if *entry > Instant::now() {
                return true;
            }
            drop(entry);
            self.tokens.remove(&token_hash);
        }

        false
    }

    /// The token itself is never stored, only its hash.
    fn hash_token(token: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }

    async fn maybe_cleanup(&self) {
        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            last.elapsed() >= CLEANUP_INTERVAL
        };

        if should_cleanup {
            let mut last = self.last_cleanup.write().await;
            if last.elapsed() >= CLEANUP_INTERVAL {
                self.cleanup();
                *last = Instant::now();
            }
        }
    }

    fn cleanup(&self) {
        let now = Instant::now();
        let before = self.tokens.len();
        self.tokens.retain(|_, expires_at| *expires_at > now);
        let removed = before - self.tokens.len();
        if removed > 0 {
            info!(
                "Token blacklist cleanup: removed {} expired entries, {} remaining",
                removed,
                self.tokens.len()
            );
        }
    }
}

impl Default for TokenBlacklist {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_future_exp() -> usize {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
            + 3600
    }

    #[tokio::test]
    async fn blacklisted_token_is_rejected() {
        let blacklist = TokenBlacklist::new();
        blacklist.blacklist_token("some.jwt.token", far_future_exp()).await;
        assert!(blacklist.is_blacklisted("some.jwt.token"));
        assert!(!blacklist.is_blacklisted("another.jwt.token"));
    }

    #[tokio::test]
    async fn expired_token_is_not_stored() {
        let blacklist = TokenBlacklist::new();
        blacklist.blacklist_token("stale.jwt.token", 1).await;
        assert!(!blacklist.is_blacklisted("stale.jwt.token"));
    }
}
