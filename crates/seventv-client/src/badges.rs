//! Cosmetic badge lookups, cached per user for the life of the process.
//!
//! `has_badge` answers from the cache and never waits. A miss schedules one
//! background resolution for that `(badge, user)` pair; further misses for the
//! same pair while it is pending do not schedule another.


use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::SevenTvError;
use crate::models::Badge;

/// Remote lookups behind the badge cache.
pub trait BadgeResolver: Send + Sync + 'static {
    /// 7TV user id linked to a local chat user, if any.
    fn remote_user_id(
        &self,
        local_user_id: &str,
    ) -> impl Future<Output = Result<Option<String>, SevenTvError>> + Send;

    /// The badge the remote user currently displays, if any.
    fn active_badge(
        &self,
        remote_user_id: &str,
    ) -> impl Future<Output = Result<Option<Badge>, SevenTvError>> + Send;
}

#[derive(Default)]
struct BadgeState {
    /// badge name -> local user id -> has badge.
    resolved: HashMap<String, HashMap<String, bool>>,
    /// (badge name, local user id) pairs with a resolution running.
    pending: HashSet<(String, String)>,
}

struct Inner<R> {
    resolver: R,
    enabled: bool,
    state: Mutex<BadgeState>,
}

/// Cheap to clone; clones share the cache.
pub struct BadgeCache<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for BadgeCache<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> Inner<R> {
    fn lock(&self) -> MutexGuard<'_, BadgeState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<R: BadgeResolver> BadgeCache<R> {
    /// `enabled` mirrors the badge display setting; when off nothing resolves.
    pub fn new(resolver: R, enabled: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver,
                enabled,
                state: Mutex::new(BadgeState::default()),
            }),
        }
    }

    /// Cached answer for whether `local_user_id` displays `badge_name`.
    ///
    /// Returns `false` on a miss and starts resolving in the background.
    /// Must be called from within a Tokio runtime for the miss to resolve.
    pub fn has_badge(&self, local_user_id: &str, badge_name: &str) -> bool {
        if !self.inner.enabled {
            return false;
        }

        let key = (badge_name.to_string(), local_user_id.to_string());
        {
            let mut state = self.inner.lock();
            if let Some(hit) = state
                .resolved
                .get(badge_name)
                .and_then(|users| users.get(local_user_id))
            {
                return *hit;
            }
            if !state.pending.insert(key.clone()) {
                return false;
            }
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(local_user_id, badge_name, "No runtime to resolve badge on");
            self.inner.lock().pending.remove(&key);
            return false;
        };
        let inner = Arc::clone(&self.inner);
        handle.spawn(async move {
            let (badge_name, local_user_id) = key;
            let result = resolve(&inner.resolver, &local_user_id, &badge_name).await;

            let mut state = inner.lock();
            state.pending.remove(&(badge_name.clone(), local_user_id.clone()));
            match result {
                Ok(has) => {
                    tracing::debug!(%local_user_id, %badge_name, has, "Badge resolved");
                    state
                        .resolved
                        .entry(badge_name)
                        .or_default()
                        .insert(local_user_id, has);
                }
                Err(e) => {
                    tracing::warn!(error = %e, %local_user_id, %badge_name, "Badge lookup failed");
                }
            }
        });
        false
    }

    /// Number of resolutions still running.
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

async fn resolve<R: BadgeResolver>(
    resolver: &R,
    local_user_id: &str,
    badge_name: &str,
) -> Result<bool, SevenTvError> {
    let Some(remote_id) = resolver.remote_user_id(local_user_id).await? else {
        return Ok(false);
    };
    let badge = resolver.active_badge(&remote_id).await?;
    Ok(badge.is_some_and(|b| b.name == badge_name))
}
