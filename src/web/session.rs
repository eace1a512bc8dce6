use cached::{Cached, TimedSizedCache};
use derive_getters::Getters;
use dto::profile::{Profile, Role};
use std::collections::HashMap;
use std::time::{Duration, Instant};

const CACHE_SIZE: usize = 1000;
const LIFESPAN_IN_SECONDS: u64 = 60 * 60 * 24 * 30;

/// Who is behind a request.
#[derive(Debug, Getters, PartialEq, Eq, Clone)]
pub struct Session {
    user_id: String,
    email: String,
    role: Role,
}

impl Session {
    pub fn new(user_id: String, email: String, role: Role) -> Self {
        Self {
            user_id,
            email,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&Profile> for Session {
    fn from(profile: &Profile) -> Self {
        Session::new(profile.id().clone(), profile.email().clone(), *profile.role())
    }
}

/// Sessions indexed by their token. Only 1000 sessions can be stored at a time,
/// and they expire after one month.
#[derive(Debug)]
pub struct SessionStorage {
    sessions: TimedSizedCache<String, Session>,
    lifespan: Duration,
    /// Tokens of each user, along with the moment they were stored.
    tokens_per_user: HashMap<String, HashMap<String, Instant>>,
}

impl SessionStorage {
    fn with_size_and_lifespan(size: usize, lifespan_in_seconds: u64) -> Self {
        Self {
            sessions: TimedSizedCache::with_size_and_lifespan(size, lifespan_in_seconds),
            lifespan: Duration::from_secs(lifespan_in_seconds),
            tokens_per_user: HashMap::new(),
        }
    }

    pub fn store(&mut self, token: String, session: Session) {
        self.prune_expired_tokens();

        let user_id = session.user_id().clone();
        self.sessions.cache_set(token.clone(), session);
        self.tokens_per_user
            .entry(user_id)
            .or_default()
            .insert(token, Instant::now());
    }

    /// Tokens older than the lifespan only point to expired sessions.
    /// Tokens evicted because the storage is full stay until then.
    fn prune_expired_tokens(&mut self) {
        let lifespan = self.lifespan;
        self.tokens_per_user.retain(|_, tokens| {
            tokens.retain(|_, stored_at| stored_at.elapsed() < lifespan);
            !tokens.is_empty()
        });
    }

    pub fn get(&mut self, token: &str) -> Option<&Session> {
        self.sessions.cache_get(token)
    }

    pub fn remove(&mut self, token: &str) -> Option<Session> {
        let session = self.sessions.cache_remove(token)?;
        if let Some(tokens) = self.tokens_per_user.get_mut(session.user_id()) {
            tokens.remove(token);
            if tokens.is_empty() {
                self.tokens_per_user.remove(session.user_id());
            }
        }

        Some(session)
    }

    /// Drop every session of a user, so that they have to log in again.
    pub fn remove_user(&mut self, user_id: &str) -> usize {
        let tokens = self.tokens_per_user.remove(user_id).unwrap_or_default();
        tokens
            .keys()
            .filter_map(|token| self.sessions.cache_remove(token))
            .count()
    }
}

impl Default for SessionStorage {
    fn default() -> Self {
        Self::with_size_and_lifespan(CACHE_SIZE, LIFESPAN_IN_SECONDS)
    }
}
