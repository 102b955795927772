//! Process-wide mapping from game id to session.
//!
//! Each session sits behind its own mutex so requests for the same game are
//! serialized while different games proceed independently. The map lock is
//! only held for lookup, insertion and eviction.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::core::{GameConfig, GameError, GameSession, Player};

/// Opaque game identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GameId(Uuid);

impl GameId {
    pub fn new() -> Self {
        GameId(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for GameId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(GameId).map_err(|_| GameError::NotFound)
    }
}

/// Shared handle to a session.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Bounds on how many sessions are kept and for how long.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Sessions beyond this count evict the least recently used one.
    pub max_sessions: usize,
    /// Sessions untouched for longer than this are dropped by [`SessionRegistry::evict_idle`].
    pub idle_timeout: Duration,
    /// Rules for newly created games.
    pub game: GameConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1024,
            idle_timeout: Duration::from_secs(60 * 60),
            game: GameConfig::default(),
        }
    }
}

struct Entry {
    session: SessionHandle,
    last_access: Instant,
}

/// Registry of live game sessions.
pub struct SessionRegistry {
    config: RegistryConfig,
    sessions: Mutex<HashMap<GameId, Entry>>,
}

/// Lock a session, recovering the data if a previous holder panicked.
pub fn lock_session(handle: &SessionHandle) -> MutexGuard<'_, GameSession> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn map(&self) -> MutexGuard<'_, HashMap<GameId, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a new game with the registry's default rules.
    pub fn create_game(&self) -> (GameId, Player) {
        self.create_game_with(self.config.game.clone())
    }

    /// Create a new game with explicit rules. Evicts the least recently used
    /// session first if the registry is full.
    pub fn create_game_with(&self, config: GameConfig) -> (GameId, Player) {
        let session = GameSession::new(config);
        let current = session.current_player();
        let id = GameId::new();

        let mut map = self.map();
        while map.len() >= self.config.max_sessions.max(1) {
            let oldest = map
                .iter()
                .min_by_key(|(_, e)| e.last_access)
                .map(|(id, _)| *id);
            match oldest {
                Some(old) => {
                    map.remove(&old);
                    log::warn!("registry full, evicted game {}", old);
                }
                None => break,
            }
        }
        map.insert(
            id,
            Entry {
                session: Arc::new(Mutex::new(session)),
                last_access: Instant::now(),
            },
        );
        log::info!("created game {}", id);
        (id, current)
    }

    /// Look up a session and mark it as recently used.
    pub fn get_game(&self, id: &GameId) -> Result<SessionHandle, GameError> {
        let mut map = self.map();
        let entry = map.get_mut(id).ok_or(GameError::NotFound)?;
        entry.last_access = Instant::now();
        Ok(Arc::clone(&entry.session))
    }

    /// Run `f` with exclusive access to the session.
    pub fn with_game<R>(
        &self,
        id: &GameId,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Result<R, GameError> {
        let handle = self.get_game(id)?;
        let mut session = lock_session(&handle);
        Ok(f(&mut session))
    }

    /// Drop a session. Returns `NotFound` if it did not exist.
    pub fn remove_game(&self, id: &GameId) -> Result<(), GameError> {
        self.map()
            .remove(id)
            .map(|_| log::info!("removed game {}", id))
            .ok_or(GameError::NotFound)
    }

    /// Drop sessions idle since before `now - idle_timeout`. Returns how many were dropped.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let timeout = self.config.idle_timeout;
        let mut map = self.map();
        let before = map.len();
        map.retain(|_, e| now.saturating_duration_since(e.last_access) <= timeout);
        let evicted = before - map.len();
        if evicted > 0 {
            log::warn!("evicted {} idle games", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
