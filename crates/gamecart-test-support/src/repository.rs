//! In-memory and failing implementations of the
//! repository ports.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use gamecart_core::error::DomainError;
use gamecart_core::game::Game;
use gamecart_core::repository::{GameRepository, UserRepository};
use gamecart_core::user::{Player, User};
use uuid::Uuid;

/// A user repository backed by a `HashMap`. Enforces the same version check
/// as the `PostgreSQL` implementation and records every successful update.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
    updates: Mutex<Vec<User>>,
    fail_updates: bool,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with a single player.
    #[must_use]
    pub fn with_player(player: Player) -> Self {
        let repo = Self::new();
        repo.insert(User::Player(player));
        repo
    }

    /// Make every `update` call fail with a persistence error. Reads still
    /// succeed.
    #[must_use]
    pub fn with_failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    /// Insert or replace a user record.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id(), user);
    }

    /// Returns the currently stored player, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn player(&self, user_id: Uuid) -> Option<Player> {
        self.users
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .and_then(User::into_player)
    }

    /// Returns a snapshot of every record passed to a successful `update`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn updates(&self) -> Vec<User> {
        self.updates.lock().unwrap().clone()
    }
}

fn with_version(user: &User, version: i64) -> User {
    let mut stored = user.clone();
    match &mut stored {
        User::Player(p) => p.version = version,
        User::Publisher(p) => p.version = version,
        User::Admin(a) => a.version = version,
    }
    stored
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        if self.fail_updates {
            return Err(DomainError::PersistenceFailure("write timed out".into()));
        }
        let mut users = self.users.lock().unwrap();
        let current = users
            .get(&user.id())
            .ok_or(DomainError::UserNotFound(user.id()))?;
        if current.version() != user.version() {
            return Err(DomainError::ConcurrencyConflict {
                user_id: user.id(),
                expected_version: user.version(),
            });
        }
        users.insert(user.id(), with_version(user, user.version() + 1));
        self.updates.lock().unwrap().push(user.clone());
        Ok(())
    }
}

/// A user repository that always returns a persistence error.
#[derive(Debug)]
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn get_by_id(&self, _user_id: Uuid) -> Result<Option<User>, DomainError> {
        Err(DomainError::PersistenceFailure("connection refused".into()))
    }

    async fn update(&self, _user: &User) -> Result<(), DomainError> {
        Err(DomainError::PersistenceFailure("connection refused".into()))
    }
}

/// A catalog backed by a `Vec`, returning batch results in catalog order.
/// Records the id lists of every batch lookup.
#[derive(Debug, Default)]
pub struct InMemoryGameRepository {
    games: Vec<Game>,
    batch_lookups: Mutex<Vec<Vec<Uuid>>>,
}

impl InMemoryGameRepository {
    /// Create a catalog holding `games`.
    #[must_use]
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games,
            batch_lookups: Mutex::new(Vec::new()),
        }
    }

    /// Returns the id lists passed to `get_by_ids`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn batch_lookups(&self) -> Vec<Vec<Uuid>> {
        self.batch_lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn get_by_id(&self, game_id: Uuid) -> Result<Option<Game>, DomainError> {
        Ok(self.games.iter().find(|g| g.id == game_id).cloned())
    }

    async fn get_by_ids(&self, game_ids: &[Uuid]) -> Result<Vec<Game>, DomainError> {
        self.batch_lookups.lock().unwrap().push(game_ids.to_vec());
        Ok(self
            .games
            .iter()
            .filter(|g| game_ids.contains(&g.id))
            .cloned()
            .collect())
    }
}

/// A catalog that always returns a persistence error.
#[derive(Debug)]
pub struct FailingGameRepository;

#[async_trait]
impl GameRepository for FailingGameRepository {
    async fn get_by_id(&self, _game_id: Uuid) -> Result<Option<Game>, DomainError> {
        Err(DomainError::PersistenceFailure("catalog unavailable".into()))
    }

    async fn get_by_ids(&self, _game_ids: &[Uuid]) -> Result<Vec<Game>, DomainError> {
        Err(DomainError::PersistenceFailure("catalog unavailable".into()))
    }
}
