//! `PostgreSQL` implementation of the `GameRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use gamecart_core::error::DomainError;
use gamecart_core::game::{Game, GameGenre, GameTag};
use gamecart_core::repository::GameRepository;

use crate::persistence_error;

const SELECT_GAMES: &str =
    "SELECT id, title, publisher_id, description, price, release_date, genres, tags FROM games";

#[derive(Debug, FromRow)]
struct GameRow {
    id: Uuid,
    title: String,
    publisher_id: Uuid,
    description: String,
    price: f64,
    release_date: DateTime<Utc>,
    genres: Vec<String>,
    tags: Vec<String>,
}

fn parse_all<T>(
    game_id: Uuid,
    what: &str,
    values: &[String],
    parse: fn(&str) -> Option<T>,
) -> Result<Vec<T>, DomainError> {
    values
        .iter()
        .map(|v| {
            parse(v).ok_or_else(|| {
                DomainError::PersistenceFailure(format!("game {game_id} has unknown {what} {v:?}"))
            })
        })
        .collect()
}

impl TryFrom<GameRow> for Game {
    type Error = DomainError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let genres = parse_all(row.id, "genre", &row.genres, GameGenre::parse)?;
        let tags = parse_all(row.id, "tag", &row.tags, GameTag::parse)?;
        Ok(Game {
            id: row.id,
            title: row.title,
            publisher_id: row.publisher_id,
            description: row.description,
            price: row.price,
            release_date: row.release_date,
            genres,
            tags,
        })
    }
}

/// PostgreSQL-backed catalog reader.
#[derive(Debug, Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    /// Creates a new `PgGameRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn get_by_id(&self, game_id: Uuid) -> Result<Option<Game>, DomainError> {
        let row = sqlx::query_as::<_, GameRow>(&format!("{SELECT_GAMES} WHERE id = $1"))
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("game lookup failed"))?;

        row.map(Game::try_from).transpose()
    }

    async fn get_by_ids(&self, game_ids: &[Uuid]) -> Result<Vec<Game>, DomainError> {
        if game_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, GameRow>(&format!(
            "{SELECT_GAMES} WHERE id = ANY($1) ORDER BY title, id"
        ))
        .bind(game_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence_error("game batch lookup failed"))?;

        rows.into_iter().map(Game::try_from).collect()
    }
}
