//! `PostgreSQL` implementation of the `UserRepository` trait.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use gamecart_core::error::DomainError;
use gamecart_core::repository::UserRepository;
use gamecart_core::user::{AdminAccount, Player, PublisherAccount, Role, User};

use crate::persistence_error;

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    role: String,
    name: String,
    email: String,
    cpf: String,
    library: Vec<Uuid>,
    cart: Vec<Uuid>,
    wishlist: Vec<Uuid>,
    version: i64,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role).ok_or_else(|| {
            DomainError::PersistenceFailure(format!(
                "user {} has unknown role {:?}",
                row.id, row.role
            ))
        })?;
        Ok(match role {
            Role::Player => User::Player(Player {
                id: row.id,
                name: row.name,
                email: row.email,
                cpf: row.cpf,
                library: row.library,
                cart: row.cart,
                wishlist: row.wishlist,
                version: row.version,
            }),
            Role::Publisher => User::Publisher(PublisherAccount {
                id: row.id,
                name: row.name,
                email: row.email,
                version: row.version,
            }),
            Role::Admin => User::Admin(AdminAccount {
                id: row.id,
                name: row.name,
                email: row.email,
                version: row.version,
            }),
        })
    }
}

/// PostgreSQL-backed user repository.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Creates a new `PgUserRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, user_id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(persistence_error("user lookup failed"))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, role, name, email, cpf, library, cart, wishlist, version \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence_error("user lookup failed"))?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = match user {
            User::Player(player) => {
                sqlx::query(
                    "UPDATE users \
                     SET name = $2, email = $3, cpf = $4, library = $5, cart = $6, \
                         wishlist = $7, version = version + 1 \
                     WHERE id = $1 AND version = $8",
                )
                .bind(player.id)
                .bind(&player.name)
                .bind(&player.email)
                .bind(&player.cpf)
                .bind(&player.library)
                .bind(&player.cart)
                .bind(&player.wishlist)
                .bind(player.version)
                .execute(&self.pool)
                .await
            }
            User::Publisher(PublisherAccount {
                id,
                name,
                email,
                version,
            })
            | User::Admin(AdminAccount {
                id,
                name,
                email,
                version,
            }) => {
                sqlx::query(
                    "UPDATE users SET name = $2, email = $3, version = version + 1 \
                     WHERE id = $1 AND version = $4",
                )
                .bind(id)
                .bind(name)
                .bind(email)
                .bind(version)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(persistence_error("user update failed"))?;

        if result.rows_affected() == 1 {
            debug!(user_id = %user.id(), version = user.version() + 1, "user updated");
            return Ok(());
        }
        if self.exists(user.id()).await? {
            Err(DomainError::ConcurrencyConflict {
                user_id: user.id(),
                expected_version: user.version(),
            })
        } else {
            Err(DomainError::UserNotFound(user.id()))
        }
    }
}
