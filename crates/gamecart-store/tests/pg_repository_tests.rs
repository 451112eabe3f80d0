//! Integration tests for the `PostgreSQL` stores.
//!
//! These need a database: run with `DATABASE_URL` set and `--ignored`.

use chrono::{TimeZone, Utc};
use gamecart_core::error::DomainError;
use gamecart_core::game::{GameGenre, GameTag};
use gamecart_core::publisher::{NotificationMessage, NotificationPublisher};
use gamecart_core::repository::{GameRepository, UserRepository};
use gamecart_core::user::{Role, User};
use gamecart_store::pg_game_repository::PgGameRepository;
use gamecart_store::pg_outbox_publisher::PgOutboxPublisher;
use gamecart_store::pg_user_repository::PgUserRepository;
use sqlx::PgPool;
use uuid::Uuid;

async fn seed_user(pool: &PgPool, id: Uuid, role: Role, cart: &[Uuid]) {
    sqlx::query("INSERT INTO users (id, role, name, email, cart) VALUES ($1, $2, $3, $4, $5)")
        .bind(id)
        .bind(role.as_str())
        .bind("Ana")
        .bind("ana@example.com")
        .bind(cart)
        .execute(pool)
        .await
        .unwrap();
}

async fn seed_game(pool: &PgPool, id: Uuid, title: &str, price: f64) {
    sqlx::query(
        "INSERT INTO games (id, title, publisher_id, price, release_date, genres, tags) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(title)
    .bind(Uuid::new_v4())
    .bind(price)
    .bind(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
    .bind(vec!["RPG".to_owned(), "Adventure".to_owned()])
    .bind(vec!["Singleplayer".to_owned()])
    .execute(pool)
    .await
    .unwrap();
}

// --- users ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_by_id_returns_none_for_unknown_user(pool: PgPool) {
    let repo = PgUserRepository::new(pool);

    let user = repo.get_by_id(Uuid::new_v4()).await.unwrap();

    assert!(user.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_persists_cart_and_bumps_version(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let g1 = Uuid::new_v4();
    seed_user(&pool, user_id, Role::Player, &[g1]).await;
    let repo = PgUserRepository::new(pool);

    let mut player = repo
        .get_by_id(user_id)
        .await
        .unwrap()
        .and_then(User::into_player)
        .unwrap();
    assert_eq!(player.cart, vec![g1]);
    assert_eq!(player.version, 0);

    player.transfer_cart_to_library();
    repo.update(&User::Player(player)).await.unwrap();

    let reloaded = repo
        .get_by_id(user_id)
        .await
        .unwrap()
        .and_then(User::into_player)
        .unwrap();
    assert!(reloaded.cart.is_empty());
    assert_eq!(reloaded.library, vec![g1]);
    assert_eq!(reloaded.version, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_with_stale_version_is_a_conflict(pool: PgPool) {
    let user_id = Uuid::new_v4();
    seed_user(&pool, user_id, Role::Player, &[]).await;
    let repo = PgUserRepository::new(pool);
    let first = repo.get_by_id(user_id).await.unwrap().unwrap();
    let second = first.clone();

    repo.update(&first).await.unwrap();
    let result = repo.update(&second).await;

    assert!(matches!(
        result,
        Err(DomainError::ConcurrencyConflict {
            expected_version: 0,
            ..
        })
    ));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_of_missing_user_is_not_found(pool: PgPool) {
    let repo = PgUserRepository::new(pool);
    let ghost = User::Player(gamecart_core::user::Player::new(
        Uuid::new_v4(),
        "Ghost",
        "ghost@example.com",
    ));

    let result = repo.update(&ghost).await;

    assert!(matches!(result, Err(DomainError::UserNotFound(_))));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_publisher_role_loads_as_publisher(pool: PgPool) {
    let user_id = Uuid::new_v4();
    seed_user(&pool, user_id, Role::Publisher, &[]).await;
    let repo = PgUserRepository::new(pool);

    let user = repo.get_by_id(user_id).await.unwrap().unwrap();

    assert_eq!(user.role(), Role::Publisher);
}

// --- games ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_by_ids_omits_unknown_ids(pool: PgPool) {
    let g1 = Uuid::new_v4();
    let g2 = Uuid::new_v4();
    seed_game(&pool, g1, "Beta", 20.0).await;
    seed_game(&pool, g2, "Alpha", 10.0).await;
    let repo = PgGameRepository::new(pool);

    let games = repo.get_by_ids(&[g1, Uuid::new_v4(), g2]).await.unwrap();

    let ids: Vec<Uuid> = games.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![g2, g1]);
    assert_eq!(games[0].genres, vec![GameGenre::RPG, GameGenre::Adventure]);
    assert_eq!(games[0].tags, vec![GameTag::Singleplayer]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_game_by_id(pool: PgPool) {
    let g1 = Uuid::new_v4();
    seed_game(&pool, g1, "Alpha", 49.9).await;
    let repo = PgGameRepository::new(pool);

    let game = repo.get_by_id(g1).await.unwrap().unwrap();
    let missing = repo.get_by_id(Uuid::new_v4()).await.unwrap();

    assert_eq!(game.title, "Alpha");
    assert!((game.price - 49.9).abs() < f64::EPSILON);
    assert!(missing.is_none());
}

// --- outbox ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_publish_writes_pending_outbox_row_once(pool: PgPool) {
    let publisher = PgOutboxPublisher::new(pool);
    let message = NotificationMessage {
        message_id: Uuid::new_v4(),
        message_group: "checkout".to_owned(),
        event_type: "cart.checkout_completed".to_owned(),
        payload: serde_json::json!({ "TotalPrice": 50.0 }),
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    };

    publisher
        .publish("checkout-completed", &message)
        .await
        .unwrap();
    publisher
        .publish("checkout-completed", &message)
        .await
        .unwrap();

    let pending = publisher.pending(10).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].topic, "checkout-completed");
    assert_eq!(pending[0].message, message);
}
