//! Repositories for user records
//!
//! [`UserRepository`] is the document-store seam: create, list, find by id and
//! overwrite by id. The PostgreSQL adapter keeps each user's exercises in a
//! JSONB column; the in-memory adapter lives in [`memory`].

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{FromRow, PgPool, types::Json};
use tracing::info;
use uuid::Uuid;

use crate::models::{Exercise, NewUser, User, UserId, UserSummary};

pub mod memory;

pub use memory::InMemoryUserRepository;

/// Store operations the service relies on
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user with an empty exercise log
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// All users, id and username only, in creation order
    async fn list(&self) -> DatabaseResult<Vec<UserSummary>>;

    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> DatabaseResult<Option<User>>;

    /// Overwrite the stored exercise log of an existing user
    ///
    /// Last writer wins; there is no version check.
    async fn save(&self, user: &User) -> DatabaseResult<()>;

    /// Release store resources
    async fn close(&self);
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    exercises: Json<Vec<Exercise>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.into(),
            username: row.username,
            exercises: row.exercises.0,
        }
    }
}

#[derive(FromRow)]
struct UserSummaryRow {
    id: Uuid,
    username: String,
}

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let id = UserId::generate();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, exercises)
            VALUES ($1, $2, '[]'::jsonb)
            RETURNING id, username, exercises
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new_user.username)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.into())
    }

    async fn list(&self) -> DatabaseResult<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT id, username
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let users = rows
            .into_iter()
            .map(|row| UserSummary {
                username: row.username,
                id: row.id.into(),
            })
            .collect();

        Ok(users)
    }

    async fn find_by_id(&self, id: &UserId) -> DatabaseResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, exercises
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(User::from))
    }

    async fn save(&self, user: &User) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET exercises = $2
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(Json(&user.exercises))
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(())
    }

    async fn close(&self) {
        common::database::close_pool(&self.pool).await;
    }
}
