//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::sql::db_error;
use crate::domain::foundation::{AccessLevel, DomainError};
use crate::ports::{NewUser, UserRecord, UserRepository, UserUpdate};

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    userid: i64,
    username: String,
    password: Option<String>,
    level: Option<String>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.userid,
            username: row.username,
            password: row.password.unwrap_or_default(),
            level: AccessLevel::from_code(row.level.as_deref().unwrap_or_default()),
        }
    }
}

const SELECT_USER: &str = r#"
    SELECT userid::bigint AS userid, username::text AS username,
           password::text AS password, level::text AS level
    FROM users
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        let sql = format!("{} WHERE username = $1 LIMIT 1", SELECT_USER);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to look up user", e))?;
        Ok(row.map(UserRecord::from))
    }

    async fn create(&self, user: &NewUser) -> Result<i64, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, password, level)
            VALUES ($1, $2, $3)
            RETURNING userid::bigint
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.level.code())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create user", e))?;
        Ok(id)
    }

    async fn update(&self, id: i64, update: &UserUpdate) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                level = $3,
                password = COALESCE($4, password)
            WHERE userid = $1
            "#,
        )
        .bind(id)
        .bind(&update.username)
        .bind(update.level.code())
        .bind(&update.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update user", e))?;
        Ok(result.rows_affected() > 0)
    }
}
