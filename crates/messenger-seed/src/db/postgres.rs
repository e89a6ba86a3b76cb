//! PostgreSQL backend.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use super::store::{ChatStore, EntityKind, StoreError};
use crate::generators::{GeneratedChat, GeneratedMembership, GeneratedMessage, GeneratedUser};

/// Table definitions used when bootstrapping an empty database.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS chats (
        id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users_chats (
        user_id BIGINT NOT NULL REFERENCES users (id),
        chat_id BIGINT NOT NULL REFERENCES chats (id),
        PRIMARY KEY (user_id, chat_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id BIGINT PRIMARY KEY,
        content TEXT NOT NULL,
        author_id BIGINT NOT NULL REFERENCES users (id),
        created_at TIMESTAMPTZ NOT NULL,
        chat_id BIGINT NOT NULL REFERENCES chats (id)
    )
    "#,
];

/// [`ChatStore`] writing to PostgreSQL, one statement per row.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and verifies the database answers.
    pub async fn connect(options: PgConnectOptions) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.ping().await?;
        Ok(store)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Creates the tables if they are missing.
    pub async fn create_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Schema ready");
        Ok(())
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ChatStore for PgStore {
    async fn clear(&self, kind: EntityKind) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {}", kind.table());
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, user: &GeneratedUser) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO users (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(&user.name)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_chat(&self, chat: &GeneratedChat) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO chats (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(chat.id)
            .bind(&chat.name)
            .bind(chat.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_membership(&self, membership: &GeneratedMembership) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO users_chats (user_id, chat_id) VALUES ($1, $2)")
            .bind(membership.user_id)
            .bind(membership.chat_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_message(&self, message: &GeneratedMessage) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, content, author_id, created_at, chat_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id)
        .bind(&message.content)
        .bind(message.author_id)
        .bind(message.created_at)
        .bind(message.chat_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
