//! Persistence port used by the seeder.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::generators::{GeneratedChat, GeneratedMembership, GeneratedMessage, GeneratedUser};

/// Entity types written by the seeder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Users,
    Chats,
    Memberships,
    Messages,
}

impl EntityKind {
    /// Order in which collections must be cleared to respect foreign keys.
    pub const CLEAR_ORDER: [EntityKind; 4] = [
        EntityKind::Messages,
        EntityKind::Memberships,
        EntityKind::Chats,
        EntityKind::Users,
    ];

    /// Returns the backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Chats => "chats",
            EntityKind::Memberships => "users_chats",
            EntityKind::Messages => "messages",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Constraint violation on {table}: {detail}")]
    Constraint { table: &'static str, detail: String },
}

impl StoreError {
    pub(crate) fn constraint(kind: EntityKind, detail: impl Into<String>) -> Self {
        StoreError::Constraint {
            table: kind.table(),
            detail: detail.into(),
        }
    }
}

/// Write interface for generated rows.
///
/// Calls are issued one at a time and awaited before the next. Implementations
/// must not reorder writes.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Deletes every row of one entity type.
    async fn clear(&self, kind: EntityKind) -> Result<(), StoreError>;

    async fn insert_user(&self, user: &GeneratedUser) -> Result<(), StoreError>;

    async fn insert_chat(&self, chat: &GeneratedChat) -> Result<(), StoreError>;

    async fn insert_membership(&self, membership: &GeneratedMembership) -> Result<(), StoreError>;

    async fn insert_message(&self, message: &GeneratedMessage) -> Result<(), StoreError>;
}
