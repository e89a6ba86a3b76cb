//! In-process backend for dry runs and tests.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::store::{ChatStore, EntityKind, StoreError};
use crate::generators::{
    EntityId, GeneratedChat, GeneratedMembership, GeneratedMessage, GeneratedUser,
};

/// Copy of everything held by a [`MemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    pub users: BTreeMap<EntityId, GeneratedUser>,
    pub chats: BTreeMap<EntityId, GeneratedChat>,
    pub memberships: BTreeSet<GeneratedMembership>,
    pub messages: BTreeMap<EntityId, GeneratedMessage>,
}

impl MemorySnapshot {
    /// Returns the number of rows held for `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Users => self.users.len(),
            EntityKind::Chats => self.chats.len(),
            EntityKind::Memberships => self.memberships.len(),
            EntityKind::Messages => self.messages.len(),
        }
    }

    /// Returns the member ids of one chat.
    pub fn members_of(&self, chat_id: EntityId) -> Vec<EntityId> {
        self.memberships
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .map(|m| m.user_id)
            .collect()
    }
}

/// [`ChatStore`] that keeps rows in memory.
///
/// Enforces the same keys as the PostgreSQL schema: unique primary keys,
/// existing referenced rows on insert, and no dangling references on clear.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<MemorySnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> MemorySnapshot {
        self.tables.lock().await.clone()
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn clear(&self, kind: EntityKind) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;

        match kind {
            EntityKind::Messages => tables.messages.clear(),
            EntityKind::Memberships => tables.memberships.clear(),
            EntityKind::Chats => {
                let referenced = !tables.memberships.is_empty() || !tables.messages.is_empty();
                if referenced && !tables.chats.is_empty() {
                    return Err(StoreError::constraint(kind, "chats still referenced"));
                }
                tables.chats.clear();
            }
            EntityKind::Users => {
                let referenced = !tables.memberships.is_empty() || !tables.messages.is_empty();
                if referenced && !tables.users.is_empty() {
                    return Err(StoreError::constraint(kind, "users still referenced"));
                }
                tables.users.clear();
            }
        }

        Ok(())
    }

    async fn insert_user(&self, user: &GeneratedUser) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.users.contains_key(&user.id) {
            return Err(StoreError::constraint(
                EntityKind::Users,
                format!("duplicate id {}", user.id),
            ));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn insert_chat(&self, chat: &GeneratedChat) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.chats.contains_key(&chat.id) {
            return Err(StoreError::constraint(
                EntityKind::Chats,
                format!("duplicate id {}", chat.id),
            ));
        }
        tables.chats.insert(chat.id, chat.clone());
        Ok(())
    }

    async fn insert_membership(&self, membership: &GeneratedMembership) -> Result<(), StoreError> {
        let kind = EntityKind::Memberships;
        let mut tables = self.tables.lock().await;

        if !tables.users.contains_key(&membership.user_id) {
            return Err(StoreError::constraint(
                kind,
                format!("unknown user {}", membership.user_id),
            ));
        }
        if !tables.chats.contains_key(&membership.chat_id) {
            return Err(StoreError::constraint(
                kind,
                format!("unknown chat {}", membership.chat_id),
            ));
        }
        if !tables.memberships.insert(*membership) {
            return Err(StoreError::constraint(
                kind,
                format!(
                    "duplicate pair (user {}, chat {})",
                    membership.user_id, membership.chat_id
                ),
            ));
        }
        Ok(())
    }

    async fn insert_message(&self, message: &GeneratedMessage) -> Result<(), StoreError> {
        let kind = EntityKind::Messages;
        let mut tables = self.tables.lock().await;

        if tables.messages.contains_key(&message.id) {
            return Err(StoreError::constraint(
                kind,
                format!("duplicate id {}", message.id),
            ));
        }
        if !tables.users.contains_key(&message.author_id) {
            return Err(StoreError::constraint(
                kind,
                format!("unknown author {}", message.author_id),
            ));
        }
        if !tables.chats.contains_key(&message.chat_id) {
            return Err(StoreError::constraint(
                kind,
                format!("unknown chat {}", message.chat_id),
            ));
        }
        tables.messages.insert(message.id, message.clone());
        Ok(())
    }
}
