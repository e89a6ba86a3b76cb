//! Database seeding utilities.

use std::fmt;

use rand::Rng;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::store::{ChatStore, EntityKind, StoreError};
use crate::generators::{
    ChatGenerator, EntityId, MembershipGenerator, MessageGenerator, UserGenerator,
};

/// Identifies the row a failed write was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKey {
    /// A whole-collection clear.
    All,
    Id(EntityId),
    Membership { user_id: EntityId, chat_id: EntityId },
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::All => f.write_str("all rows"),
            RowKey::Id(id) => write!(f, "id {id}"),
            RowKey::Membership { user_id, chat_id } => {
                write!(f, "user {user_id}, chat {chat_id}")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to write {kind} ({key}): {source}")]
    Persistence {
        kind: EntityKind,
        key: RowKey,
        source: StoreError,
    },
    #[error("Precondition failed: {0}")]
    Precondition(String),
}

impl SeedError {
    fn persistence(kind: EntityKind, key: RowKey) -> impl FnOnce(StoreError) -> Self {
        move |source| SeedError::Persistence { kind, key, source }
    }
}

/// Writes generated rows through a [`ChatStore`].
///
/// Every stage generates one entity, writes it, and only then draws the next.
/// A failed write stops the stage; rows already written stay in place.
pub struct Seeder<'a, S: ChatStore + ?Sized> {
    store: &'a S,
    progress_interval: usize,
}

impl<'a, S: ChatStore + ?Sized> Seeder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            progress_interval: 1000,
        }
    }

    /// Sets how often (in rows) progress is logged. Zero disables it.
    pub fn with_progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = rows;
        self
    }

    /// Clears all seeded data.
    ///
    /// **WARNING**: This deletes all data from the tables. Use with caution.
    pub async fn clear_all(&self) -> Result<(), SeedError> {
        info!("Clearing existing data...");

        // Order matters due to foreign key constraints
        for kind in EntityKind::CLEAR_ORDER {
            self.store
                .clear(kind)
                .await
                .map_err(SeedError::persistence(kind, RowKey::All))?;
            debug!("Cleared {kind}");
        }

        info!("Existing data cleared");
        Ok(())
    }

    /// Generates and writes `count` users, returning their ids.
    pub async fn seed_users(
        &self,
        count: usize,
        base_time: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<EntityId>, SeedError> {
        info!("Seeding {count} users...");

        let mut user_gen = UserGenerator::new(base_time);
        let mut ids = Vec::with_capacity(count);

        for i in 0..count {
            let user = user_gen.generate(rng);
            self.store
                .insert_user(&user)
                .await
                .map_err(SeedError::persistence(EntityKind::Users, RowKey::Id(user.id)))?;
            ids.push(user.id);
            self.report(i + 1, count, EntityKind::Users);
        }

        info!("Seeded {} users", ids.len());
        Ok(ids)
    }

    /// Generates and writes `count` chats, returning their ids.
    pub async fn seed_chats(
        &self,
        count: usize,
        base_time: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<EntityId>, SeedError> {
        info!("Seeding {count} chats...");

        let mut chat_gen = ChatGenerator::new(base_time);
        let mut ids = Vec::with_capacity(count);

        for i in 0..count {
            let chat = chat_gen.generate(rng);
            self.store
                .insert_chat(&chat)
                .await
                .map_err(SeedError::persistence(EntityKind::Chats, RowKey::Id(chat.id)))?;
            ids.push(chat.id);
            self.report(i + 1, count, EntityKind::Chats);
        }

        info!("Seeded {} chats", ids.len());
        Ok(ids)
    }

    /// Links users to every chat. Returns the number of memberships written.
    pub async fn seed_memberships(
        &self,
        membership_gen: &MembershipGenerator,
        user_ids: &[EntityId],
        chat_ids: &[EntityId],
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Seeding memberships for {} chats...", chat_ids.len());

        let mut written = 0;
        for &chat_id in chat_ids {
            for membership in membership_gen.generate_for_chat(chat_id, user_ids, rng) {
                self.store
                    .insert_membership(&membership)
                    .await
                    .map_err(SeedError::persistence(
                        EntityKind::Memberships,
                        RowKey::Membership {
                            user_id: membership.user_id,
                            chat_id: membership.chat_id,
                        },
                    ))?;
                written += 1;
            }
        }

        info!("Seeded {written} memberships");
        Ok(written)
    }

    /// Generates and writes `count` messages.
    ///
    /// A zero count succeeds without looking at the pools. Otherwise both pools
    /// must be non-empty, checked before anything is written.
    pub async fn seed_messages(
        &self,
        count: usize,
        user_ids: &[EntityId],
        chat_ids: &[EntityId],
        base_time: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        if count == 0 {
            info!("No messages requested");
            return Ok(0);
        }

        let mut msg_gen = MessageGenerator::new(user_ids, chat_ids, base_time).ok_or_else(|| {
            SeedError::Precondition(format!(
                "{count} messages requested but pools have {} users and {} chats",
                user_ids.len(),
                chat_ids.len()
            ))
        })?;

        info!("Seeding {count} messages...");

        for i in 0..count {
            let message = msg_gen.generate(rng);
            self.store
                .insert_message(&message)
                .await
                .map_err(SeedError::persistence(
                    EntityKind::Messages,
                    RowKey::Id(message.id),
                ))?;
            self.report(i + 1, count, EntityKind::Messages);
        }

        info!("Seeded {count} messages");
        Ok(count)
    }

    fn report(&self, done: usize, total: usize, kind: EntityKind) {
        if self.progress_interval > 0 && done % self.progress_interval == 0 {
            info!("  Seeded {done}/{total} {kind}");
        }
    }
}
