//! Store wrappers shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::memory::{MemorySnapshot, MemoryStore};
use super::store::{ChatStore, EntityKind, StoreError};
use crate::generators::{GeneratedChat, GeneratedMembership, GeneratedMessage, GeneratedUser};

/// Delegates to a [`MemoryStore`] and fails the n-th insert of one kind.
pub(crate) struct FailingStore {
    inner: MemoryStore,
    fail_kind: EntityKind,
    fail_at: usize,
    seen: AtomicUsize,
}

impl FailingStore {
    pub(crate) fn new(fail_kind: EntityKind, fail_at: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_kind,
            fail_at,
            seen: AtomicUsize::new(0),
        }
    }

    pub(crate) async fn snapshot(&self) -> MemorySnapshot {
        self.inner.snapshot().await
    }

    fn check(&self, kind: EntityKind) -> Result<(), StoreError> {
        if kind != self.fail_kind {
            return Ok(());
        }
        if self.seen.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_at {
            return Err(StoreError::constraint(kind, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatStore for FailingStore {
    async fn clear(&self, kind: EntityKind) -> Result<(), StoreError> {
        self.inner.clear(kind).await
    }

    async fn insert_user(&self, user: &GeneratedUser) -> Result<(), StoreError> {
        self.check(EntityKind::Users)?;
        self.inner.insert_user(user).await
    }

    async fn insert_chat(&self, chat: &GeneratedChat) -> Result<(), StoreError> {
        self.check(EntityKind::Chats)?;
        self.inner.insert_chat(chat).await
    }

    async fn insert_membership(&self, m: &GeneratedMembership) -> Result<(), StoreError> {
        self.check(EntityKind::Memberships)?;
        self.inner.insert_membership(m).await
    }

    async fn insert_message(&self, m: &GeneratedMessage) -> Result<(), StoreError> {
        self.check(EntityKind::Messages)?;
        self.inner.insert_message(m).await
    }
}
