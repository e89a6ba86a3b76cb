//! Fluent builder for seeding a complete dataset.

use std::time::Instant;

use rand::Rng;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::config::{ConfigError, SeedConfig};
use crate::db::{ChatStore, SeedError, Seeder};
use crate::generators::{EntityId, MembershipGenConfig, MembershipGenerator};

/// Result of seeding a scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    pub user_ids: Vec<EntityId>,
    pub chat_ids: Vec<EntityId>,
    pub membership_count: usize,
    pub message_count: usize,
    /// Metrics from the run (populated if metrics tracking enabled).
    pub metrics: Option<ScenarioMetrics>,
}

/// Row counts and timing from a seeding run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioMetrics {
    /// Time spent clearing and seeding (milliseconds).
    pub seeding_time_ms: u64,
    pub user_count: usize,
    pub chat_count: usize,
    pub membership_count: usize,
    pub message_count: usize,
}

/// Builder for seeding users, chats, memberships and messages.
///
/// # Example
///
/// ```rust,ignore
/// let store = MemoryStore::new();
/// let result = ScenarioBuilder::new()
///     .with_users(3)
///     .with_chats(1)
///     .with_messages(10)
///     .build(&store, &mut rng)
///     .await?;
/// ```
pub struct ScenarioBuilder {
    user_count: usize,
    chat_count: usize,
    message_count: usize,
    membership_config: MembershipGenConfig,

    // Misc
    base_time: Option<OffsetDateTime>,
    progress_interval: usize,
    track_metrics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a new scenario builder with default settings.
    pub fn new() -> Self {
        let config = SeedConfig::default();
        Self {
            user_count: config.user_count,
            chat_count: config.chat_count,
            message_count: config.message_count,
            membership_config: MembershipGenConfig::default(),
            base_time: None,
            progress_interval: config.progress_interval,
            track_metrics: false,
        }
    }

    /// Creates a builder from a loaded configuration.
    ///
    /// Fails if the configured members-per-chat range is out of bounds.
    pub fn from_config(config: &SeedConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            user_count: config.user_count,
            chat_count: config.chat_count,
            message_count: config.message_count,
            membership_config: config.membership_config()?,
            base_time: None,
            progress_interval: config.progress_interval,
            track_metrics: false,
        })
    }

    pub fn with_users(mut self, count: usize) -> Self {
        self.user_count = count;
        self
    }

    pub fn with_chats(mut self, count: usize) -> Self {
        self.chat_count = count;
        self
    }

    pub fn with_messages(mut self, count: usize) -> Self {
        self.message_count = count;
        self
    }

    /// Fixes the reference time timestamps are generated back from.
    /// Defaults to the current time when the run starts.
    pub fn with_base_time(mut self, base_time: OffsetDateTime) -> Self {
        self.base_time = Some(base_time);
        self
    }

    pub fn with_progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = rows;
        self
    }

    /// Enables metrics tracking.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Clears the store, then seeds every entity type in dependency order.
    ///
    /// Stops at the first failing stage. Rows written before the failure are
    /// left in the store.
    pub async fn build<S: ChatStore + ?Sized>(
        self,
        store: &S,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, SeedError> {
        let start = self.track_metrics.then(Instant::now);
        let base_time = self.base_time.unwrap_or_else(OffsetDateTime::now_utc);

        info!(
            users = self.user_count,
            chats = self.chat_count,
            messages = self.message_count,
            "Generating data"
        );

        let seeder = Seeder::new(store).with_progress_interval(self.progress_interval);
        let membership_gen = MembershipGenerator::with_config(self.membership_config);

        seeder.clear_all().await?;

        // Seed in dependency order
        let user_ids = seeder.seed_users(self.user_count, base_time, rng).await?;
        let chat_ids = seeder.seed_chats(self.chat_count, base_time, rng).await?;
        let membership_count = seeder
            .seed_memberships(&membership_gen, &user_ids, &chat_ids, rng)
            .await?;
        let message_count = seeder
            .seed_messages(self.message_count, &user_ids, &chat_ids, base_time, rng)
            .await?;

        let metrics = start.map(|start| ScenarioMetrics {
            seeding_time_ms: start.elapsed().as_millis() as u64,
            user_count: user_ids.len(),
            chat_count: chat_ids.len(),
            membership_count,
            message_count,
        });

        Ok(ScenarioResult {
            user_ids,
            chat_ids,
            membership_count,
            message_count,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::FailingStore;
    use crate::db::{EntityKind, MemoryStore, RowKey};
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_small_scenario() {
        let store = MemoryStore::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(12345);

        let result = ScenarioBuilder::new()
            .with_users(3)
            .with_chats(1)
            .with_messages(10)
            .build(&store, &mut rng)
            .await
            .unwrap();

        assert_eq!(result.user_ids, vec![1, 2, 3]);
        assert_eq!(result.chat_ids, vec![1]);
        assert!(result.membership_count == 2 || result.membership_count == 3);
        assert_eq!(result.message_count, 10);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.messages.len(), 10);
        for message in snapshot.messages.values() {
            assert!((1..=3).contains(&message.author_id));
            assert_eq!(message.chat_id, 1);
        }
    }

    #[tokio::test]
    async fn test_no_users() {
        let store = MemoryStore::new();
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::new()
            .with_users(0)
            .with_chats(5)
            .with_messages(0)
            .build(&store, &mut rng)
            .await
            .unwrap();

        assert!(result.user_ids.is_empty());
        assert_eq!(result.chat_ids.len(), 5);
        assert_eq!(result.membership_count, 0);
        assert_eq!(result.message_count, 0);
    }

    #[tokio::test]
    async fn test_messages_without_users_rejected() {
        let store = MemoryStore::new();
        let mut rng = rand::thread_rng();

        let err = ScenarioBuilder::new()
            .with_users(0)
            .with_chats(2)
            .with_messages(4)
            .build(&store, &mut rng)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::Precondition(_)));
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.count(EntityKind::Chats), 2);
        assert_eq!(snapshot.count(EntityKind::Messages), 0);
    }

    #[tokio::test]
    async fn test_rerun_keeps_counts() {
        let store = MemoryStore::new();
        let mut rng = rand::thread_rng();

        let mut message_counts = HashSet::new();
        let mut user_counts = HashSet::new();
        for _ in 0..2 {
            ScenarioBuilder::new()
                .with_users(20)
                .with_chats(6)
                .with_messages(50)
                .build(&store, &mut rng)
                .await
                .unwrap();

            let snapshot = store.snapshot().await;
            user_counts.insert(snapshot.count(EntityKind::Users));
            message_counts.insert(snapshot.count(EntityKind::Messages));
            assert_eq!(snapshot.count(EntityKind::Chats), 6);
        }

        assert_eq!(user_counts, HashSet::from([20]));
        assert_eq!(message_counts, HashSet::from([50]));
    }

    #[tokio::test]
    async fn test_same_seed_same_dataset() {
        let base_time = OffsetDateTime::now_utc();
        let mut snapshots = Vec::new();

        for _ in 0..2 {
            let store = MemoryStore::new();
            let mut rng = rand::rngs::StdRng::seed_from_u64(54321);
            ScenarioBuilder::new()
                .with_users(10)
                .with_chats(4)
                .with_messages(30)
                .with_base_time(base_time)
                .build(&store, &mut rng)
                .await
                .unwrap();
            snapshots.push(store.snapshot().await);
        }

        assert_eq!(snapshots[0].users, snapshots[1].users);
        assert_eq!(snapshots[0].memberships, snapshots[1].memberships);
        assert_eq!(snapshots[0].messages, snapshots[1].messages);
    }

    #[tokio::test]
    async fn test_metrics() {
        let store = MemoryStore::new();
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::new()
            .with_users(4)
            .with_chats(2)
            .with_messages(3)
            .with_metrics(true)
            .build(&store, &mut rng)
            .await
            .unwrap();

        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.user_count, 4);
        assert_eq!(metrics.chat_count, 2);
        assert_eq!(metrics.membership_count, result.membership_count);
        assert_eq!(metrics.message_count, 3);
    }

    #[tokio::test]
    async fn test_chat_failure_stops_later_stages() {
        let store = FailingStore::new(EntityKind::Chats, 2);
        let mut rng = rand::rngs::StdRng::seed_from_u64(12345);

        let err = ScenarioBuilder::new()
            .with_users(3)
            .with_chats(4)
            .with_messages(10)
            .build(&store, &mut rng)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SeedError::Persistence {
                kind: EntityKind::Chats,
                key: RowKey::Id(2),
                ..
            }
        ));

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.count(EntityKind::Users), 3);
        assert_eq!(snapshot.chats.keys().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(snapshot.count(EntityKind::Memberships), 0);
        assert_eq!(snapshot.count(EntityKind::Messages), 0);
    }

    #[test]
    fn test_from_config_rejects_bad_member_range() {
        let config = SeedConfig {
            min_members_per_chat: 1,
            ..SeedConfig::default()
        };
        assert!(matches!(
            ScenarioBuilder::from_config(&config),
            Err(ConfigError::InvalidMemberRange { min: 1, max: 10 })
        ));
    }
}
