//! Chat membership generation.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;

use super::EntityId;
use crate::config::ConfigError;

/// Fewest members a chat may have when enough users exist.
pub const MIN_MEMBERS_PER_CHAT: usize = 2;

/// Most members a chat may have.
pub const MAX_MEMBERS_PER_CHAT: usize = 10;

/// Generated user-chat link ready for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneratedMembership {
    pub user_id: EntityId,
    pub chat_id: EntityId,
}

/// Configuration for membership generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipGenConfig {
    /// Range the per-chat member count is drawn from, before capping by pool size.
    members_per_chat: RangeInclusive<usize>,
}

impl MembershipGenConfig {
    /// Accepts only non-empty ranges within
    /// `MIN_MEMBERS_PER_CHAT..=MAX_MEMBERS_PER_CHAT`.
    pub fn new(members_per_chat: RangeInclusive<usize>) -> Result<Self, ConfigError> {
        let (min, max) = (*members_per_chat.start(), *members_per_chat.end());
        if min < MIN_MEMBERS_PER_CHAT || max > MAX_MEMBERS_PER_CHAT || min > max {
            return Err(ConfigError::InvalidMemberRange { min, max });
        }
        Ok(Self { members_per_chat })
    }

    pub fn members_per_chat(&self) -> &RangeInclusive<usize> {
        &self.members_per_chat
    }
}

impl Default for MembershipGenConfig {
    fn default() -> Self {
        Self {
            members_per_chat: MIN_MEMBERS_PER_CHAT..=MAX_MEMBERS_PER_CHAT,
        }
    }
}

/// Links users to chats.
///
/// Each chat receives a subset of the user pool drawn without replacement, so
/// a user appears at most once per chat. The same user may belong to any
/// number of chats.
#[derive(Debug, Default)]
pub struct MembershipGenerator {
    config: MembershipGenConfig,
}

impl MembershipGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MembershipGenConfig) -> Self {
        Self { config }
    }

    /// Draws how many members a chat gets, capped by the pool size.
    pub fn member_count(&self, pool_size: usize, rng: &mut impl Rng) -> usize {
        if pool_size == 0 {
            return 0;
        }
        rng.gen_range(self.config.members_per_chat.clone()).min(pool_size)
    }

    /// Generates the memberships of one chat.
    pub fn generate_for_chat(
        &self,
        chat_id: EntityId,
        user_ids: &[EntityId],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedMembership> {
        let count = self.member_count(user_ids.len(), rng);

        user_ids
            .choose_multiple(rng, count)
            .map(|&user_id| GeneratedMembership { user_id, chat_id })
            .collect()
    }
}
