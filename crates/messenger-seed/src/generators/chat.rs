//! Chat generation.

use rand::Rng;
use time::OffsetDateTime;

use super::EntityId;
use super::timestamp::random_created_at;
use crate::facts::{CHAT_PREFIXES, CHAT_SUFFIX_LIMIT, CHAT_TOPICS};

/// Generated chat data ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedChat {
    pub id: EntityId,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// Generates chats with sequential ids starting at 1.
#[derive(Debug)]
pub struct ChatGenerator {
    next_id: EntityId,
    base_time: OffsetDateTime,
}

impl ChatGenerator {
    pub fn new(base_time: OffsetDateTime) -> Self {
        Self {
            next_id: 1,
            base_time,
        }
    }

    /// Generates the next chat.
    pub fn generate(&mut self, rng: &mut impl Rng) -> GeneratedChat {
        let id = self.next_id;
        self.next_id += 1;

        GeneratedChat {
            id,
            name: generate_chat_name(rng),
            created_at: random_created_at(self.base_time, rng),
        }
    }

    pub fn generate_batch(&mut self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedChat> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

/// Builds a "Prefix topic N" chat name, N in `0..CHAT_SUFFIX_LIMIT`.
pub fn generate_chat_name(rng: &mut impl Rng) -> String {
    let prefix = CHAT_PREFIXES[rng.gen_range(0..CHAT_PREFIXES.len())];
    let topic = CHAT_TOPICS[rng.gen_range(0..CHAT_TOPICS.len())];
    let suffix = rng.gen_range(0..CHAT_SUFFIX_LIMIT);
    format!("{prefix} {topic} {suffix}")
}
