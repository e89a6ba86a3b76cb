//! Message generation.

use rand::Rng;
use rand::seq::SliceRandom;
use time::OffsetDateTime;

use super::EntityId;
use super::timestamp::random_created_at;
use crate::facts::MESSAGE_CONTENTS;

/// Generated message data ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    pub id: EntityId,
    pub content: String,
    pub author_id: EntityId,
    pub chat_id: EntityId,
    pub created_at: OffsetDateTime,
}

/// Generates messages attributed to random users in random chats.
///
/// Authors are drawn independently of memberships: a message may be posted
/// by a user who is not a member of its chat.
#[derive(Debug)]
pub struct MessageGenerator<'a> {
    user_ids: &'a [EntityId],
    chat_ids: &'a [EntityId],
    next_id: EntityId,
    base_time: OffsetDateTime,
}

impl<'a> MessageGenerator<'a> {
    /// Returns `None` if either pool is empty.
    pub fn new(
        user_ids: &'a [EntityId],
        chat_ids: &'a [EntityId],
        base_time: OffsetDateTime,
    ) -> Option<Self> {
        if user_ids.is_empty() || chat_ids.is_empty() {
            return None;
        }

        Some(Self {
            user_ids,
            chat_ids,
            next_id: 1,
            base_time,
        })
    }

    /// Generates the next message.
    pub fn generate(&mut self, rng: &mut impl Rng) -> GeneratedMessage {
        let id = self.next_id;
        self.next_id += 1;

        // Pools are non-empty by construction.
        let author_id = self.user_ids[rng.gen_range(0..self.user_ids.len())];
        let chat_id = self.chat_ids[rng.gen_range(0..self.chat_ids.len())];

        GeneratedMessage {
            id,
            content: generate_message_content(rng),
            author_id,
            chat_id,
            created_at: random_created_at(self.base_time, rng),
        }
    }

    pub fn generate_batch(&mut self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedMessage> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

pub fn generate_message_content(rng: &mut impl Rng) -> String {
    MESSAGE_CONTENTS
        .choose(rng)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_empty_pools_rejected() {
        let now = OffsetDateTime::now_utc();
        assert!(MessageGenerator::new(&[], &[1], now).is_none());
        assert!(MessageGenerator::new(&[1], &[], now).is_none());
        assert!(MessageGenerator::new(&[1], &[1], now).is_some());
    }

    #[test]
    fn test_references_pools() {
        let users = [1, 2, 3];
        let chats = [1];
        let mut msg_gen = MessageGenerator::new(&users, &chats, OffsetDateTime::now_utc()).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(12345);

        let messages = msg_gen.generate_batch(10, &mut rng);

        assert_eq!(messages.len(), 10);
        for (i, m) in messages.iter().enumerate() {
            assert_eq!(m.id, i as EntityId + 1);
            assert!(users.contains(&m.author_id));
            assert_eq!(m.chat_id, 1);
            assert!(MESSAGE_CONTENTS.contains(&m.content.as_str()));
        }
    }

    #[test]
    fn test_authors_spread_over_pool() {
        let users: Vec<EntityId> = (1..=4).collect();
        let chats: Vec<EntityId> = (1..=4).collect();
        let mut msg_gen = MessageGenerator::new(&users, &chats, OffsetDateTime::now_utc()).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);

        let messages = msg_gen.generate_batch(400, &mut rng);
        for id in 1..=4 {
            assert!(messages.iter().any(|m| m.author_id == id));
            assert!(messages.iter().any(|m| m.chat_id == id));
        }
    }
}
