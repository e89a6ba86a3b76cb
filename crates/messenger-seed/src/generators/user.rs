//! User generation.

use rand::Rng;
use time::OffsetDateTime;

use super::EntityId;
use super::timestamp::random_created_at;
use crate::facts::{FIRST_NAMES, LAST_NAMES};

/// Generated user data ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUser {
    pub id: EntityId,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// Generates users with sequential ids starting at 1.
#[derive(Debug)]
pub struct UserGenerator {
    next_id: EntityId,
    base_time: OffsetDateTime,
}

impl UserGenerator {
    /// Creates a generator whose timestamps trail `base_time`.
    pub fn new(base_time: OffsetDateTime) -> Self {
        Self {
            next_id: 1,
            base_time,
        }
    }

    /// Generates the next user.
    pub fn generate(&mut self, rng: &mut impl Rng) -> GeneratedUser {
        let id = self.next_id;
        self.next_id += 1;

        GeneratedUser {
            id,
            name: generate_user_name(rng),
            created_at: random_created_at(self.base_time, rng),
        }
    }

    /// Generates multiple users.
    pub fn generate_batch(&mut self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedUser> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

/// Builds a "First Last" display name from two independent draws.
pub fn generate_user_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}
