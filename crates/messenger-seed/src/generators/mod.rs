//! Entity generators for seed data.
//!
//! - [`UserGenerator`]: users with synthesized display names
//! - [`ChatGenerator`]: chats with synthesized names
//! - [`MembershipGenerator`]: duplicate-free user subsets per chat
//! - [`MessageGenerator`]: messages referencing existing users and chats
//!
//! Generators are pure: they draw from the caller's RNG and never touch storage.

pub mod chat;
pub mod membership;
pub mod message;
pub mod timestamp;
pub mod user;

/// Identifier shared by every generated entity type. Dense, starting at 1.
pub type EntityId = i64;

pub use chat::{ChatGenerator, GeneratedChat};
pub use membership::{GeneratedMembership, MembershipGenConfig, MembershipGenerator};
pub use message::{GeneratedMessage, MessageGenerator};
pub use timestamp::random_created_at;
pub use user::{GeneratedUser, UserGenerator};
