//! Seed data generation for the messenger database.
//!
//! This crate generates a referentially consistent dataset of users, chats,
//! chat memberships and messages, and writes it through a [`db::ChatStore`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use messenger_seed::prelude::*;
//!
//! let store = PgStore::connect(config.database.connect_options()?).await?;
//! let result = ScenarioBuilder::from_config(&config)?
//!     .build(&store, &mut rng)
//!     .await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod facts;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
    pub use crate::config::{ConfigError, DatabaseConfig, SeedConfig};
    pub use crate::db::{
        ChatStore, EntityKind, MemoryStore, PgStore, RowKey, SeedError, Seeder, StoreError,
    };
    pub use crate::generators::{
        ChatGenerator, EntityId, GeneratedChat, GeneratedMembership, GeneratedMessage,
        GeneratedUser, MembershipGenConfig, MembershipGenerator, MessageGenerator, UserGenerator,
    };
}
