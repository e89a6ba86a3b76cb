//! Persistence for seeded data.
//!
//! The [`Seeder`] writes generated rows through the [`ChatStore`] port.
//! [`PgStore`] targets PostgreSQL; [`MemoryStore`] keeps rows in process for
//! dry runs and tests.

mod memory;
mod postgres;
mod seeder;
mod store;
#[cfg(test)]
pub(crate) mod testing;

pub use memory::{MemorySnapshot, MemoryStore};
pub use postgres::PgStore;
pub use seeder::{RowKey, SeedError, Seeder};
pub use store::{ChatStore, EntityKind, StoreError};
