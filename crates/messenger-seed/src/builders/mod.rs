//! Fluent builder APIs for seeding runs.
//!
//! The [`ScenarioBuilder`] clears the target store and seeds users, chats,
//! memberships and messages in dependency order.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
