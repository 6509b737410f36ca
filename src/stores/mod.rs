//! Contains the category store trait and its implementations.

mod category;

pub mod mongo;
pub mod sqlite;

pub use category::{CategoryStore, UpdateOutcome};
