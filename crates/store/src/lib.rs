//! FAQ cache persistence for ASKBOT.

pub mod sqlite;

pub use sqlite::SqliteFaqStore;
