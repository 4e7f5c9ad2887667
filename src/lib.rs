//! Hierarchical chart-of-accounts management over an opaque key-value
//! store.
//!
//! A [`CoaRepository`] reads and writes whole collections of
//! [`ChartOfAccounts`] and [`Account`] records through a
//! [`KeyValueStore`], enforcing the business rules (statement
//! classification, normal balance, numbering hierarchy, tag inheritance)
//! and running the cascading updates a save can trigger: designating the
//! chart's retained-earnings account and re-tagging a parent from
//! `detail` to `summary`.
//!
//! The store is assumed atomic per single key only, with at most one
//! logical writer per chart at a time; callers needing multi-writer
//! safety must serialize access externally.

#[cfg(test)]
mod testutil;

pub mod account;
pub mod chart;
pub mod error;
pub mod repository;
pub mod store;
pub mod tags;
pub mod validation;

pub use crate::account::{Account, AccountBuilder};
pub use crate::chart::ChartOfAccounts;
pub use crate::error::{CoaError, StoreError};
pub use crate::repository::CoaRepository;
pub use crate::store::{KeyValueStore, MemoryStore, SledStore};
pub use crate::tags::Tags;
