//! Storage Module
//!
//! This module provides the shared store for linekv: a key→value table and a
//! parallel key→expiration table, both guarded by a single `RwLock`.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                    Store                     │
//! │              RwLock<Tables>                  │
//! │  ┌────────────────┐  ┌───────────────────┐   │
//! │  │ values         │  │ expirations       │   │
//! │  │ key -> String  │  │ key -> unix secs  │   │
//! │  └────────────────┘  └───────────────────┘   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Expiration is lazy only: read paths that consult the deadline evict
//! expired rows under the write lock. There is no background sweeper.

pub mod store;

// Re-export commonly used types
pub use store::{Store, StoreStats, Ttl};
