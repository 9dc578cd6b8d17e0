//! Command Module
//!
//! This module implements the command processing layer for linekv.
//! It receives parsed requests, validates argument counts against a static
//! dispatch table, executes them against the [`Store`](crate::storage::Store),
//! and returns a [`Reply`](crate::protocol::Reply).
//!
//! ```text
//! Client line
//!       │
//!       ▼
//! ┌─────────────────┐
//! │   Line Parser   │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │  - arity check  │
//! │  - dispatch     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     Store       │  (storage module)
//! └─────────────────┘
//! ```
//!
//! Supported commands: `HELP`, `SET`, `SETEX`, `GET`, `EXISTS`, `KEYS`,
//! `TTL`, `EXPIRE`, `PERSIST`, `DEL`, `FLUSHALL`, `CLOSE`.

pub mod handler;

// Re-export the main command handler
pub use handler::CommandHandler;
