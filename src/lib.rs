//! # linekv - An In-Memory Key-Value Server With a Line Protocol
//!
//! linekv is a small in-memory key-value store exposed over a persistent,
//! line-delimited TCP text protocol with per-key TTL expiration.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         linekv                             │
//! │                                                            │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │     │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │     │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘     │
//! │                                               │            │
//! │                                               ▼            │
//! │  ┌─────────────┐    ┌──────────────────────────────────┐   │
//! │  │    Line     │    │              Store               │   │
//! │  │   Parser    │    │  ┌──────────┐  ┌─────────────┐   │   │
//! │  │             │    │  │  values  │  │ expirations │   │   │
//! │  └─────────────┘    │  └──────────┘  └─────────────┘   │   │
//! │                     │        (single RwLock)           │   │
//! │                     └──────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Protocol
//!
//! Commands are single newline-terminated lines, tokenized on whitespace.
//! The first token (case-insensitive) selects the command. Every reply line
//! is terminated with `\r\n`.
//!
//! | Command    | Args             | Reply                             |
//! |------------|------------------|-----------------------------------|
//! | `HELP`     |                  | multi-line usage text             |
//! | `SET`      | key value...     | `OK`                              |
//! | `SETEX`    | key ttl value... | `OK`                              |
//! | `GET`      | key              | value, or `-1` if absent/expired  |
//! | `EXISTS`   | key              | `1` / `0`                         |
//! | `KEYS`     | pattern          | numbered key list (only for `*`)  |
//! | `TTL`      | key              | `-2`, `-1`, or `N seconds`        |
//! | `EXPIRE`   | key ttl          | `OK`                              |
//! | `PERSIST`  | key              | `OK`                              |
//! | `DEL`      | key              | `:1` / `:0`                       |
//! | `FLUSHALL` |                  | `OK`                              |
//! | `CLOSE`    |                  | `Closing connection`              |
//!
//! ## Design Highlights
//!
//! ### One lock, two tables
//!
//! The value table and the expiration table are independent rows behind a
//! single `RwLock`. Every access, read or write, goes through that lock.
//!
//! ### Lazy expiration
//!
//! There is no background sweeper. A key's expiration is enforced when a
//! read path (GET, TTL) touches it: finding the deadline in the past removes
//! both table rows under the write lock before the reply is formed, so any
//! later command observes the key as absent.
//!
//! ## Module Overview
//!
//! - [`protocol`]: line parsing and reply serialization
//! - [`storage`]: the shared store with TTL support
//! - [`commands`]: the dispatch table and command handlers
//! - [`connection`]: per-client connection loop

pub mod commands;
pub mod connection;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::CommandHandler;
pub use connection::{handle_connection, ConnStats};
pub use protocol::{parse_line, Reply, Request};
pub use storage::{Store, Ttl};

/// The default port linekv listens on
pub const DEFAULT_PORT: u16 = 6389;

/// The default host linekv binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of linekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
