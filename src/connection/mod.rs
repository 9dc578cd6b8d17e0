//! Connection Module
//!
//! Manages individual client connections. The listener accepts a TCP stream
//! and spawns one async task per client; each task owns its own buffered
//! stream and line buffer and drives the shared store independently.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  ConnectionHandler                   │
//! │                                                      │
//! │  ┌───────────┐   ┌───────────┐   ┌───────────────┐   │
//! │  │ read line │──>│ parse     │──>│ execute cmd   │   │
//! │  └───────────┘   └───────────┘   └───────┬───────┘   │
//! │        ▲                                 │           │
//! │        │         ┌───────────┐           │           │
//! │        └─────────│ send reply│<──────────┘           │
//! │                  └───────────┘                       │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! A fault inside one handler terminates only that task; the listener and
//! every other connection keep running.

pub mod handler;

// Re-export commonly used types
pub use handler::{handle_connection, ConnStats, ConnectionError, ConnectionHandler};
