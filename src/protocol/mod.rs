//! Line Protocol Implementation
//!
//! linekv speaks a plaintext line protocol: one command per newline-terminated
//! line, tokenized on runs of whitespace, with `\r\n`-terminated reply lines.
//! There is no length-prefixing and no multi-bulk framing. It is loosely
//! inspired by the Redis wire protocol but is not RESP.
//!
//! ## Modules
//!
//! - `parser`: tokenizes an input line into a [`Request`]
//! - `types`: the [`Reply`] enum and its wire serialization
//!
//! ## Example
//!
//! ```
//! use linekv::protocol::{parse_line, Reply};
//!
//! let request = parse_line("set name Ada\n").unwrap();
//! assert_eq!(request.name, "SET");
//! assert_eq!(request.args, vec!["name", "Ada"]);
//!
//! assert_eq!(Reply::Ok.serialize(), b"OK\r\n");
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse_line, Request};
pub use types::Reply;
