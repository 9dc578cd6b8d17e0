//! Reply Types
//!
//! This module defines the replies a command handler can produce and their
//! wire form. Every reply line is terminated with CRLF; a multi-line reply
//! with zero lines writes nothing at all (the KEYS command on an empty or
//! non-wildcard result is silent by contract).

use std::fmt;

/// The CRLF terminator appended to every reply line.
pub const CRLF: &[u8] = b"\r\n";

/// A reply to a single command.
///
/// The variants mirror the distinct wire shapes of the protocol rather than
/// the commands that produce them: GET's not-found marker and TTL's
/// no-expiry marker are both `-1` on the wire but carry different meanings,
/// so they stay separate here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `OK` - acknowledgment for mutating commands.
    Ok,
    /// A raw value line (GET hit).
    Value(String),
    /// `-1` - key absent or expired (GET miss).
    Nil,
    /// `1` or `0` (EXISTS).
    Flag(bool),
    /// `:1` or `:0` (DEL).
    Removed(bool),
    /// `-2` - TTL of an absent-or-expired key.
    Gone,
    /// `-1` - TTL of a key with no expiration.
    NoExpiry,
    /// `N seconds` - remaining TTL.
    Seconds(i64),
    /// A multi-line reply (HELP, KEYS). Empty means nothing is written.
    Lines(Vec<String>),
    /// A textual error line; the connection stays open.
    Error(String),
    /// `Closing connection` - sent before the server closes the socket.
    Closing,
}

impl Reply {
    /// Creates an error reply.
    pub fn error(msg: impl Into<String>) -> Self {
        Reply::Error(msg.into())
    }

    /// Serializes the reply to bytes for sending over the wire.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the reply into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        fn line(buf: &mut Vec<u8>, text: &str) {
            buf.extend_from_slice(text.as_bytes());
            buf.extend_from_slice(CRLF);
        }

        match self {
            Reply::Ok => line(buf, "OK"),
            Reply::Value(v) => line(buf, v),
            Reply::Nil | Reply::NoExpiry => line(buf, "-1"),
            Reply::Flag(true) => line(buf, "1"),
            Reply::Flag(false) => line(buf, "0"),
            Reply::Removed(true) => line(buf, ":1"),
            Reply::Removed(false) => line(buf, ":0"),
            Reply::Gone => line(buf, "-2"),
            Reply::Seconds(n) => line(buf, &format!("{} seconds", n)),
            Reply::Lines(lines) => {
                for l in lines {
                    line(buf, l);
                }
            }
            Reply::Error(msg) => line(buf, msg),
            Reply::Closing => line(buf, "Closing connection"),
        }
    }

    /// Returns true if this reply is an error line.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.serialize();
        write!(f, "{}", String::from_utf8_lossy(&bytes))
    }
}
