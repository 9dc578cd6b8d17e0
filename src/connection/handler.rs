//! Connection Handler
//!
//! One handler per accepted TCP connection, running as its own task. The
//! lifecycle is a plain loop: read a line, parse it, execute, write the
//! reply. Terminal transitions are client disconnect (EOF), a read/write
//! error, or an explicit CLOSE command.
//!
//! An empty input line produces no request and no reply; the loop just reads
//! the next line. The store never suspends, so a handler only awaits socket
//! reads and write flushes.

use crate::commands::CommandHandler;
use crate::protocol::{parse_line, Reply};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

/// Longest accepted input line (64 KB). The cap is enforced while bytes
/// accumulate, so a client withholding the newline cannot grow the buffer
/// without bound; crossing it ends the connection.
const MAX_LINE_LEN: usize = 64 * 1024;

/// Statistics for connection handling.
#[derive(Debug, Default)]
pub struct ConnStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
}

impl ConnStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Errors that can occur while handling a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input line exceeded [`MAX_LINE_LEN`]
    #[error("input line too long")]
    LineTooLong,
}

/// Handles a single client connection.
pub struct ConnectionHandler {
    /// Buffered reader/writer over the client socket
    stream: BufStream<TcpStream>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// The command handler (cheap clone over the shared store)
    commands: CommandHandler,

    /// Connection statistics (shared)
    stats: Arc<ConnStats>,

    /// Reused line buffer
    line: Vec<u8>,
}

impl ConnectionHandler {
    /// Creates a new connection handler.
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        commands: CommandHandler,
        stats: Arc<ConnStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufStream::new(stream),
            addr,
            commands,
            stats,
            line: Vec::new(),
        }
    }

    /// Runs the connection to completion.
    ///
    /// Returns `Ok(())` on a graceful end (client EOF or CLOSE).
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected"),
            Err(e) => warn!(client = %self.addr, error = %e, "Connection error"),
        }

        self.stats.connection_closed();
        result
    }

    /// The read-dispatch-reply loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            let n = self.read_line_bounded().await?;
            if n == 0 {
                // EOF - client closed the connection
                return Ok(());
            }

            // Zero tokens means no command and no reply. Non-UTF-8 bytes
            // degrade lossily; they can only appear inside tokens.
            let line = String::from_utf8_lossy(&self.line);
            let Some(request) = parse_line(&line) else {
                continue;
            };

            let reply = self.commands.execute(&request);
            self.stats.command_processed();

            let closing = matches!(reply, Reply::Closing);
            self.send_reply(&reply).await?;

            if closing {
                return Ok(());
            }
        }
    }

    /// Reads one newline-terminated line into `self.line`.
    ///
    /// The length cap is checked as bytes accumulate, not once a newline
    /// arrives, so a client streaming an endless line is cut off as soon as
    /// the buffer crosses [`MAX_LINE_LEN`].
    ///
    /// Returns the number of bytes buffered; zero means EOF before any byte.
    /// A partial line truncated by EOF is still returned for processing.
    async fn read_line_bounded(&mut self) -> Result<usize, ConnectionError> {
        self.line.clear();

        loop {
            let available = self.stream.fill_buf().await?;
            if available.is_empty() {
                // EOF
                return Ok(self.line.len());
            }

            let (chunk, complete) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (&available[..=i], true),
                None => (available, false),
            };

            if self.line.len() + chunk.len() > MAX_LINE_LEN {
                return Err(ConnectionError::LineTooLong);
            }

            self.line.extend_from_slice(chunk);
            let consumed = chunk.len();
            self.stream.consume(consumed);

            if complete {
                return Ok(self.line.len());
            }
        }
    }

    /// Writes a reply and flushes it.
    ///
    /// Replies that serialize to nothing (empty KEYS output) skip the write.
    async fn send_reply(&mut self, reply: &Reply) -> Result<(), ConnectionError> {
        let bytes = reply.serialize();
        if bytes.is_empty() {
            return Ok(());
        }
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        debug!(client = %self.addr, bytes = bytes.len(), "Sent reply");
        Ok(())
    }
}

/// Handles a client connection to completion, logging any error.
///
/// This is the entry point the listener spawns per connection. Errors stay
/// inside this task; a fault here never unwinds into the accept loop.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    commands: CommandHandler,
    stats: Arc<ConnStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, commands, stats);
    if let Err(e) = handler.run().await {
        debug!(client = %addr, error = %e, "Connection ended with error");
    }
}
