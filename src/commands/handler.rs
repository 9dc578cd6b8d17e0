//! Command Handler
//!
//! Dispatches parsed requests to the store. Each command is described by a
//! [`CommandSpec`] row giving its minimum argument count and usage string;
//! argument counts are validated against the table before any positional
//! indexing, so a short line yields a usage error instead of a panic.

use crate::protocol::{Reply, Request};
use crate::storage::{Store, Ttl};
use std::sync::Arc;

/// One row of the dispatch table.
struct CommandSpec {
    name: &'static str,
    /// Arguments required after the command token.
    min_args: usize,
    usage: &'static str,
    run: fn(&CommandHandler, &Request) -> Reply,
}

/// The twelve commands of the protocol.
#[rustfmt::skip]
const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "HELP",     min_args: 0, usage: "HELP",                run: CommandHandler::cmd_help },
    CommandSpec { name: "SET",      min_args: 2, usage: "SET key value",       run: CommandHandler::cmd_set },
    CommandSpec { name: "SETEX",    min_args: 3, usage: "SETEX key ttl value", run: CommandHandler::cmd_setex },
    CommandSpec { name: "GET",      min_args: 1, usage: "GET key",             run: CommandHandler::cmd_get },
    CommandSpec { name: "EXISTS",   min_args: 1, usage: "EXISTS key",          run: CommandHandler::cmd_exists },
    CommandSpec { name: "KEYS",     min_args: 1, usage: "KEYS pattern",        run: CommandHandler::cmd_keys },
    CommandSpec { name: "TTL",      min_args: 1, usage: "TTL key",             run: CommandHandler::cmd_ttl },
    CommandSpec { name: "EXPIRE",   min_args: 2, usage: "EXPIRE key ttl",      run: CommandHandler::cmd_expire },
    CommandSpec { name: "PERSIST",  min_args: 1, usage: "PERSIST key",         run: CommandHandler::cmd_persist },
    CommandSpec { name: "DEL",      min_args: 1, usage: "DEL key",             run: CommandHandler::cmd_del },
    CommandSpec { name: "FLUSHALL", min_args: 0, usage: "FLUSHALL",            run: CommandHandler::cmd_flushall },
    CommandSpec { name: "CLOSE",    min_args: 0, usage: "CLOSE",               run: CommandHandler::cmd_close },
];

/// The usage text sent for HELP.
const HELP_TEXT: &[&str] = &[
    "Available commands:",
    "GET: Get value from key - Usage: GET key",
    "SET: Set key and value - Usage: SET key value",
    "SETEX: Set key with ttl - Usage: SETEX key ttl value",
    "EXISTS: Check if key exists - Usage: EXISTS key",
    "DELETE: Delete key - Usage: DEL key",
    "KEYS: Find all keys matching pattern - Usage: KEYS pattern",
    "TTL: Find ttl of key - Usage: TTL key",
    "EXPIRE: Set ttl of key - Usage: EXPIRE key ttl",
    "PERSIST: Remove ttl of key - Usage: PERSIST key",
    "FLUSHALL: Delete all keys - Usage: FLUSHALL",
    "CLOSE: Close connection - Usage: CLOSE",
];

/// Executes commands against the shared store.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    store: Arc<Store>,
}

impl CommandHandler {
    /// Creates a new command handler backed by the given store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Executes a request and returns the reply.
    ///
    /// Unknown commands and short argument lists are reported as error
    /// replies; neither closes the connection.
    pub fn execute(&self, request: &Request) -> Reply {
        let Some(spec) = COMMANDS.iter().find(|c| c.name == request.name) else {
            return Reply::error(
                "ERROR: Unknown command. Use 'HELP' for a list of available commands.",
            );
        };

        if request.args.len() < spec.min_args {
            return Reply::error(format!("ERROR: {} command -> {}", spec.name, spec.usage));
        }

        (spec.run)(self, request)
    }

    /// HELP
    fn cmd_help(&self, _request: &Request) -> Reply {
        Reply::Lines(HELP_TEXT.iter().map(|l| l.to_string()).collect())
    }

    /// SET key value...
    ///
    /// The value is every token after the key, rejoined with single spaces.
    fn cmd_set(&self, request: &Request) -> Reply {
        let key = request.args[0].clone();
        let value = request.join_args(1);
        self.store.set(key, value);
        Reply::Ok
    }

    /// SETEX key ttl value...
    fn cmd_setex(&self, request: &Request) -> Reply {
        let key = request.args[0].clone();
        let Ok(ttl) = request.args[1].parse::<u64>() else {
            return Reply::error("Invalid expiration time");
        };
        let value = request.join_args(2);
        self.store.set_with_ttl(key, value, ttl);
        Reply::Ok
    }

    /// GET key
    fn cmd_get(&self, request: &Request) -> Reply {
        match self.store.get(&request.args[0]) {
            Some(value) => Reply::Value(value),
            None => Reply::Nil,
        }
    }

    /// EXISTS key
    fn cmd_exists(&self, request: &Request) -> Reply {
        Reply::Flag(self.store.exists(&request.args[0]))
    }

    /// KEYS pattern
    ///
    /// Keys come back 1-indexed for display. Only `*` enumerates; any other
    /// pattern is silently empty.
    fn cmd_keys(&self, request: &Request) -> Reply {
        let lines = self
            .store
            .keys(&request.args[0])
            .into_iter()
            .enumerate()
            .map(|(i, key)| format!("{}) {}", i + 1, key))
            .collect();
        Reply::Lines(lines)
    }

    /// TTL key
    fn cmd_ttl(&self, request: &Request) -> Reply {
        match self.store.ttl(&request.args[0]) {
            Ttl::Missing => Reply::Gone,
            Ttl::NoExpiry => Reply::NoExpiry,
            Ttl::Seconds(n) => Reply::Seconds(n),
        }
    }

    /// EXPIRE key ttl
    fn cmd_expire(&self, request: &Request) -> Reply {
        let Ok(ttl) = request.args[1].parse::<u64>() else {
            return Reply::error("Invalid expiration time");
        };
        self.store.expire(request.args[0].clone(), ttl);
        Reply::Ok
    }

    /// PERSIST key
    fn cmd_persist(&self, request: &Request) -> Reply {
        self.store.persist(&request.args[0]);
        Reply::Ok
    }

    /// DEL key
    fn cmd_del(&self, request: &Request) -> Reply {
        Reply::Removed(self.store.delete(&request.args[0]))
    }

    /// FLUSHALL
    fn cmd_flushall(&self, _request: &Request) -> Reply {
        self.store.flush_all();
        Reply::Ok
    }

    /// CLOSE
    ///
    /// The connection loop sends the acknowledgment and then hangs up.
    fn cmd_close(&self, _request: &Request) -> Reply {
        Reply::Closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parse_line;

    fn handler() -> CommandHandler {
        CommandHandler::new(Arc::new(Store::new()))
    }

    fn run(h: &CommandHandler, line: &str) -> Reply {
        h.execute(&parse_line(line).expect("test lines are non-empty"))
    }

    #[test]
    fn test_set_then_get() {
        let h = handler();
        assert_eq!(run(&h, "SET name Ada"), Reply::Ok);
        assert_eq!(run(&h, "GET name"), Reply::Value("Ada".into()));
    }

    #[test]
    fn test_set_joins_value_tokens() {
        let h = handler();
        run(&h, "SET msg hello   big  world");
        assert_eq!(run(&h, "GET msg"), Reply::Value("hello big world".into()));
    }

    #[test]
    fn test_get_missing() {
        let h = handler();
        assert_eq!(run(&h, "GET nothing"), Reply::Nil);
    }

    #[test]
    fn test_unknown_command() {
        let h = handler();
        let reply = run(&h, "BLORP x");
        assert_eq!(
            reply,
            Reply::error("ERROR: Unknown command. Use 'HELP' for a list of available commands.")
        );
    }

    #[test]
    fn test_usage_errors() {
        let h = handler();
        assert_eq!(run(&h, "SET onlykey"), Reply::error("ERROR: SET command -> SET key value"));
        assert_eq!(run(&h, "GET"), Reply::error("ERROR: GET command -> GET key"));
        assert_eq!(
            run(&h, "SETEX key 10"),
            Reply::error("ERROR: SETEX command -> SETEX key ttl value")
        );
        assert_eq!(run(&h, "EXPIRE key"), Reply::error("ERROR: EXPIRE command -> EXPIRE key ttl"));
    }

    #[test]
    fn test_case_insensitive_dispatch() {
        let h = handler();
        assert_eq!(run(&h, "set k v"), Reply::Ok);
        assert_eq!(run(&h, "gEt k"), Reply::Value("v".into()));
    }

    #[test]
    fn test_setex_invalid_ttl() {
        let h = handler();
        assert_eq!(run(&h, "SETEX key soon value"), Reply::error("Invalid expiration time"));
        assert_eq!(run(&h, "SETEX key -5 value"), Reply::error("Invalid expiration time"));
        // Nothing was stored on the error paths.
        assert_eq!(run(&h, "EXISTS key"), Reply::Flag(false));
    }

    #[test]
    fn test_setex_zero_ttl_expires_immediately() {
        let h = handler();
        assert_eq!(run(&h, "SETEX flash 0 value"), Reply::Ok);

        // Zero TTL puts the deadline at the current second; after the
        // rollover the lazy check fires and every path agrees it is gone.
        std::thread::sleep(std::time::Duration::from_millis(1100));

        assert_eq!(run(&h, "GET flash"), Reply::Nil);
        assert_eq!(run(&h, "TTL flash"), Reply::Gone);
        assert_eq!(run(&h, "EXISTS flash"), Reply::Flag(false));
    }

    #[test]
    fn test_expire_invalid_ttl() {
        let h = handler();
        run(&h, "SET key value");
        assert_eq!(run(&h, "EXPIRE key never"), Reply::error("Invalid expiration time"));
        assert_eq!(run(&h, "TTL key"), Reply::NoExpiry);
    }

    #[test]
    fn test_exists_and_del() {
        let h = handler();
        assert_eq!(run(&h, "EXISTS key"), Reply::Flag(false));
        assert_eq!(run(&h, "DEL key"), Reply::Removed(false));

        run(&h, "SET key value");
        assert_eq!(run(&h, "EXISTS key"), Reply::Flag(true));
        assert_eq!(run(&h, "DEL key"), Reply::Removed(true));
        assert_eq!(run(&h, "GET key"), Reply::Nil);
    }

    #[test]
    fn test_keys_enumeration() {
        let h = handler();
        run(&h, "SET alpha 1");
        run(&h, "SET beta 2");

        let Reply::Lines(mut lines) = run(&h, "KEYS *") else {
            panic!("expected a multi-line reply");
        };
        lines.sort_by(|a, b| a[3..].cmp(&b[3..]));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("alpha"));
        assert!(lines[1].ends_with("beta"));

        // Non-wildcard patterns are silently empty.
        assert_eq!(run(&h, "KEYS alp*"), Reply::Lines(vec![]));
    }

    #[test]
    fn test_ttl_replies() {
        let h = handler();
        assert_eq!(run(&h, "TTL ghost"), Reply::Gone);

        run(&h, "SET forever value");
        assert_eq!(run(&h, "TTL forever"), Reply::NoExpiry);

        run(&h, "SETEX short 100 value");
        let Reply::Seconds(n) = run(&h, "TTL short") else {
            panic!("expected a seconds reply");
        };
        assert!(n > 0 && n <= 100);
    }

    #[test]
    fn test_persist_after_setex() {
        let h = handler();
        run(&h, "SETEX key 100 value");
        assert_eq!(run(&h, "PERSIST key"), Reply::Ok);
        assert_eq!(run(&h, "TTL key"), Reply::NoExpiry);
    }

    #[test]
    fn test_flushall() {
        let h = handler();
        run(&h, "SET a 1");
        run(&h, "SET b 2");
        assert_eq!(run(&h, "FLUSHALL"), Reply::Ok);
        assert_eq!(run(&h, "KEYS *"), Reply::Lines(vec![]));
    }

    #[test]
    fn test_help_is_twelve_lines() {
        let h = handler();
        let Reply::Lines(lines) = run(&h, "HELP") else {
            panic!("expected a multi-line reply");
        };
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "Available commands:");
    }

    #[test]
    fn test_close() {
        let h = handler();
        assert_eq!(run(&h, "CLOSE"), Reply::Closing);
    }
}
