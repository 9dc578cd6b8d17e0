//! Line Parser
//!
//! Turns one raw input line into a [`Request`]. A line is trimmed of
//! surrounding whitespace (a `\r` before the `\n` is tolerated) and split on
//! runs of whitespace. The first token, uppercased, names the command; the
//! rest are positional arguments.
//!
//! An empty line produces no request at all. This is the edge case that
//! matters most: nothing downstream may assume a first token exists.

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The command name, normalized to uppercase.
    pub name: String,
    /// Remaining whitespace-separated tokens, in order.
    pub args: Vec<String>,
}

impl Request {
    /// Joins the arguments from `from` onward into a single value string.
    ///
    /// Tokens are rejoined with single spaces, so multi-space runs in the
    /// original input are not preserved.
    pub fn join_args(&self, from: usize) -> String {
        self.args[from..].join(" ")
    }
}

/// Parses a raw line into a [`Request`].
///
/// Returns `None` for a line with no tokens (empty or all whitespace).
pub fn parse_line(line: &str) -> Option<Request> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?.to_uppercase();
    let args = tokens.map(str::to_string).collect();

    Some(Request { name, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let req = parse_line("GET name\n").unwrap();
        assert_eq!(req.name, "GET");
        assert_eq!(req.args, vec!["name"]);
    }

    #[test]
    fn test_parse_lowercase_command() {
        let req = parse_line("set name Ada\n").unwrap();
        assert_eq!(req.name, "SET");
        assert_eq!(req.args, vec!["name", "Ada"]);
    }

    #[test]
    fn test_parse_crlf_and_padding() {
        let req = parse_line("  EXISTS   name  \r\n").unwrap();
        assert_eq!(req.name, "EXISTS");
        assert_eq!(req.args, vec!["name"]);
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("\n"), None);
        assert_eq!(parse_line("   \r\n"), None);
    }

    #[test]
    fn test_parse_no_args() {
        let req = parse_line("FLUSHALL\n").unwrap();
        assert_eq!(req.name, "FLUSHALL");
        assert!(req.args.is_empty());
    }

    #[test]
    fn test_join_args_collapses_spaces() {
        let req = parse_line("SET greeting hello    big   world\n").unwrap();
        assert_eq!(req.join_args(1), "hello big world");
    }
}
