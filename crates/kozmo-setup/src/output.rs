//! Stdout helpers and GitHub Actions workflow commands

use std::io::{self, Write};

pub fn print_json(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

pub fn print_text(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

/// Escapes a workflow command message (`%`, `\r`, `\n`)
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// `::error::` command that fails the current job step
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

pub fn print_failure(message: &str) -> io::Result<()> {
    print_text(&error_command(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("plain message"), "plain message");
        assert_eq!(escape_data("100%"), "100%25");
        assert_eq!(escape_data("line one\r\nline two"), "line one%0D%0Aline two");
    }

    #[test]
    fn test_escape_percent_first() {
        // A literal "%0A" in the message must not turn into a newline
        assert_eq!(escape_data("%0A"), "%250A");
    }

    #[test]
    fn test_error_command() {
        assert_eq!(
            error_command("CONFIG_MISSING_INPUT: a version was not provided"),
            "::error::CONFIG_MISSING_INPUT: a version was not provided"
        );
    }
}
