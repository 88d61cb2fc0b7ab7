//! Response type for command execution results.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

/// Lines Junos prints instead of output when it rejects a command.
static FAILURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^\s*((?:error:|syntax error|unknown command|invalid command).*?)\s*$")
        .unwrap()
});

/// Raw output of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The command as it was sent (including any display suffix).
    pub command: String,

    /// The device output, unmodified.
    pub output: String,

    /// Time taken to execute the command.
    pub elapsed: Duration,

    /// First CLI error line found in the output, if any.
    pub failure_message: Option<String>,
}

impl Response {
    /// Create a new response.
    pub fn new(command: impl Into<String>, output: impl Into<String>, elapsed: Duration) -> Self {
        let output = output.into();
        let failure_message = FAILURE.captures(&output).map(|c| c[1].to_string());
        Self {
            command: command.into(),
            output,
            elapsed,
            failure_message,
        }
    }

    /// Check if the device accepted the command.
    ///
    /// The output is still returned as-is when this is `false`.
    pub fn is_success(&self) -> bool {
        self.failure_message.is_none()
    }

    /// Consume the response, keeping only the output.
    pub fn into_output(self) -> String {
        self.output
    }

    /// Get the output lines as an iterator.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines()
    }

    /// Check if the device returned nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.output.trim().is_empty()
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_accessors() {
        let response = Response::new(
            "show system uptime",
            "Current time: now\nSystem booted: then\n",
            Duration::from_millis(12),
        );
        assert_eq!(response.lines().count(), 2);
        assert!(!response.is_empty());
        assert!(response.is_success());
        assert_eq!(response.to_string(), response.output);
        assert_eq!(response.into_output(), "Current time: now\nSystem booted: then\n");
    }

    #[test]
    fn test_cli_error_detected() {
        let response = Response::new(
            "show bgp summry",
            "                 ^\nsyntax error, expecting <command>.\n",
            Duration::ZERO,
        );
        assert!(!response.is_success());
        assert_eq!(
            response.failure_message.as_deref(),
            Some("syntax error, expecting <command>.")
        );

        let response = Response::new(
            "show bgp summary",
            "error: the bgp subsystem is not running\n",
            Duration::ZERO,
        );
        assert_eq!(
            response.failure_message.as_deref(),
            Some("error: the bgp subsystem is not running")
        );

        let response = Response::new("show vlans", "\nUnknown command: vlans\n", Duration::ZERO);
        assert_eq!(
            response.failure_message.as_deref(),
            Some("Unknown command: vlans")
        );
    }

    #[test]
    fn test_structured_output_is_success() {
        let response = Response::new(
            "show bgp summary | display xml",
            "<rpc-reply><bgp-information><peer-count>0</peer-count></bgp-information></rpc-reply>",
            Duration::ZERO,
        );
        assert!(response.is_success());
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let response = Response::new("show log messages", " \r\n", Duration::ZERO);
        assert!(response.is_empty());
    }
}
