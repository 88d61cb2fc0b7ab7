//! Commands and output formats.
//!
//! Every supported operational command is a variant of [`Operation`], so
//! the command surface is fixed and can be tested exhaustively. A
//! [`Command`] pairs a base CLI text with the [`OutputFormat`] the caller
//! asked for.

use std::borrow::Cow;
use std::fmt;

/// Output format requested from the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Device-default text rendering.
    #[default]
    Text,
    /// `| display xml`
    Xml,
    /// `| display json`
    Json,
}

impl OutputFormat {
    /// Parse a caller-supplied format name.
    ///
    /// `"xml"` and `"json"` match case-insensitively; anything else,
    /// including padded names such as `" xml "`, is [`OutputFormat::Text`].
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("xml") {
            Self::Xml
        } else if name.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// The CLI pipe that selects this format, if any.
    pub fn display_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Xml => Some("| display xml"),
            Self::Json => Some("| display json"),
        }
    }

    /// Value of the NETCONF `<command format="...">` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

impl From<&str> for OutputFormat {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported operational commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Configuration,
    InterfaceDescriptions,
    BgpSummary,
    LogMessages,
    InterfaceEvents,
    CommitHistory,
    LldpNeighbors,
    SystemUptime,
    OpticsDiagnostics,
    Version,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 10] = [
        Operation::Configuration,
        Operation::InterfaceDescriptions,
        Operation::BgpSummary,
        Operation::LogMessages,
        Operation::InterfaceEvents,
        Operation::CommitHistory,
        Operation::LldpNeighbors,
        Operation::SystemUptime,
        Operation::OpticsDiagnostics,
        Operation::Version,
    ];

    /// The Junos CLI text for this operation.
    pub fn cli(&self) -> &'static str {
        match self {
            Self::Configuration => "show configuration",
            Self::InterfaceDescriptions => "show interfaces descriptions",
            Self::BgpSummary => "show bgp summary",
            Self::LogMessages => "show log messages",
            Self::InterfaceEvents => "show log intf-events",
            Self::CommitHistory => "show system commit",
            Self::LldpNeighbors => "show lldp neighbors",
            Self::SystemUptime => "show system uptime",
            Self::OpticsDiagnostics => "show interfaces diagnostics optics",
            Self::Version => "show version",
        }
    }

    /// Build a command for this operation in the given format.
    pub fn with_format(self, format: OutputFormat) -> Command {
        Command::new(self, format)
    }
}

/// A command ready to be sent to a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    base: Cow<'static, str>,
    format: OutputFormat,
}

impl Command {
    /// Command for a supported operation.
    pub fn new(operation: Operation, format: OutputFormat) -> Self {
        Self {
            base: Cow::Borrowed(operation.cli()),
            format,
        }
    }

    /// Free-form command text.
    ///
    /// The text is sent as given; no validation is performed.
    pub fn raw(text: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            base: Cow::Owned(text.into()),
            format,
        }
    }

    /// The command without any format suffix.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The requested output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Full CLI text including the display suffix.
    pub fn cli_text(&self) -> String {
        match self.format.display_suffix() {
            Some(suffix) => format!("{} {}", self.base, suffix),
            None => self.base.to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cli_text())
    }
}
