//! Error types for junos-netapi.

use thiserror::Error;

/// Main error type for junos-netapi operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Errors raised while a command runs on an open session
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Device output did not match the expected schema
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid client configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Failed to serialize a normalized record
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Server presented a key that differs from known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// Strict verification and the host is not in known_hosts
    #[error("Host key for {host}:{port} is not in known_hosts")]
    HostKeyUnknown { host: String, port: u16 },

    /// Reading or writing known_hosts failed
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Connecting timed out
    #[error("Connection timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Command execution errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The remote command exited with a non-zero status
    #[error("Command '{command}' exited with status {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: u32,
        stderr: String,
    },

    /// The channel closed before the command output was complete
    #[error("Channel closed while running '{command}'")]
    ChannelClosed { command: String },

    /// The device answered the RPC with an error
    #[error("RPC error: {message}")]
    Rpc { message: String },

    /// NETCONF hello or reply could not be understood
    #[error("NETCONF protocol error: {message}")]
    Netconf { message: String },
}

/// Normalization errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Device returned no output
    #[error("Empty payload")]
    Empty,

    /// Payload is not in a format this normalizer understands
    #[error("Unsupported payload, expected {expected}")]
    UnsupportedPayload { expected: &'static str },

    /// XML did not deserialize
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// JSON did not deserialize
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required element is absent
    #[error("Missing element '{0}'")]
    MissingElement(&'static str),
}

/// Result type alias using junos-netapi's Error.
pub type Result<T> = std::result::Result<T, Error>;
