//! SSH connection configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// Host key verification mode, analogous to OpenSSH's `StrictHostKeyChecking`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HostKeyVerification {
    /// Reject unknown and changed keys. Connection fails if the host
    /// is not already in known_hosts.
    Strict,

    /// Accept and auto-learn unknown keys, but reject changed keys.
    #[default]
    AcceptNew,

    /// Accept all keys without checking. For lab use only.
    Disabled,
}

/// SSH connection configuration.
#[derive(Debug, Clone)]
pub struct SshConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// SSH port.
    pub port: u16,

    /// Username for authentication.
    pub username: String,

    /// Authentication method.
    pub auth: AuthMethod,

    /// Connect timeout. Commands themselves are never timed out.
    pub connect_timeout: Duration,

    /// Host key verification mode.
    pub host_key_verification: HostKeyVerification,

    /// Path to known_hosts file.
    pub known_hosts_path: Option<PathBuf>,
}

impl SshConfig {
    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Authentication method for SSH connections.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Password authentication.
    Password(SecretString),

    /// Private key authentication.
    PrivateKey {
        /// Path to the private key file.
        path: PathBuf,
        /// Optional passphrase for encrypted keys.
        passphrase: Option<SecretString>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = SshConfig {
            host: "mx960.lab".to_string(),
            port: 830,
            username: "netops".to_string(),
            auth: AuthMethod::Password(SecretString::from("secret".to_string())),
            connect_timeout: Duration::from_secs(5),
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        };
        assert_eq!(config.socket_addr(), "mx960.lab:830");
        assert_eq!(config.host_key_verification, HostKeyVerification::AcceptNew);
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let auth = AuthMethod::Password(SecretString::from("hunter2".to_string()));
        assert!(!format!("{:?}", auth).contains("hunter2"));
    }
}
