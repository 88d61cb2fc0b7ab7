//! Builder for creating device clients.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::client::Client;
use crate::error::{Error, Result};
use crate::transport::{AuthMethod, HostKeyVerification};

/// Builder for constructing a [`Client`].
///
/// # Example
///
/// ```rust,no_run
/// use junos_netapi::ClientBuilder;
/// use junos_netapi::transport::HostKeyVerification;
///
/// # fn example() -> Result<(), junos_netapi::Error> {
/// let client = ClientBuilder::new("192.168.1.1")
///     .username("admin")
///     .password("secret")
///     .host_key_verification(HostKeyVerification::Disabled)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    host: String,
    port: Option<u16>,
    username: Option<String>,
    auth: Option<AuthMethod>,
    connect_timeout: Duration,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
}

impl ClientBuilder {
    /// Create a new client builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            username: None,
            auth: None,
            connect_timeout: Duration::from_secs(30),
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Set the port. Defaults to 22 for SSH sessions and 830 for NETCONF.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = Some(AuthMethod::Password(SecretString::from(password.into())));
        self
    }

    /// Set private key authentication.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        });
        self
    }

    /// Set private key authentication with passphrase.
    pub fn private_key_with_passphrase(
        mut self,
        key_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        });
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Use a known_hosts file other than `~/.ssh/known_hosts`.
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Build the client.
    ///
    /// This does not connect. Call [`Client::connect_ssh`] or
    /// [`Client::connect_netconf`] to open a session.
    pub fn build(self) -> Result<Client> {
        if self.host.trim().is_empty() {
            return Err(Error::Config {
                message: "Host is required".to_string(),
            });
        }

        let username = self.username.ok_or_else(|| Error::Config {
            message: "Username is required".to_string(),
        })?;

        let auth = self.auth.ok_or_else(|| Error::Config {
            message: "A password or private key is required".to_string(),
        })?;

        Ok(Client {
            host: self.host,
            port: self.port,
            username,
            auth,
            connect_timeout: self.connect_timeout,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_username() {
        let result = ClientBuilder::new("r1").password("secret").build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_build_requires_auth() {
        let result = ClientBuilder::new("r1").username("netops").build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_build_requires_host() {
        let result = ClientBuilder::new(" ")
            .username("netops")
            .password("secret")
            .build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_build_with_key() {
        let client = ClientBuilder::new("r1")
            .username("netops")
            .private_key_with_passphrase("/home/netops/.ssh/id_ed25519", "pw")
            .port(2222)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let config = client.ssh_config();
        assert_eq!(config.port, 2222);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(matches!(config.auth, AuthMethod::PrivateKey { .. }));
    }
}
