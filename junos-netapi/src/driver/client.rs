//! Device client: credentials plus the two session providers.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::builder::ClientBuilder;
use super::ssh::SshSession;
use crate::error::Result;
use crate::netconf::NetconfSession;
use crate::transport::{AuthMethod, HostKeyVerification, SshConfig};

/// Default port for CLI sessions.
pub const SSH_PORT: u16 = 22;

/// Default port for NETCONF over SSH (RFC 6242).
pub const NETCONF_PORT: u16 = 830;

/// Connection details for one device.
///
/// A client holds no connection. Each `connect_*` call returns a new
/// session that the caller owns and must close.
#[derive(Debug, Clone)]
pub struct Client {
    pub(super) host: String,
    pub(super) port: Option<u16>,
    pub(super) username: String,
    pub(super) auth: AuthMethod,
    pub(super) connect_timeout: Duration,
    pub(super) host_key_verification: HostKeyVerification,
    pub(super) known_hosts_path: Option<PathBuf>,
}

impl Client {
    /// Client using password authentication and default settings.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: None,
            username: username.into(),
            auth: AuthMethod::Password(SecretString::from(password.into())),
            connect_timeout: Duration::from_secs(30),
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Start a [`ClientBuilder`] for `host`.
    pub fn builder(host: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(host)
    }

    /// Target host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Username used to authenticate.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Open a CLI session over SSH.
    pub async fn connect_ssh(&self) -> Result<SshSession> {
        SshSession::connect(self.config_for(SSH_PORT)).await
    }

    /// Open a NETCONF session.
    pub async fn connect_netconf(&self) -> Result<NetconfSession> {
        NetconfSession::connect(self.config_for(NETCONF_PORT)).await
    }

    /// SSH configuration for a CLI session.
    pub fn ssh_config(&self) -> SshConfig {
        self.config_for(SSH_PORT)
    }

    /// SSH configuration for a NETCONF session.
    pub fn netconf_config(&self) -> SshConfig {
        self.config_for(NETCONF_PORT)
    }

    fn config_for(&self, default_port: u16) -> SshConfig {
        SshConfig {
            host: self.host.clone(),
            port: self.port.unwrap_or(default_port),
            username: self.username.clone(),
            auth: self.auth.clone(),
            connect_timeout: self.connect_timeout,
            host_key_verification: self.host_key_verification.clone(),
            known_hosts_path: self.known_hosts_path.clone(),
        }
    }
}
