//! russh-backed connection to a Junos device.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use russh::Channel;
use russh::client::{self, Handle, Msg};
use russh::keys::{PrivateKeyWithHashAlg, PublicKey, load_secret_key};
use secrecy::ExposeSecret;

use super::config::{AuthMethod, HostKeyVerification, SshConfig};
use crate::error::{Result, TransportError};

/// Where the key check leaves its reason for refusing a server.
type RefusalSlot = Arc<Mutex<Option<TransportError>>>;

/// Authenticated SSH connection to a device.
///
/// One connection carries any number of channels: exec channels for CLI
/// commands, or a single `netconf` subsystem channel.
pub struct SshTransport {
    session: Handle<DeviceHandler>,
    config: SshConfig,
}

impl SshTransport {
    /// Open the TCP connection, verify the server key and log in.
    ///
    /// [`SshConfig::connect_timeout`] bounds the handshake only. Once
    /// connected there is no inactivity timeout, so a long-running command
    /// is never cut off.
    pub async fn connect(config: SshConfig) -> Result<Self> {
        let ssh_config = Arc::new(client::Config {
            inactivity_timeout: None,
            ..Default::default()
        });

        let refusal = RefusalSlot::default();
        let handler = DeviceHandler {
            host: config.host.clone(),
            port: config.port,
            verification: config.host_key_verification.clone(),
            known_hosts_path: config.known_hosts_path.clone(),
            refusal: Arc::clone(&refusal),
        };

        debug!("connecting to {}", config.socket_addr());

        let handshake = client::connect(ssh_config, (config.host.as_str(), config.port), handler);
        let mut session = match tokio::time::timeout(config.connect_timeout, handshake).await {
            Err(_) => return Err(TransportError::Timeout(config.connect_timeout).into()),
            // russh only reports UnknownKey; the handler knows why
            Ok(Err(e)) => {
                return Err(take_refusal(&refusal)
                    .unwrap_or(TransportError::Ssh(e))
                    .into());
            }
            Ok(Ok(session)) => session,
        };

        login(&mut session, &config).await?;

        debug!("authenticated to {} as {}", config.socket_addr(), config.username);

        Ok(Self { session, config })
    }

    /// Start `command` on a new exec channel.
    pub async fn open_exec(&self, command: &str) -> Result<Channel<Msg>> {
        let channel = self.open_channel().await?;
        channel
            .exec(true, command)
            .await
            .map_err(TransportError::Ssh)?;
        Ok(channel)
    }

    /// Bind a new channel to the named subsystem, e.g. `netconf`.
    pub async fn open_subsystem(&self, name: &str) -> Result<Channel<Msg>> {
        let channel = self.open_channel().await?;
        channel
            .request_subsystem(true, name)
            .await
            .map_err(TransportError::Ssh)?;
        Ok(channel)
    }

    async fn open_channel(&self) -> Result<Channel<Msg>> {
        Ok(self
            .session
            .channel_open_session()
            .await
            .map_err(TransportError::Ssh)?)
    }

    /// False once the server or the network has dropped the connection.
    pub fn is_alive(&self) -> bool {
        !self.session.is_closed()
    }

    /// Send an SSH disconnect and drop the connection.
    pub async fn close(self) -> Result<()> {
        debug!("disconnecting from {}", self.config.socket_addr());
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

fn take_refusal(slot: &RefusalSlot) -> Option<TransportError> {
    slot.lock().ok().and_then(|mut refusal| refusal.take())
}

async fn login(session: &mut Handle<DeviceHandler>, config: &SshConfig) -> Result<()> {
    let user = config.username.as_str();

    let accepted = match &config.auth {
        AuthMethod::Password(password) => session
            .authenticate_password(user, password.expose_secret())
            .await
            .map_err(TransportError::Ssh)?
            .success(),
        AuthMethod::PrivateKey { path, passphrase } => {
            let passphrase = passphrase.as_ref().map(|p| p.expose_secret());
            let key = load_secret_key(path, passphrase)
                .map_err(|e| TransportError::Key(e.to_string()))?;

            // Only matters for RSA keys; None means ssh-rsa (SHA-1).
            let rsa_hash = session
                .best_supported_rsa_hash()
                .await
                .map_err(TransportError::Ssh)?
                .flatten();

            session
                .authenticate_publickey(user, PrivateKeyWithHashAlg::new(Arc::new(key), rsa_hash))
                .await
                .map_err(TransportError::Ssh)?
                .success()
        }
    };

    if accepted {
        Ok(())
    } else {
        Err(TransportError::AuthenticationFailed {
            user: user.to_string(),
        }
        .into())
    }
}

/// russh callbacks for one connection. Only server key checking is
/// customized.
struct DeviceHandler {
    host: String,
    port: u16,
    verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    refusal: RefusalSlot,
}

impl DeviceHandler {
    /// Look the server key up in known_hosts.
    ///
    /// `Ok(false)` means the host has no entry yet. A different key on file
    /// is [`TransportError::HostKeyChanged`].
    fn lookup(&self, key: &PublicKey) -> std::result::Result<bool, TransportError> {
        let found = match &self.known_hosts_path {
            Some(path) => russh::keys::check_known_hosts_path(&self.host, self.port, key, path),
            None => russh::keys::check_known_hosts(&self.host, self.port, key),
        };

        found.map_err(|e| match e {
            russh::keys::Error::KeyChanged { line } => TransportError::HostKeyChanged {
                host: self.host.clone(),
                port: self.port,
                line,
            },
            other => TransportError::KnownHosts(other.to_string()),
        })
    }

    /// Append the server key to known_hosts.
    fn remember(&self, key: &PublicKey) -> std::result::Result<(), TransportError> {
        use russh::keys::known_hosts::{learn_known_hosts, learn_known_hosts_path};

        let learned = match &self.known_hosts_path {
            Some(path) => learn_known_hosts_path(&self.host, self.port, key, path),
            None => learn_known_hosts(&self.host, self.port, key),
        };
        learned.map_err(|e| TransportError::KnownHosts(e.to_string()))
    }

    fn refuse(&self, reason: TransportError) -> bool {
        if let Ok(mut slot) = self.refusal.lock() {
            *slot = Some(reason);
        }
        false
    }
}

impl client::Handler for DeviceHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        if self.verification == HostKeyVerification::Disabled {
            return Ok(true);
        }

        let trusted = match self.lookup(server_public_key) {
            Ok(true) => true,
            Ok(false) if self.verification == HostKeyVerification::AcceptNew => {
                debug!("learning host key for {}:{}", self.host, self.port);
                if let Err(e) = self.remember(server_public_key) {
                    warn!("could not record host key for {}: {}", self.host, e);
                }
                true
            }
            Ok(false) => self.refuse(TransportError::HostKeyUnknown {
                host: self.host.clone(),
                port: self.port,
            }),
            Err(e) => self.refuse(e),
        };

        Ok(trusted)
    }
}
