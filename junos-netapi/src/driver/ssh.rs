//! Session that runs each command on its own SSH exec channel.

use std::time::Instant;

use log::{debug, trace};
use russh::ChannelMsg;

use super::Session;
use super::command::Command;
use super::response::Response;
use crate::error::{CommandError, Result};
use crate::transport::{SshConfig, SshTransport};

/// CLI session over SSH exec channels.
///
/// Commands are sent with their display suffix (`| display xml` etc.) and
/// stdout is collected until the device closes the channel.
pub struct SshSession {
    transport: SshTransport,
}

impl SshSession {
    /// Connect and authenticate.
    pub async fn connect(config: SshConfig) -> Result<Self> {
        let transport = SshTransport::connect(config).await?;
        Ok(Self { transport })
    }

    /// Run an already-rendered CLI line and collect its stdout.
    async fn exec(&self, cli_text: &str) -> Result<String> {
        let mut channel = self.transport.open_exec(cli_text).await?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut exit_status = None;

        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, ext: 1 } => stderr.extend_from_slice(data),
                ChannelMsg::ExitStatus { exit_status: status } => exit_status = Some(status),
                _ => {}
            }
        }

        trace!(
            "'{}' returned {} bytes stdout, {} bytes stderr",
            cli_text,
            stdout.len(),
            stderr.len()
        );

        match exit_status {
            Some(0) => Ok(String::from_utf8_lossy(&stdout).into_owned()),
            Some(status) => Err(CommandError::NonZeroExit {
                command: cli_text.to_string(),
                status,
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            }
            .into()),
            None => Err(CommandError::ChannelClosed {
                command: cli_text.to_string(),
            }
            .into()),
        }
    }
}

impl Session for SshSession {
    async fn run(&mut self, command: &Command) -> Result<Response> {
        let cli_text = command.cli_text();
        debug!("ssh exec: {}", cli_text);

        let start = Instant::now();
        let output = self.exec(&cli_text).await?;
        Ok(Response::new(cli_text, output, start.elapsed()))
    }

    async fn close(self) -> Result<()> {
        self.transport.close().await
    }

    fn is_alive(&self) -> bool {
        self.transport.is_alive()
    }
}
