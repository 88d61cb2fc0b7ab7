//! NETCONF session over the SSH `netconf` subsystem.

use std::time::Instant;

use log::{debug, trace, warn};
use russh::client::Msg;
use russh::{Channel, ChannelMsg};

use super::message::{self, ServerHello};
use crate::channel::{END_OF_MESSAGE, FrameBuffer};
use crate::driver::{Command, Response, Session};
use crate::error::{CommandError, Result, TransportError};
use crate::transport::{SshConfig, SshTransport};

/// Name of the SSH subsystem that carries NETCONF.
pub const SUBSYSTEM: &str = "netconf";

/// NETCONF 1.0 session.
///
/// Commands are sent as `<command format="...">` RPCs and the reply is
/// unwrapped so that callers see the same payload the CLI would print
/// with the matching `| display` suffix.
pub struct NetconfSession {
    transport: SshTransport,
    channel: Channel<Msg>,
    buffer: FrameBuffer,
    message_id: u64,
    hello: ServerHello,
}

impl NetconfSession {
    /// Connect, start the subsystem and exchange hellos.
    pub async fn connect(config: SshConfig) -> Result<Self> {
        let transport = SshTransport::connect(config).await?;
        let channel = transport.open_subsystem(SUBSYSTEM).await?;

        let mut session = Self {
            transport,
            channel,
            buffer: FrameBuffer::default(),
            message_id: 0,
            hello: ServerHello::default(),
        };

        let server_hello = session.read_message().await?;
        session.hello = ServerHello::parse(&server_hello)?;
        session.write_message(&message::client_hello()).await?;

        debug!(
            "netconf session {:?} established ({} capabilities)",
            session.hello.session_id,
            session.hello.capabilities.len()
        );

        Ok(session)
    }

    /// Session id the server assigned in its hello.
    pub fn session_id(&self) -> Option<u64> {
        self.hello.session_id
    }

    /// Capabilities the server advertised.
    pub fn capabilities(&self) -> &[String] {
        &self.hello.capabilities
    }

    /// Send one RPC and wait for its reply.
    ///
    /// Fails with [`CommandError::Rpc`] when the reply carries an
    /// `<rpc-error>` of severity `error`; warnings are logged.
    pub async fn rpc(&mut self, body: &str) -> Result<String> {
        self.message_id += 1;
        self.write_message(&message::rpc(self.message_id, body)).await?;
        let reply = self.read_message().await?;

        let (fatal, warnings): (Vec<_>, Vec<_>) = message::rpc_errors(&reply)?
            .into_iter()
            .partition(|e| e.is_fatal());

        for warning in warnings {
            warn!("netconf rpc warning: {}", warning.message);
        }

        if !fatal.is_empty() {
            let message = fatal
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CommandError::Rpc { message }.into());
        }

        Ok(reply)
    }

    async fn write_message(&mut self, message: &str) -> Result<()> {
        trace!("netconf >> {} bytes", message.len());
        let mut data = Vec::with_capacity(message.len() + END_OF_MESSAGE.len());
        data.extend_from_slice(message.as_bytes());
        data.extend_from_slice(END_OF_MESSAGE);
        self.channel
            .data(&data[..])
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }

    async fn read_message(&mut self) -> Result<String> {
        loop {
            if let Some(frame) = self.buffer.next_frame() {
                trace!("netconf << {} bytes", frame.len());
                return Ok(String::from_utf8_lossy(&frame).into_owned());
            }

            match self.channel.wait().await {
                Some(ChannelMsg::Data { ref data }) => self.buffer.extend(data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    if !self.buffer.is_empty() {
                        warn!(
                            "netconf channel closed with {} bytes of unterminated message",
                            self.buffer.len()
                        );
                    }
                    return Err(CommandError::ChannelClosed {
                        command: format!("netconf message {}", self.message_id),
                    }
                    .into());
                }
                Some(_) => {}
            }
        }
    }
}

impl Session for NetconfSession {
    async fn run(&mut self, command: &Command) -> Result<Response> {
        let body = message::command_body(command);
        debug!("netconf command: {}", body);

        let start = Instant::now();
        let reply = self.rpc(&body).await?;
        let output = message::unwrap_reply(&reply, command.format())?;
        Ok(Response::new(command.cli_text(), output, start.elapsed()))
    }

    async fn close(mut self) -> Result<()> {
        if let Err(e) = self.rpc(message::close_session_body()).await {
            warn!("close-session failed: {}", e);
        }
        if let Err(e) = self.channel.close().await {
            debug!("netconf channel already closed: {}", e);
        }
        self.transport.close().await
    }

    fn is_alive(&self) -> bool {
        self.transport.is_alive()
    }
}
