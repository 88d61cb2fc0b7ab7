//! Sessions and command dispatch.
//!
//! A [`Session`] is an open, authenticated connection to one device.
//! [`Client`] opens sessions; [`execute`] sends one [`Command`] on a
//! session the caller passes in. Nothing here keeps a session around
//! between calls.

mod builder;
mod client;
pub mod command;
pub(crate) mod dispatch;
pub(crate) mod response;
mod ssh;

pub use builder::ClientBuilder;
pub use client::Client;
pub use command::{Command, Operation, OutputFormat};
pub use dispatch::execute;
pub use response::Response;
pub use ssh::SshSession;

use std::future::Future;

use crate::error::Result;

/// An open device session.
///
/// Implemented by [`SshSession`] and
/// [`NetconfSession`](crate::netconf::NetconfSession). Every method takes
/// `&mut self`, so a session never has two commands in flight.
pub trait Session: Send {
    /// Send a command and wait for its complete output.
    fn run(&mut self, command: &Command) -> impl Future<Output = Result<Response>> + Send;

    /// Close the session, releasing the transport.
    fn close(self) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sized;

    /// Check if the underlying SSH connection is still running.
    ///
    /// ```rust,no_run
    /// # use junos_netapi::driver::{Operation, OutputFormat, Session};
    /// # async fn example(client: &junos_netapi::Client) -> Result<(), junos_netapi::Error> {
    /// let mut session = client.connect_ssh().await?;
    /// if session.is_alive() {
    ///     let uptime = junos_netapi::ops::system_uptime(&mut session, OutputFormat::Json).await?;
    ///     println!("{:?}", uptime);
    /// }
    /// session.close().await?;
    /// # Ok(())
    /// # }
    /// ```
    fn is_alive(&self) -> bool;
}
