//! SSH transport layer wrapping russh.
//!
//! Connection setup, authentication, host key checks and channel creation.

pub mod config;
mod ssh;

pub use config::{AuthMethod, HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
