//! # junos-netapi
//!
//! Async client for pulling operational state out of Juniper Junos devices.
//!
//! Commands are sent over plain SSH exec channels or over NETCONF, and the
//! replies for a handful of well-known commands are normalized into flat,
//! serializable records.
//!
//! ## Features
//!
//! - Async SSH and NETCONF 1.0 sessions via russh
//! - Output format selection (`| display xml`, `| display json`, text)
//! - Normalized records for interfaces, BGP peers, commit history, uptime,
//!   LLDP neighbors, optics diagnostics and software version
//! - Raw passthrough for configuration, logs and arbitrary commands
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use junos_netapi::{Client, OutputFormat, Session, ops};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), junos_netapi::Error> {
//!     let client = Client::new("192.168.1.1", "admin", "secret");
//!
//!     let mut session = client.connect_ssh().await?;
//!     let peers = ops::bgp_summary(&mut session, OutputFormat::Json).await?;
//!     println!("{}", junos_netapi::normalize::to_json(&peers)?);
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod netconf;
pub mod normalize;
pub mod ops;
pub mod transport;

// Re-export main types for convenience
pub use driver::{
    Client, ClientBuilder, Command, Operation, OutputFormat, Response, Session, SshSession,
    execute,
};
pub use error::{Error, Result};
pub use netconf::NetconfSession;
pub use normalize::{
    BgpPeerSummary, CommitEntry, HostInfo, InterfaceDiagnostics, InterfaceStatus, LaneDiagnostics,
    LldpNeighbor, OpticsThresholds, Uptime, UptimeSummary,
};
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};
