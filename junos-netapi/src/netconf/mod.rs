//! NETCONF 1.0 over SSH.
//!
//! Only what is needed to run operational commands: hello exchange,
//! `]]>]]>` framing, `<rpc>` envelopes and `<rpc-reply>` unwrapping.

pub mod message;
mod session;

pub use message::{RpcError, ServerHello};
pub use session::{NetconfSession, SUBSYSTEM};
