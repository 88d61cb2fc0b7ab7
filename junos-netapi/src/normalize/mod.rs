//! Normalization of device output into flat records.
//!
//! Each output type has a strict `parse_*` function returning
//! `Result<_, ParseError>` and a lenient function of the same name without
//! the prefix. The lenient form logs the failure and returns an empty
//! value, so a device that answers with something unexpected never turns
//! into an error for callers of [`crate::ops`].
//!
//! The payload kind is sniffed from the output itself rather than taken
//! from the requested format, since a device that rejects a command
//! answers in text whatever was asked for.

pub mod bgp;
pub mod commit;
pub mod host;
pub mod interfaces;
pub(crate) mod junos;
pub mod lldp;
pub mod optics;
pub mod uptime;

pub use bgp::BgpPeerSummary;
pub use commit::CommitEntry;
pub use host::HostInfo;
pub use interfaces::InterfaceStatus;
pub use lldp::LldpNeighbor;
pub use optics::{InterfaceDiagnostics, LaneDiagnostics, OpticsThresholds};
pub use uptime::{Uptime, UptimeSummary};

use log::warn;
use serde::Serialize;

use crate::error::{Error, ParseError, Result};

/// Shape of a raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    Xml(&'a str),
    Json(&'a str),
    Text(&'a str),
}

impl<'a> Payload<'a> {
    /// Classify `raw` by its first non-whitespace character.
    pub fn detect(raw: &'a str) -> std::result::Result<Self, ParseError> {
        let trimmed = raw.trim();
        match trimmed.as_bytes().first() {
            None => Err(ParseError::Empty),
            Some(b'<') => Ok(Self::Xml(trimmed)),
            Some(b'{') | Some(b'[') => Ok(Self::Json(trimmed)),
            Some(_) => Ok(Self::Text(trimmed)),
        }
    }
}

/// Serialize a record or sequence of records to a JSON string.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Error::Serialize)
}

/// Swallow a parse failure, logging it.
pub(crate) fn lenient<T: Default>(what: &str, result: std::result::Result<T, ParseError>) -> T {
    result.unwrap_or_else(|e| {
        warn!("could not normalize {}: {}", what, e);
        T::default()
    })
}
