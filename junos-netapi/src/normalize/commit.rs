//! `show system commit`.

use serde::{Deserialize, Serialize};

use super::junos::{self, Leaf, Text, leaf};
use super::{Payload, lenient};
use crate::error::ParseError;

/// One entry of the commit history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub user: String,
    /// How the commit was made (`cli`, `netconf`, `junoscript`, ...).
    pub method: String,
    pub log: String,
    pub comment: String,
    pub timestamp: String,
}

/// Parse the commit history, newest first as the device lists it.
pub fn parse_commit_history(raw: &str) -> Result<Vec<CommitEntry>, ParseError> {
    match Payload::detect(raw)? {
        Payload::Xml(xml) => from_xml(xml),
        Payload::Json(json) => from_json(json),
        Payload::Text(_) => Err(ParseError::UnsupportedPayload {
            expected: "xml or json",
        }),
    }
}

/// Lenient form of [`parse_commit_history`].
pub fn commit_history(raw: &str) -> Vec<CommitEntry> {
    lenient("commit history", parse_commit_history(raw))
}

#[derive(Deserialize)]
struct XmlReply {
    #[serde(rename = "commit-information")]
    information: Option<XmlInformation>,
}

#[derive(Deserialize)]
struct XmlInformation {
    #[serde(rename = "commit-history", default)]
    history: Vec<XmlEntry>,
}

#[derive(Deserialize)]
struct XmlEntry {
    #[serde(default)]
    user: String,
    #[serde(default)]
    client: String,
    #[serde(default)]
    log: String,
    #[serde(default)]
    comment: String,
    #[serde(rename = "date-time", default)]
    date_time: Text,
}

fn from_xml(xml: &str) -> Result<Vec<CommitEntry>, ParseError> {
    let reply: XmlReply = quick_xml::de::from_str(xml)?;
    let information = reply
        .information
        .ok_or(ParseError::MissingElement("commit-information"))?;

    Ok(information
        .history
        .into_iter()
        .map(|e| CommitEntry {
            user: junos::trim(&e.user),
            method: junos::trim(&e.client),
            log: junos::trim(&e.log),
            comment: junos::trim(&e.comment),
            timestamp: e.date_time.trimmed(),
        })
        .collect())
}

#[derive(Deserialize)]
struct JsonReply {
    #[serde(rename = "commit-information")]
    information: Option<Vec<Option<JsonInformation>>>,
}

#[derive(Deserialize)]
struct JsonInformation {
    #[serde(rename = "commit-history", default)]
    history: Vec<Option<JsonEntry>>,
}

#[derive(Deserialize)]
struct JsonEntry {
    #[serde(default)]
    user: Leaf,
    #[serde(default)]
    client: Leaf,
    #[serde(default)]
    log: Leaf,
    #[serde(default)]
    comment: Leaf,
    #[serde(rename = "date-time", default)]
    date_time: Leaf,
}

fn from_json(json: &str) -> Result<Vec<CommitEntry>, ParseError> {
    let reply: JsonReply = serde_json::from_str(json)?;
    let blocks = reply
        .information
        .ok_or(ParseError::MissingElement("commit-information"))?;

    Ok(blocks
        .iter()
        .flatten()
        .flat_map(|b| b.history.iter().flatten())
        .map(|e| CommitEntry {
            user: leaf(&e.user),
            method: leaf(&e.client),
            log: leaf(&e.log),
            comment: leaf(&e.comment),
            timestamp: leaf(&e.date_time),
        })
        .collect())
}
