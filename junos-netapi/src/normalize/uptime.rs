//! `show system uptime`.
//!
//! Only the JSON rendering is normalized; text and XML pass through.

use serde::{Deserialize, Serialize};

use super::junos::{Leaf, first, leaf};
use super::{Payload, lenient};
use crate::driver::OutputFormat;
use crate::error::ParseError;

/// Router clock summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UptimeSummary {
    pub current_time: String,
    pub last_configured_time: String,
    pub system_booted_time: String,
}

/// Result of the uptime operation.
///
/// Serializes untagged: a JSON request yields the flat summary object,
/// anything else the raw device text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Uptime {
    Summary(UptimeSummary),
    Raw(String),
}

impl Uptime {
    /// The parsed summary, if this was a JSON request.
    pub fn summary(&self) -> Option<&UptimeSummary> {
        match self {
            Self::Summary(summary) => Some(summary),
            Self::Raw(_) => None,
        }
    }
}

/// Parse the JSON uptime payload.
///
/// Unwraps one `multi-routing-engine-results[0].multi-routing-engine-item[0]`
/// level when present; single routing-engine devices reply with a bare
/// `system-uptime-information`.
pub fn parse_uptime(raw: &str) -> Result<UptimeSummary, ParseError> {
    let json = match Payload::detect(raw)? {
        Payload::Json(json) => json,
        _ => return Err(ParseError::UnsupportedPayload { expected: "json" }),
    };

    let reply: JsonReply = serde_json::from_str(json)?;

    let information = match (&reply.multi_routing_engine_results, &reply.information) {
        (Some(results), _) => {
            let results = first(results)
                .ok_or(ParseError::MissingElement("multi-routing-engine-results"))?;
            let item = first(&results.items)
                .ok_or(ParseError::MissingElement("multi-routing-engine-item"))?;
            first(&item.information)
        }
        (None, Some(information)) => first(information),
        (None, None) => None,
    }
    .ok_or(ParseError::MissingElement("system-uptime-information"))?;

    Ok(UptimeSummary {
        current_time: date_time(&information.current_time),
        last_configured_time: date_time(&information.last_configured_time),
        system_booted_time: date_time(&information.system_booted_time),
    })
}

/// Lenient form of [`parse_uptime`].
pub fn uptime_summary(raw: &str) -> UptimeSummary {
    lenient("uptime", parse_uptime(raw))
}

/// Normalize according to the format that was requested.
pub fn uptime(raw: &str, format: OutputFormat) -> Uptime {
    match format {
        OutputFormat::Json => Uptime::Summary(uptime_summary(raw)),
        OutputFormat::Text | OutputFormat::Xml => Uptime::Raw(raw.to_string()),
    }
}

#[derive(Deserialize)]
struct JsonReply {
    #[serde(rename = "multi-routing-engine-results")]
    multi_routing_engine_results: Option<Vec<Option<JsonResults>>>,
    #[serde(rename = "system-uptime-information")]
    information: Option<Vec<Option<JsonInformation>>>,
}

#[derive(Deserialize)]
struct JsonResults {
    #[serde(rename = "multi-routing-engine-item", default)]
    items: Vec<Option<JsonItem>>,
}

#[derive(Deserialize)]
struct JsonItem {
    #[serde(rename = "system-uptime-information", default)]
    information: Vec<Option<JsonInformation>>,
}

#[derive(Deserialize)]
struct JsonInformation {
    #[serde(rename = "current-time", default)]
    current_time: Vec<Option<JsonTime>>,
    #[serde(rename = "last-configured-time", default)]
    last_configured_time: Vec<Option<JsonTime>>,
    #[serde(rename = "system-booted-time", default)]
    system_booted_time: Vec<Option<JsonTime>>,
}

#[derive(Deserialize)]
struct JsonTime {
    #[serde(rename = "date-time", default)]
    date_time: Leaf,
}

fn date_time(block: &[Option<JsonTime>]) -> String {
    first(block).map(|t| leaf(&t.date_time)).unwrap_or_default()
}
