//! `show version`.

use serde::{Deserialize, Serialize};

use super::junos::{self, Leaf, first, leaf};
use super::{Payload, lenient};
use crate::error::ParseError;

/// Identity of the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    pub host_name: String,
    pub product_model: String,
    pub product_name: String,
    pub junos_version: String,
}

/// Parse `show version`.
///
/// Virtual chassis and dual routing-engine devices wrap the reply in
/// `multi-routing-engine-results`; the first item is used.
pub fn parse_host_info(raw: &str) -> Result<HostInfo, ParseError> {
    match Payload::detect(raw)? {
        Payload::Xml(xml) => from_xml(xml),
        Payload::Json(json) => from_json(json),
        Payload::Text(_) => Err(ParseError::UnsupportedPayload {
            expected: "xml or json",
        }),
    }
}

/// Lenient form of [`parse_host_info`].
pub fn host_info(raw: &str) -> HostInfo {
    lenient("host info", parse_host_info(raw))
}

#[derive(Deserialize)]
struct XmlReply {
    #[serde(rename = "multi-routing-engine-results")]
    results: Option<XmlResults>,
    #[serde(rename = "software-information")]
    information: Option<XmlSoftware>,
}

#[derive(Deserialize)]
struct XmlResults {
    #[serde(rename = "multi-routing-engine-item", default)]
    items: Vec<XmlItem>,
}

#[derive(Deserialize)]
struct XmlItem {
    #[serde(rename = "software-information")]
    information: Option<XmlSoftware>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct XmlSoftware {
    host_name: String,
    product_model: String,
    product_name: String,
    junos_version: String,
}

fn from_xml(xml: &str) -> Result<HostInfo, ParseError> {
    let reply: XmlReply = quick_xml::de::from_str(xml)?;

    let software = match (reply.results, reply.information) {
        (Some(results), _) => results.items.into_iter().next().and_then(|i| i.information),
        (None, information) => information,
    }
    .ok_or(ParseError::MissingElement("software-information"))?;

    Ok(HostInfo {
        host_name: junos::trim(&software.host_name),
        product_model: junos::trim(&software.product_model),
        product_name: junos::trim(&software.product_name),
        junos_version: junos::trim(&software.junos_version),
    })
}

#[derive(Deserialize)]
struct JsonReply {
    #[serde(rename = "multi-routing-engine-results")]
    results: Option<Vec<Option<JsonResults>>>,
    #[serde(rename = "software-information")]
    information: Option<Vec<Option<JsonSoftware>>>,
}

#[derive(Deserialize)]
struct JsonResults {
    #[serde(rename = "multi-routing-engine-item", default)]
    items: Vec<Option<JsonItem>>,
}

#[derive(Deserialize)]
struct JsonItem {
    #[serde(rename = "software-information", default)]
    information: Vec<Option<JsonSoftware>>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct JsonSoftware {
    host_name: Leaf,
    product_model: Leaf,
    product_name: Leaf,
    junos_version: Leaf,
}

fn from_json(json: &str) -> Result<HostInfo, ParseError> {
    let reply: JsonReply = serde_json::from_str(json)?;

    let software = match (&reply.results, &reply.information) {
        (Some(results), _) => first(results)
            .and_then(|r| first(&r.items))
            .and_then(|i| first(&i.information)),
        (None, Some(information)) => first(information),
        (None, None) => None,
    }
    .ok_or(ParseError::MissingElement("software-information"))?;

    Ok(HostInfo {
        host_name: leaf(&software.host_name),
        product_model: leaf(&software.product_model),
        product_name: leaf(&software.product_name),
        junos_version: leaf(&software.junos_version),
    })
}
