//! `show lldp neighbors`.

use serde::{Deserialize, Serialize};

use super::junos::{self, Leaf, leaf};
use super::{Payload, lenient};
use crate::error::ParseError;

/// One LLDP neighbor as seen from a local port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LldpNeighbor {
    /// Parent interface of the local port (`ae0` for a LAG member, `-` otherwise).
    pub local_interface: String,
    pub local_port_id: String,
    pub remote_chassis_id: String,
    pub remote_chassis_id_subtype: String,
    pub remote_port_description: String,
    pub remote_system_name: String,
}

/// Parse the LLDP neighbor table.
pub fn parse_lldp_neighbors(raw: &str) -> Result<Vec<LldpNeighbor>, ParseError> {
    match Payload::detect(raw)? {
        Payload::Xml(xml) => from_xml(xml),
        Payload::Json(json) => from_json(json),
        Payload::Text(_) => Err(ParseError::UnsupportedPayload {
            expected: "xml or json",
        }),
    }
}

/// Lenient form of [`parse_lldp_neighbors`].
pub fn lldp_neighbors(raw: &str) -> Vec<LldpNeighbor> {
    lenient("lldp neighbors", parse_lldp_neighbors(raw))
}

#[derive(Deserialize)]
struct XmlReply {
    #[serde(rename = "lldp-neighbors-information")]
    information: Option<XmlInformation>,
}

#[derive(Deserialize)]
struct XmlInformation {
    #[serde(rename = "lldp-neighbor-information", default)]
    neighbors: Vec<XmlNeighbor>,
}

#[derive(Deserialize)]
struct XmlNeighbor {
    #[serde(rename = "lldp-local-parent-interface-name", default)]
    local_interface: String,
    #[serde(rename = "lldp-local-port-id", default)]
    local_port_id: String,
    #[serde(rename = "lldp-remote-chassis-id", default)]
    remote_chassis_id: String,
    #[serde(rename = "lldp-remote-chassis-id-subtype", default)]
    remote_chassis_id_subtype: String,
    #[serde(rename = "lldp-remote-port-description", default)]
    remote_port_description: String,
    #[serde(rename = "lldp-remote-system-name", default)]
    remote_system_name: String,
}

fn from_xml(xml: &str) -> Result<Vec<LldpNeighbor>, ParseError> {
    let reply: XmlReply = quick_xml::de::from_str(xml)?;
    let information = reply
        .information
        .ok_or(ParseError::MissingElement("lldp-neighbors-information"))?;

    Ok(information
        .neighbors
        .into_iter()
        .map(|n| LldpNeighbor {
            local_interface: junos::trim(&n.local_interface),
            local_port_id: junos::trim(&n.local_port_id),
            remote_chassis_id: junos::trim(&n.remote_chassis_id),
            remote_chassis_id_subtype: junos::trim(&n.remote_chassis_id_subtype),
            remote_port_description: junos::trim(&n.remote_port_description),
            remote_system_name: junos::trim(&n.remote_system_name),
        })
        .collect())
}

#[derive(Deserialize)]
struct JsonReply {
    #[serde(rename = "lldp-neighbors-information")]
    information: Option<Vec<Option<JsonInformation>>>,
}

#[derive(Deserialize)]
struct JsonInformation {
    #[serde(rename = "lldp-neighbor-information", default)]
    neighbors: Vec<Option<JsonNeighbor>>,
}

#[derive(Deserialize)]
struct JsonNeighbor {
    #[serde(rename = "lldp-local-parent-interface-name", default)]
    local_interface: Leaf,
    #[serde(rename = "lldp-local-port-id", default)]
    local_port_id: Leaf,
    #[serde(rename = "lldp-remote-chassis-id", default)]
    remote_chassis_id: Leaf,
    #[serde(rename = "lldp-remote-chassis-id-subtype", default)]
    remote_chassis_id_subtype: Leaf,
    #[serde(rename = "lldp-remote-port-description", default)]
    remote_port_description: Leaf,
    #[serde(rename = "lldp-remote-system-name", default)]
    remote_system_name: Leaf,
}

fn from_json(json: &str) -> Result<Vec<LldpNeighbor>, ParseError> {
    let reply: JsonReply = serde_json::from_str(json)?;
    let blocks = reply
        .information
        .ok_or(ParseError::MissingElement("lldp-neighbors-information"))?;

    Ok(blocks
        .iter()
        .flatten()
        .flat_map(|b| b.neighbors.iter().flatten())
        .map(|n| LldpNeighbor {
            local_interface: leaf(&n.local_interface),
            local_port_id: leaf(&n.local_port_id),
            remote_chassis_id: leaf(&n.remote_chassis_id),
            remote_chassis_id_subtype: leaf(&n.remote_chassis_id_subtype),
            remote_port_description: leaf(&n.remote_port_description),
            remote_system_name: leaf(&n.remote_system_name),
        })
        .collect())
}
