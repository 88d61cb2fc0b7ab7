//! `show interfaces descriptions`.

use serde::{Deserialize, Serialize};

use super::junos::{self, Leaf, leaf};
use super::{Payload, lenient};
use crate::error::ParseError;

/// Status of one physical or logical interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceStatus {
    pub name: String,
    pub admin_status: String,
    pub oper_status: String,
    pub description: String,
}

/// Parse interface descriptions, physical interfaces first, then logical.
///
/// Accepts the `| display xml` or `| display json` rendering.
pub fn parse_interfaces(raw: &str) -> Result<Vec<InterfaceStatus>, ParseError> {
    match Payload::detect(raw)? {
        Payload::Xml(xml) => from_xml(xml),
        Payload::Json(json) => from_json(json),
        Payload::Text(_) => Err(ParseError::UnsupportedPayload {
            expected: "xml or json",
        }),
    }
}

/// Lenient form of [`parse_interfaces`].
pub fn interfaces(raw: &str) -> Vec<InterfaceStatus> {
    lenient("interfaces", parse_interfaces(raw))
}

#[derive(Deserialize)]
struct XmlReply {
    #[serde(rename = "interface-information")]
    information: Option<XmlInformation>,
}

#[derive(Default, Deserialize)]
struct XmlInformation {
    #[serde(rename = "physical-interface", default)]
    physical: Vec<XmlInterface>,
    #[serde(rename = "logical-interface", default)]
    logical: Vec<XmlInterface>,
}

#[derive(Default, Deserialize)]
struct XmlInterface {
    #[serde(default)]
    name: String,
    #[serde(rename = "admin-status", default)]
    admin_status: String,
    #[serde(rename = "oper-status", default)]
    oper_status: String,
    #[serde(default)]
    description: String,
}

impl From<XmlInterface> for InterfaceStatus {
    fn from(x: XmlInterface) -> Self {
        Self {
            name: junos::trim(&x.name),
            admin_status: junos::trim(&x.admin_status),
            oper_status: junos::trim(&x.oper_status),
            description: junos::trim(&x.description),
        }
    }
}

fn from_xml(xml: &str) -> Result<Vec<InterfaceStatus>, ParseError> {
    let reply: XmlReply = quick_xml::de::from_str(xml)?;
    let information = reply
        .information
        .ok_or(ParseError::MissingElement("interface-information"))?;

    Ok(information
        .physical
        .into_iter()
        .chain(information.logical)
        .map(InterfaceStatus::from)
        .collect())
}

#[derive(Deserialize)]
struct JsonReply {
    #[serde(rename = "interface-information")]
    information: Option<Vec<Option<JsonInformation>>>,
}

#[derive(Deserialize)]
struct JsonInformation {
    #[serde(rename = "physical-interface", default)]
    physical: Vec<Option<JsonInterface>>,
    #[serde(rename = "logical-interface", default)]
    logical: Vec<Option<JsonInterface>>,
}

#[derive(Deserialize)]
struct JsonInterface {
    #[serde(default)]
    name: Leaf,
    #[serde(rename = "admin-status", default)]
    admin_status: Leaf,
    #[serde(rename = "oper-status", default)]
    oper_status: Leaf,
    #[serde(default)]
    description: Leaf,
}

impl From<&JsonInterface> for InterfaceStatus {
    fn from(j: &JsonInterface) -> Self {
        Self {
            name: leaf(&j.name),
            admin_status: leaf(&j.admin_status),
            oper_status: leaf(&j.oper_status),
            description: leaf(&j.description),
        }
    }
}

fn from_json(json: &str) -> Result<Vec<InterfaceStatus>, ParseError> {
    let reply: JsonReply = serde_json::from_str(json)?;
    let blocks = reply
        .information
        .ok_or(ParseError::MissingElement("interface-information"))?;
    let blocks: Vec<&JsonInformation> = blocks.iter().flatten().collect();

    let physical = blocks.iter().flat_map(|b| b.physical.iter().flatten());
    let logical = blocks.iter().flat_map(|b| b.logical.iter().flatten());

    Ok(physical.chain(logical).map(InterfaceStatus::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_physical(name: &str, admin: &str, oper: &str, description: &str) -> String {
        format!(
            "<physical-interface>\n<name>\n{}\n</name>\n<admin-status>{}</admin-status>\n<oper-status>{}</oper-status>\n<description>{}</description>\n<speed>10Gbps</speed>\n</physical-interface>\n",
            name, admin, oper, description
        )
    }

    fn xml_logical(name: &str, admin: &str, oper: &str, description: &str) -> String {
        format!(
            "<logical-interface>\n<name>{}</name>\n<admin-status>{}</admin-status>\n<oper-status>{}</oper-status>\n<description>{}</description>\n</logical-interface>\n",
            name, admin, oper, description
        )
    }

    fn status(name: &str, admin: &str, oper: &str, description: &str) -> InterfaceStatus {
        InterfaceStatus {
            name: name.to_string(),
            admin_status: admin.to_string(),
            oper_status: oper.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_physical_then_logical_order() {
        // Device interleaves logical units between physical ports.
        let xml = format!(
            "<rpc-reply xmlns:junos=\"http://xml.juniper.net/junos/21.4R0/junos\">\n<interface-information xmlns=\"http://xml.juniper.net/junos/21.4R0/junos-interface\" junos:style=\"description\">\n{}{}{}{}{}</interface-information>\n<cli>\n<banner></banner>\n</cli>\n</rpc-reply>",
            xml_physical("ge-0/0/0", "up", "up", "uplink core1"),
            xml_logical("ge-0/0/0.0", "up", "up", "core1 transit"),
            xml_physical("ge-0/0/1", "down", "down", "spare"),
            xml_physical("xe-1/0/0", "up", "down", "to edge2 [cid 4471]"),
            xml_logical("xe-1/0/0.100", "up", "down", "vlan 100"),
        );

        let parsed = parse_interfaces(&xml).unwrap();

        assert_eq!(
            parsed,
            vec![
                status("ge-0/0/0", "up", "up", "uplink core1"),
                status("ge-0/0/1", "down", "down", "spare"),
                status("xe-1/0/0", "up", "down", "to edge2 [cid 4471]"),
                status("ge-0/0/0.0", "up", "up", "core1 transit"),
                status("xe-1/0/0.100", "up", "down", "vlan 100"),
            ]
        );
    }

    #[test]
    fn test_interface_record_has_only_four_fields() {
        let xml = format!(
            "<rpc-reply><interface-information>{}</interface-information></rpc-reply>",
            xml_physical("et-0/0/2", "up", "up", "spine2")
        );
        let parsed = interfaces(&xml);
        let json = serde_json::to_value(&parsed[0]).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        assert!(!json.to_string().contains("10Gbps"));
    }

    #[test]
    fn test_interfaces_json() {
        let json = r#"{
            "interface-information" : [{
                "attributes" : {"xmlns" : "http://xml.juniper.net/junos/21.4R0/junos-interface", "junos:style" : "description"},
                "physical-interface" : [
                    {"name" : [{"data" : "ge-0/0/0"}], "admin-status" : [{"data" : "up"}], "oper-status" : [{"data" : "up"}], "description" : [{"data" : "uplink"}]},
                    {"name" : [{"data" : "ge-0/0/1"}], "admin-status" : [{"data" : "up"}], "oper-status" : [{"data" : "down"}], "description" : [null]}
                ],
                "logical-interface" : [
                    {"name" : [{"data" : "ge-0/0/0.0"}], "admin-status" : [{"data" : "up"}], "oper-status" : [{"data" : "up"}], "description" : [{"data" : "transit"}]}
                ]
            }]
        }"#;

        let parsed = parse_interfaces(json).unwrap();

        assert_eq!(
            parsed,
            vec![
                status("ge-0/0/0", "up", "up", "uplink"),
                status("ge-0/0/1", "up", "down", ""),
                status("ge-0/0/0.0", "up", "up", "transit"),
            ]
        );
    }

    #[test]
    fn test_missing_description_is_empty() {
        let xml = "<rpc-reply><interface-information><physical-interface><name>lo0</name><admin-status>up</admin-status><oper-status>up</oper-status></physical-interface></interface-information></rpc-reply>";
        assert_eq!(interfaces(xml), vec![status("lo0", "up", "up", "")]);
    }

    #[test]
    fn test_empty_and_mismatched_payloads() {
        assert!(interfaces("").is_empty());
        assert!(
            interfaces("Interface       Admin Link Description\nge-0/0/0        up    up   uplink")
                .is_empty()
        );
        assert!(interfaces("<rpc-reply><bgp-information/></rpc-reply>").is_empty());
        assert!(interfaces("{\"bgp-information\": []}").is_empty());
        assert!(interfaces("<rpc-reply><interface-information>").is_empty());

        assert!(matches!(parse_interfaces(""), Err(ParseError::Empty)));
        assert!(matches!(
            parse_interfaces("<rpc-reply><bgp-information/></rpc-reply>"),
            Err(ParseError::MissingElement("interface-information"))
        ));
    }
}
