//! `show bgp summary`.

use serde::{Deserialize, Serialize};

use super::junos::{self, Leaf, Text, leaf};
use super::{Payload, lenient};
use crate::error::ParseError;

/// One BGP peer. Message counters, flap count and elapsed time are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpPeerSummary {
    pub peer_address: String,
    pub peer_as: String,
    pub peer_state: String,
}

/// Parse the BGP summary peer table.
pub fn parse_bgp_summary(raw: &str) -> Result<Vec<BgpPeerSummary>, ParseError> {
    match Payload::detect(raw)? {
        Payload::Xml(xml) => from_xml(xml),
        Payload::Json(json) => from_json(json),
        Payload::Text(_) => Err(ParseError::UnsupportedPayload {
            expected: "xml or json",
        }),
    }
}

/// Lenient form of [`parse_bgp_summary`].
pub fn bgp_summary(raw: &str) -> Vec<BgpPeerSummary> {
    lenient("bgp summary", parse_bgp_summary(raw))
}

#[derive(Deserialize)]
struct XmlReply {
    #[serde(rename = "bgp-information")]
    information: Option<XmlInformation>,
}

#[derive(Deserialize)]
struct XmlInformation {
    #[serde(rename = "bgp-peer", default)]
    peers: Vec<XmlPeer>,
}

#[derive(Deserialize)]
struct XmlPeer {
    #[serde(rename = "peer-address", default)]
    peer_address: String,
    #[serde(rename = "peer-as", default)]
    peer_as: String,
    // Carries a junos:format attribute on some releases.
    #[serde(rename = "peer-state", default)]
    peer_state: Text,
}

fn from_xml(xml: &str) -> Result<Vec<BgpPeerSummary>, ParseError> {
    let reply: XmlReply = quick_xml::de::from_str(xml)?;
    let information = reply
        .information
        .ok_or(ParseError::MissingElement("bgp-information"))?;

    Ok(information
        .peers
        .into_iter()
        .map(|p| BgpPeerSummary {
            peer_address: junos::trim(&p.peer_address),
            peer_as: junos::trim(&p.peer_as),
            peer_state: p.peer_state.trimmed(),
        })
        .collect())
}

#[derive(Deserialize)]
struct JsonReply {
    #[serde(rename = "bgp-information")]
    information: Option<Vec<Option<JsonInformation>>>,
}

#[derive(Deserialize)]
struct JsonInformation {
    #[serde(rename = "bgp-peer", default)]
    peers: Vec<Option<JsonPeer>>,
}

#[derive(Deserialize)]
struct JsonPeer {
    #[serde(rename = "peer-address", default)]
    peer_address: Leaf,
    #[serde(rename = "peer-as", default)]
    peer_as: Leaf,
    #[serde(rename = "peer-state", default)]
    peer_state: Leaf,
}

fn from_json(json: &str) -> Result<Vec<BgpPeerSummary>, ParseError> {
    let reply: JsonReply = serde_json::from_str(json)?;
    let blocks = reply
        .information
        .ok_or(ParseError::MissingElement("bgp-information"))?;

    Ok(blocks
        .iter()
        .flatten()
        .flat_map(|b| b.peers.iter().flatten())
        .map(|p| BgpPeerSummary {
            peer_address: leaf(&p.peer_address),
            peer_as: leaf(&p.peer_as),
            peer_state: leaf(&p.peer_state),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(address: &str, asn: &str, state: &str) -> BgpPeerSummary {
        BgpPeerSummary {
            peer_address: address.to_string(),
            peer_as: asn.to_string(),
            peer_state: state.to_string(),
        }
    }

    #[test]
    fn test_bgp_summary_json_two_peers() {
        let json = r#"{
            "bgp-information" : [{
                "attributes" : {"xmlns" : "http://xml.juniper.net/junos/21.4R0/junos-routing"},
                "group-count" : [{"data" : "2"}],
                "peer-count" : [{"data" : "2"}],
                "down-peer-count" : [{"data" : "1"}],
                "bgp-peer" : [
                    {"attributes" : {"junos:style" : "terse"},
                     "peer-address" : [{"data" : "10.0.0.1"}], "peer-as" : [{"data" : "65001"}],
                     "input-messages" : [{"data" : "10235"}], "output-messages" : [{"data" : "10240"}],
                     "flap-count" : [{"data" : "0"}], "elapsed-time" : [{"data" : "3d 4:02:11", "attributes" : {"junos:seconds" : "273731"}}],
                     "peer-state" : [{"data" : "Established", "attributes" : {"junos:format" : "Establ"}}]},
                    {"peer-address" : [{"data" : "10.0.0.2"}], "peer-as" : [{"data" : "65002"}],
                     "flap-count" : [{"data" : "7"}],
                     "peer-state" : [{"data" : "Active"}]}
                ]
            }]
        }"#;

        let peers = parse_bgp_summary(json).unwrap();
        assert_eq!(
            peers,
            vec![peer("10.0.0.1", "65001", "Established"), peer("10.0.0.2", "65002", "Active")]
        );

        let rendered = crate::normalize::to_json(&peers).unwrap();
        assert!(!rendered.contains("flap"));
        assert!(!rendered.contains("10235"));
    }

    #[test]
    fn test_bgp_summary_xml() {
        let xml = r#"<rpc-reply xmlns:junos="http://xml.juniper.net/junos/21.4R0/junos">
<bgp-information xmlns="http://xml.juniper.net/junos/21.4R0/junos-routing">
<group-count>2</group-count>
<peer-count>2</peer-count>
<down-peer-count>1</down-peer-count>
<unconfigured-peer-count>0</unconfigured-peer-count>
<bgp-rib junos:style="brief">
<name>inet.0</name>
<total-prefix-count>812</total-prefix-count>
</bgp-rib>
<bgp-peer junos:style="terse" heading="Peer                     AS      InPkt     OutPkt    OutQ   Flaps Last Up/Dwn State|#Active/Received/Accepted/Damped...">
<peer-address>10.0.0.1</peer-address>
<peer-as>65001</peer-as>
<input-messages>10235</input-messages>
<output-messages>10240</output-messages>
<route-queue-count>0</route-queue-count>
<flap-count>0</flap-count>
<elapsed-time junos:seconds="273731">3d 4:02:11</elapsed-time>
<peer-state junos:format="Establ">Established</peer-state>
</bgp-peer>
<bgp-peer junos:style="terse">
<peer-address>10.0.0.2</peer-address>
<peer-as>65002</peer-as>
<flap-count>7</flap-count>
<peer-state>Active</peer-state>
</bgp-peer>
</bgp-information>
</rpc-reply>"#;

        assert_eq!(
            bgp_summary(xml),
            vec![peer("10.0.0.1", "65001", "Established"), peer("10.0.0.2", "65002", "Active")]
        );
    }

    #[test]
    fn test_bgp_summary_no_peers() {
        let xml =
            "<rpc-reply><bgp-information><peer-count>0</peer-count></bgp-information></rpc-reply>";
        assert!(parse_bgp_summary(xml).unwrap().is_empty());
    }

    #[test]
    fn test_bgp_summary_mismatched() {
        assert!(bgp_summary("").is_empty());
        assert!(bgp_summary("error: the routing subsystem is not running").is_empty());
        assert!(bgp_summary("{\"interface-information\": [{}]}").is_empty());
        assert!(bgp_summary("{ not json").is_empty());
        assert!(matches!(
            parse_bgp_summary("{ not json"),
            Err(ParseError::Json(_))
        ));
    }
}
