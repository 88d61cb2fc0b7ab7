//! NETCONF 1.0 message construction and reply handling.

use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use log::warn;
use regex::Regex;

use crate::driver::{Command, OutputFormat};
use crate::error::{CommandError, Result};

/// Base capability every NETCONF 1.0 peer advertises.
pub const BASE_CAPABILITY: &str = "urn:ietf:params:netconf:base:1.0";

static SESSION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<session-id>\s*(\d+)\s*</session-id>").unwrap());

static CAPABILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<capability>\s*([^<]+?)\s*</capability>").unwrap());

/// Client hello, sent once after the subsystem starts.
pub fn client_hello() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><hello xmlns="urn:ietf:params:xml:ns:netconf:base:1.0"><capabilities><capability>{}</capability></capabilities></hello>"#,
        BASE_CAPABILITY
    )
}

/// Wrap an operation body in an `<rpc>` envelope.
pub fn rpc(message_id: u64, body: &str) -> String {
    format!(
        r#"<rpc message-id="{}" xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">{}</rpc>"#,
        message_id, body
    )
}

/// `<command>` body for a CLI command in the requested format.
pub fn command_body(command: &Command) -> String {
    format!(
        r#"<command format="{}">{}</command>"#,
        command.format().as_str(),
        escape(command.base())
    )
}

/// `<close-session/>` body.
pub fn close_session_body() -> &'static str {
    "<close-session/>"
}

/// What the server announced in its hello.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerHello {
    /// Session id assigned by the server.
    pub session_id: Option<u64>,

    /// Advertised capability URIs, in order.
    pub capabilities: Vec<String>,
}

impl ServerHello {
    /// Parse the server hello message.
    pub fn parse(message: &str) -> Result<Self> {
        if !message.contains("<hello") {
            return Err(CommandError::Netconf {
                message: "expected <hello> from server".to_string(),
            }
            .into());
        }

        let capabilities: Vec<String> = CAPABILITY
            .captures_iter(message)
            .map(|c| c[1].to_string())
            .collect();

        if !capabilities.iter().any(|c| c == BASE_CAPABILITY) {
            return Err(CommandError::Netconf {
                message: format!("server does not support {}", BASE_CAPABILITY),
            }
            .into());
        }

        let session_id = SESSION_ID
            .captures(message)
            .and_then(|c| c[1].parse().ok());

        Ok(Self {
            session_id,
            capabilities,
        })
    }
}

/// One `<rpc-error>` from a reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcError {
    pub severity: String,
    pub message: String,
}

impl RpcError {
    /// Warnings are reported alongside data and do not fail the RPC.
    pub fn is_fatal(&self) -> bool {
        self.severity != "warning"
    }
}

/// Collect every `<rpc-error>` in a reply.
pub fn rpc_errors(reply: &str) -> Result<Vec<RpcError>> {
    let mut reader = Reader::from_str(reply);
    let mut errors = Vec::new();
    let mut current: Option<RpcError> = None;
    let mut field: Option<Vec<u8>> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"rpc-error" {
                    current = Some(RpcError::default());
                } else if current.is_some() {
                    field = Some(name);
                }
            }
            Event::Text(t) => {
                if let (Some(err), Some(name)) = (current.as_mut(), field.as_deref()) {
                    let text = t.unescape().map_err(malformed)?;
                    match name {
                        b"error-severity" => err.severity.push_str(text.trim()),
                        b"error-message" => err.message.push_str(text.trim()),
                        _ => {}
                    }
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"rpc-error" {
                    errors.extend(current.take());
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(errors)
}

/// Reduce an `<rpc-reply>` to the payload shape the CLI would print.
///
/// - XML: the reply document itself
/// - JSON: the reply's text content
/// - Text: the `<output>` or `<configuration-text>` content, else any
///   text the reply carries
pub fn unwrap_reply(reply: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Xml => Ok(reply.trim().to_string()),
        OutputFormat::Json => Ok(collect_text(reply, |d| d == 1)?.trim().to_string()),
        OutputFormat::Text => {
            if let Some(text) = element_text(reply, &[b"output", b"configuration-text"])? {
                return Ok(text);
            }

            let text = collect_text(reply, |d| d == 1)?;
            if !text.trim().is_empty() {
                return Ok(text);
            }

            // Some commands wrap their text in a command-specific element
            // such as <file-content>.
            let text = collect_text(reply, |d| d >= 2)?;
            if text.trim().is_empty() {
                warn!("netconf text reply carried no text content");
            }
            Ok(text)
        }
    }
}

/// Concatenated text of the first element whose local name is in `names`.
fn element_text(xml: &str, names: &[&[u8]]) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut capture_depth: Option<usize> = None;
    let mut out = String::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                depth += 1;
                if capture_depth.is_none() && names.contains(&e.local_name().as_ref()) {
                    capture_depth = Some(depth);
                }
            }
            Event::End(_) => {
                if capture_depth == Some(depth) {
                    return Ok(Some(out));
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(t) if capture_depth.is_some() => {
                out.push_str(&t.unescape().map_err(malformed)?);
            }
            Event::CData(c) if capture_depth.is_some() => {
                out.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Concatenated text nodes whose element depth satisfies `keep`.
fn collect_text(xml: &str, keep: impl Fn(usize) -> bool) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut out = String::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(t) if keep(depth) => {
                out.push_str(&t.unescape().map_err(malformed)?);
            }
            Event::CData(c) if keep(depth) => {
                out.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::Eof => return Ok(out),
            _ => {}
        }
    }
}

fn malformed(e: impl std::fmt::Display) -> crate::error::Error {
    CommandError::Netconf {
        message: format!("malformed reply: {}", e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Operation;

    const SERVER_HELLO: &str = r#"<!-- No zombies were killed during the creation of this user interface -->
<!-- user netops, class j-super-user -->
<hello xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">
  <capabilities>
    <capability>urn:ietf:params:netconf:base:1.0</capability>
    <capability>urn:ietf:params:netconf:capability:candidate:1.0</capability>
    <capability>http://xml.juniper.net/netconf/junos/1.0</capability>
  </capabilities>
  <session-id>27364</session-id>
</hello>"#;

    #[test]
    fn test_parse_server_hello() {
        let hello = ServerHello::parse(SERVER_HELLO).unwrap();
        assert_eq!(hello.session_id, Some(27364));
        assert_eq!(hello.capabilities.len(), 3);
        assert_eq!(hello.capabilities[0], BASE_CAPABILITY);
    }

    #[test]
    fn test_hello_without_base_capability() {
        let hello =
            "<hello><capabilities><capability>urn:example</capability></capabilities></hello>";
        assert!(ServerHello::parse(hello).is_err());
        assert!(ServerHello::parse("<rpc-reply/>").is_err());
    }

    #[test]
    fn test_command_body_escapes_text() {
        let cmd = Command::raw("show route | match \"10.0.0.0/8\" & more", OutputFormat::Text);
        assert_eq!(
            command_body(&cmd),
            r#"<command format="text">show route | match &quot;10.0.0.0/8&quot; &amp; more</command>"#
        );
    }

    #[test]
    fn test_command_body_uses_format_attribute() {
        let cmd = Command::new(Operation::BgpSummary, OutputFormat::Json);
        assert_eq!(
            command_body(&cmd),
            r#"<command format="json">show bgp summary</command>"#
        );
        assert!(rpc(7, &command_body(&cmd)).starts_with(r#"<rpc message-id="7""#));
    }

    #[test]
    fn test_rpc_errors() {
        let reply = r#"<rpc-reply xmlns:junos="http://xml.juniper.net/junos/21.4R0/junos">
<rpc-error>
<error-type>protocol</error-type>
<error-tag>operation-failed</error-tag>
<error-severity>error</error-severity>
<error-message>
syntax error, expecting &lt;command&gt;
</error-message>
</rpc-error>
</rpc-reply>"#;
        let errors = rpc_errors(reply).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_fatal());
        assert_eq!(errors[0].message, "syntax error, expecting <command>");
    }

    #[test]
    fn test_rpc_warning_is_not_fatal() {
        let reply = "<rpc-reply><rpc-error><error-severity>warning</error-severity><error-message>statement not found</error-message></rpc-error><ok/></rpc-reply>";
        let errors = rpc_errors(reply).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(!errors[0].is_fatal());
    }

    #[test]
    fn test_unwrap_json_reply() {
        let reply = "<rpc-reply xmlns:junos=\"http://xml.juniper.net/junos/21.4R0/junos\">\n{\n\"bgp-information\" : [{}]\n}\n</rpc-reply>";
        assert_eq!(
            unwrap_reply(reply, OutputFormat::Json).unwrap(),
            "{\n\"bgp-information\" : [{}]\n}"
        );
    }

    #[test]
    fn test_unwrap_text_reply() {
        let reply =
            "<rpc-reply><output>\nCurrent time: 2024-05-01 10:00:00 UTC\n</output></rpc-reply>";
        assert_eq!(
            unwrap_reply(reply, OutputFormat::Text).unwrap(),
            "\nCurrent time: 2024-05-01 10:00:00 UTC\n"
        );

        let config =
            "<rpc-reply><configuration-text>system { host-name r1; }</configuration-text></rpc-reply>";
        assert_eq!(
            unwrap_reply(config, OutputFormat::Text).unwrap(),
            "system { host-name r1; }"
        );
    }

    #[test]
    fn test_unwrap_text_reply_in_other_wrapper() {
        let reply = "<rpc-reply>\n<file-content filename=\"messages\">May  1 10:00:00  edge1 mgd[123]: UI_COMMIT: User 'netops' requested 'commit'</file-content>\n</rpc-reply>";
        let text = unwrap_reply(reply, OutputFormat::Text).unwrap();
        assert!(text.contains("UI_COMMIT"));

        let bare = "<rpc-reply>\nCurrent time: 2024-05-01 10:00:00 UTC\n</rpc-reply>";
        assert_eq!(
            unwrap_reply(bare, OutputFormat::Text).unwrap(),
            "\nCurrent time: 2024-05-01 10:00:00 UTC\n"
        );
    }

    #[test]
    fn test_unwrap_xml_reply_is_document() {
        let reply = "  <rpc-reply><bgp-information/></rpc-reply>\n";
        assert_eq!(
            unwrap_reply(reply, OutputFormat::Xml).unwrap(),
            "<rpc-reply><bgp-information/></rpc-reply>"
        );
    }
}
