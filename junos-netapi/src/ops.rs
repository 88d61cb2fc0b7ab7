//! Device operations.
//!
//! Each function sends one command on a session the caller owns and
//! normalizes the reply. Transport and command failures are returned as
//! errors; output that cannot be normalized is logged and comes back
//! empty (see [`crate::normalize`]).
//!
//! The same functions work over [`SshSession`](crate::SshSession) and
//! [`NetconfSession`](crate::NetconfSession).

use crate::driver::{Command, Operation, OutputFormat, Session, execute};
use crate::error::Result;
use crate::normalize::{
    self, BgpPeerSummary, CommitEntry, HostInfo, InterfaceDiagnostics, InterfaceStatus,
    LldpNeighbor, Uptime,
};

async fn fetch<S: Session>(
    session: &mut S,
    operation: Operation,
    format: OutputFormat,
) -> Result<String> {
    let response = execute(session, &Command::new(operation, format)).await?;
    Ok(response.into_output())
}

/// Commit history, newest first.
pub async fn commit_history<S: Session>(session: &mut S) -> Result<Vec<CommitEntry>> {
    let raw = fetch(session, Operation::CommitHistory, OutputFormat::Xml).await?;
    Ok(normalize::commit::commit_history(&raw))
}

/// The active configuration, as the device renders it.
pub async fn configuration<S: Session>(session: &mut S, format: OutputFormat) -> Result<String> {
    fetch(session, Operation::Configuration, format).await
}

/// Interface descriptions. Text output cannot be normalized and yields
/// an empty list.
pub async fn interfaces<S: Session>(
    session: &mut S,
    format: OutputFormat,
) -> Result<Vec<InterfaceStatus>> {
    let raw = fetch(session, Operation::InterfaceDescriptions, format).await?;
    Ok(normalize::interfaces::interfaces(&raw))
}

/// BGP peer table.
pub async fn bgp_summary<S: Session>(
    session: &mut S,
    format: OutputFormat,
) -> Result<Vec<BgpPeerSummary>> {
    let raw = fetch(session, Operation::BgpSummary, format).await?;
    Ok(normalize::bgp::bgp_summary(&raw))
}

/// `/var/log/messages`, raw.
pub async fn log_messages<S: Session>(session: &mut S) -> Result<String> {
    fetch(session, Operation::LogMessages, OutputFormat::Text).await
}

/// Interface event log, raw.
pub async fn interface_events<S: Session>(session: &mut S) -> Result<String> {
    fetch(session, Operation::InterfaceEvents, OutputFormat::Text).await
}

/// System uptime. Parsed only when `format` is JSON.
pub async fn system_uptime<S: Session>(session: &mut S, format: OutputFormat) -> Result<Uptime> {
    let raw = fetch(session, Operation::SystemUptime, format).await?;
    Ok(normalize::uptime::uptime(&raw, format))
}

/// LLDP neighbors.
pub async fn lldp_neighbors<S: Session>(
    session: &mut S,
    format: OutputFormat,
) -> Result<Vec<LldpNeighbor>> {
    let raw = fetch(session, Operation::LldpNeighbors, format).await?;
    Ok(normalize::lldp::lldp_neighbors(&raw))
}

/// Transceiver diagnostics for every physical interface.
pub async fn interface_diagnostics<S: Session>(
    session: &mut S,
) -> Result<Vec<InterfaceDiagnostics>> {
    let raw = fetch(session, Operation::OpticsDiagnostics, OutputFormat::Xml).await?;
    Ok(normalize::optics::interface_diagnostics(&raw))
}

/// Hostname, model and software version.
pub async fn host_info<S: Session>(session: &mut S, format: OutputFormat) -> Result<HostInfo> {
    let raw = fetch(session, Operation::Version, format).await?;
    Ok(normalize::host::host_info(&raw))
}

/// Run any command and return its raw output.
pub async fn output<S: Session>(
    session: &mut S,
    text: &str,
    format: OutputFormat,
) -> Result<String> {
    let response = execute(session, &Command::raw(text, format)).await?;
    Ok(response.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::dispatch::tests::ScriptedSession;
    use crate::error::{CommandError, Error};
    use crate::normalize::UptimeSummary;

    const BGP_JSON: &str = r#"{"bgp-information" : [{
        "bgp-peer" : [
            {"peer-address" : [{"data" : "10.0.0.1"}], "peer-as" : [{"data" : "65001"}],
             "flap-count" : [{"data" : "0"}], "peer-state" : [{"data" : "Established"}]},
            {"peer-address" : [{"data" : "10.0.0.2"}], "peer-as" : [{"data" : "65002"}],
             "flap-count" : [{"data" : "3"}], "peer-state" : [{"data" : "Active"}]}
        ]
    }]}"#;

    const UPTIME_JSON: &str = r#"{"multi-routing-engine-results" : [{
        "multi-routing-engine-item" : [{
            "system-uptime-information" : [{
                "current-time" : [{"date-time" : [{"data" : "2024-05-01 10:00:00 UTC"}]}],
                "last-configured-time" : [{"date-time" : [{"data" : "2024-04-30 10:00:00 UTC"}]}],
                "system-booted-time" : [{"date-time" : [{"data" : "2024-03-01 08:15:00 UTC"}]}]
            }]
        }]
    }]}"#;

    #[test]
    fn test_bgp_summary_end_to_end() {
        let mut session = ScriptedSession::replying(&[BGP_JSON]);

        let peers = tokio_test::block_on(bgp_summary(&mut session, OutputFormat::Json)).unwrap();

        assert_eq!(session.sent_cli(), vec!["show bgp summary | display json"]);
        let rendered = normalize::to_json(&peers).unwrap();
        assert_eq!(
            rendered,
            r#"[{"peer_address":"10.0.0.1","peer_as":"65001","peer_state":"Established"},{"peer_address":"10.0.0.2","peer_as":"65002","peer_state":"Active"}]"#
        );
    }

    #[test]
    fn test_system_uptime_json_is_parsed() {
        let mut session = ScriptedSession::replying(&[UPTIME_JSON]);

        let format = OutputFormat::parse("JSON");
        let uptime = tokio_test::block_on(system_uptime(&mut session, format)).unwrap();

        assert_eq!(session.sent_cli(), vec!["show system uptime | display json"]);
        assert_eq!(
            uptime,
            Uptime::Summary(UptimeSummary {
                current_time: "2024-05-01 10:00:00 UTC".to_string(),
                last_configured_time: "2024-04-30 10:00:00 UTC".to_string(),
                system_booted_time: "2024-03-01 08:15:00 UTC".to_string(),
            })
        );
    }

    #[test]
    fn test_system_uptime_text_passes_through() {
        let text = "Current time: 2024-05-01 10:00:00 UTC\nTime Source:  NTP CLOCK\n";
        let mut session = ScriptedSession::replying(&[text]);

        let format = OutputFormat::parse("text");
        let uptime = tokio_test::block_on(system_uptime(&mut session, format)).unwrap();

        assert_eq!(session.sent_cli(), vec!["show system uptime"]);
        assert_eq!(uptime, Uptime::Raw(text.to_string()));
    }

    #[test]
    fn test_fixed_format_operations() {
        let mut session = ScriptedSession::replying(&[
            "<rpc-reply><commit-information/></rpc-reply>",
            "<rpc-reply><interface-information/></rpc-reply>",
            "May  1 10:00:00  edge1 mgd[123]: UI_COMMIT: User 'netops' requested 'commit'",
            "May  1 10:00:01  edge1 mib2d[456]: SNMP_TRAP_LINK_UP: ifIndex 512",
        ]);

        tokio_test::block_on(async {
            assert!(commit_history(&mut session).await.unwrap().is_empty());
            assert!(interface_diagnostics(&mut session).await.unwrap().is_empty());
            assert!(log_messages(&mut session).await.unwrap().contains("UI_COMMIT"));
            assert!(interface_events(&mut session).await.unwrap().contains("LINK_UP"));
        });

        assert_eq!(
            session.sent_cli(),
            vec![
                "show system commit | display xml",
                "show interfaces diagnostics optics | display xml",
                "show log messages",
                "show log intf-events",
            ]
        );
    }

    #[test]
    fn test_configuration_and_output_are_raw() {
        let config = "system {\n    host-name edge1;\n}\n";
        let mut session = ScriptedSession::replying(&[config, "{\"route-information\": []}"]);

        tokio_test::block_on(async {
            assert_eq!(
                configuration(&mut session, OutputFormat::Text).await.unwrap(),
                config
            );
            assert_eq!(
                output(&mut session, "show route summary", OutputFormat::Json).await.unwrap(),
                "{\"route-information\": []}"
            );
        });

        assert_eq!(
            session.sent_cli(),
            vec!["show configuration", "show route summary | display json"]
        );
    }

    #[test]
    fn test_unparseable_output_is_not_an_error() {
        let mut session = ScriptedSession::replying(&[
            "error: syntax error, expecting <command>: lldp",
            "",
        ]);

        tokio_test::block_on(async {
            assert!(lldp_neighbors(&mut session, OutputFormat::Xml).await.unwrap().is_empty());
            assert_eq!(
                host_info(&mut session, OutputFormat::Json).await.unwrap(),
                HostInfo::default()
            );
        });
    }

    #[test]
    fn test_command_failure_propagates() {
        let mut session = ScriptedSession::default();

        let result = tokio_test::block_on(interfaces(&mut session, OutputFormat::Xml));

        assert!(matches!(
            result,
            Err(Error::Command(CommandError::ChannelClosed { .. }))
        ));
    }
}
