//! Device report example
//!
//! Connects to a Junos device, runs every normalized operation and prints
//! the records as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example device_report -- --host 192.168.1.1 --user admin --password secret
//! ```
//!
//! Over NETCONF (port 830) with an SSH key:
//! ```bash
//! cargo run --example device_report -- --host router.example.com --user admin --key ~/.ssh/id_ed25519 --netconf
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use junos_netapi::normalize::to_json;
use junos_netapi::{Client, OutputFormat, Session, ops};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut builder = Client::builder(&args.host)
        .username(&args.user)
        .connect_timeout(Duration::from_secs(args.timeout));

    if let Some(port) = args.port {
        builder = builder.port(port);
    }

    if let Some(password) = &args.password {
        builder = builder.password(password);
    } else if let Some(key_path) = &args.key {
        builder = builder.private_key(key_path);
    } else {
        eprintln!("Error: Must provide either --password or --key");
        std::process::exit(1);
    }

    let client = builder.build()?;
    let format = OutputFormat::parse(&args.format);

    if args.netconf {
        println!("Connecting to {} as {} over NETCONF...", client.host(), client.username());
        let mut session = client.connect_netconf().await?;
        if let Some(id) = session.session_id() {
            println!("NETCONF session {}\n", id);
        }
        report(&mut session, format).await?;
        session.close().await?;
    } else {
        println!("Connecting to {} as {} over SSH...\n", client.host(), client.username());
        let mut session = client.connect_ssh().await?;
        report(&mut session, format).await?;
        session.close().await?;
    }

    Ok(())
}

async fn report<S: Session>(
    session: &mut S,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    section("host");
    println!("{}", to_json(&ops::host_info(session, format).await?)?);

    section("uptime");
    println!("{}", to_json(&ops::system_uptime(session, format).await?)?);

    section("interfaces");
    println!("{}", to_json(&ops::interfaces(session, format).await?)?);

    section("bgp peers");
    println!("{}", to_json(&ops::bgp_summary(session, format).await?)?);

    section("lldp neighbors");
    println!("{}", to_json(&ops::lldp_neighbors(session, format).await?)?);

    section("commits");
    println!("{}", to_json(&ops::commit_history(session).await?)?);

    section("optics");
    println!("{}", to_json(&ops::interface_diagnostics(session).await?)?);

    Ok(())
}

fn section(name: &str) {
    println!("\n--- {} ---", name);
}

/// Simple argument parser
struct Args {
    host: String,
    port: Option<u16>,
    user: String,
    password: Option<String>,
    key: Option<PathBuf>,
    timeout: u64,
    format: String,
    netconf: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "localhost".to_string();
        let mut port = None;
        let mut user = env::var("USER").unwrap_or_else(|_| "admin".to_string());
        let mut password = None;
        let mut key = None;
        let mut timeout = 30u64;
        let mut format = "json".to_string();
        let mut netconf = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    i += 1;
                    if i < args.len() {
                        host = args[i].clone();
                    }
                }
                "--port" | "-p" => {
                    i += 1;
                    if i < args.len() {
                        port = args[i].parse().ok();
                    }
                }
                "--user" | "-u" => {
                    i += 1;
                    if i < args.len() {
                        user = args[i].clone();
                    }
                }
                "--password" | "-P" => {
                    i += 1;
                    if i < args.len() {
                        password = Some(args[i].clone());
                    }
                }
                "--key" | "-k" => {
                    i += 1;
                    if i < args.len() {
                        key = Some(PathBuf::from(&args[i]));
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(30);
                    }
                }
                "--format" | "-f" => {
                    i += 1;
                    if i < args.len() {
                        format = args[i].clone();
                    }
                }
                "--netconf" | "-n" => {
                    netconf = true;
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        Self {
            host,
            port,
            user,
            password,
            key,
            timeout,
            format,
            netconf,
        }
    }

    fn print_help() {
        println!(
            r#"junos-netapi device report

Runs every normalized operation against one device and prints JSON.

USAGE:
    cargo run --example device_report -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Target host [default: localhost]
    -p, --port <PORT>        Port [default: 22, or 830 with --netconf]
    -u, --user <USER>        Username [default: $USER]
    -P, --password <PASS>    Password for authentication
    -k, --key <PATH>         Path to SSH private key
    -t, --timeout <SECS>     Connect timeout in seconds [default: 30]
    -f, --format <FORMAT>    xml, json or text [default: json]
    -n, --netconf            Use the NETCONF subsystem instead of exec channels
    --help                   Print help information
"#
        );
    }
}
