//! CLI application for talking to a Hue bridge.
//!
//! This example demonstrates pairing with a bridge and sending raw API
//! requests through the transport.
//!
//! Run with: cargo run --example hue_cli -- --help

use std::time::Duration;

use clap::{Parser, Subcommand};
use hue_bridge_rs::{BridgeConfig, BridgeErrorKind, Client, Method};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "hue-cli")]
#[command(about = "Send requests to a Philips Hue bridge from the command line", long_about = None)]
struct Cli {
    /// Host or IP address of the bridge
    #[arg(short = 'H', long, global = true)]
    host: Option<String>,

    /// Username registered on the bridge (not required for pair)
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, global = true, default_value = "5")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user (press the link button first)
    Pair {
        /// Device type reported to the bridge
        #[arg(short, long, default_value = "hue-bridge-rs#cli")]
        device_type: String,
    },

    /// GET a resource, e.g. `lights`
    Get { path: String },

    /// PUT a JSON body to a resource, e.g. `lights/1/state '{"on":true}'`
    Put { path: String, body: String },

    /// POST a JSON body to a resource
    Post { path: String, body: String },

    /// DELETE a resource
    Delete { path: String },

    /// Check the username and print transport diagnostics
    Diagnostics,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let host = cli.host.ok_or("Bridge host is required. Use --host <HOST>")?;
    let mut config = BridgeConfig::new(&host)?.with_timeout(Duration::from_secs(cli.timeout));
    if let Some(username) = &cli.username {
        config = config.with_username(username);
    }
    let mut client = Client::new(config);

    match cli.command {
        Commands::Pair { device_type } => {
            println!("Registering '{}' on bridge {}...", device_type, host);
            match client.create_user(&device_type).await {
                Ok(username) => println!("Registered username: {}", username),
                Err(e) if e.bridge_kind() == Some(BridgeErrorKind::LinkButton) => {
                    eprintln!("Press the link button on the bridge and try again.")
                }
                Err(e) => eprintln!("Error: {}", e),
            }
        }

        Commands::Get { path } => print_result(client.request(&path, Method::Get, None).await),

        Commands::Put { path, body } => {
            let body: Value = serde_json::from_str(&body)?;
            print_result(client.request(&path, Method::Put, Some(&body)).await)
        }

        Commands::Post { path, body } => {
            let body: Value = serde_json::from_str(&body)?;
            print_result(client.request(&path, Method::Post, Some(&body)).await)
        }

        Commands::Delete { path } => {
            print_result(client.request(&path, Method::Delete, None).await)
        }

        Commands::Diagnostics => {
            match client.is_authorized().await {
                Ok(true) => println!("Username is authorized"),
                Ok(false) => println!("Username is NOT authorized"),
                Err(e) => eprintln!("Error: {}", e),
            }
            let diag = client.transport().diagnostics();
            println!("\nDiagnostics:\n{}", serde_json::to_string_pretty(&diag)?);
        }
    }

    Ok(())
}

fn print_result(result: Result<Value, hue_bridge_rs::Error>) {
    match result {
        Ok(value) => println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
        ),
        Err(e) => eprintln!("Error: {}", e),
    }
}
