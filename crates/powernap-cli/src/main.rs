//! powernap — operator CLI for panel power control.
//!
//! Thin wiring around `powernap-panel`: resolves panel credentials from
//! flags, environment, or a TOML config file, then runs a single
//! operation against the panel.
//!
//! # Usage
//!
//! ```text
//! powernap --panel-url https://panel.example.com --api-key ptlc_... start 1a2b3c4d
//! powernap --config powernap.toml restore 1a2b3c4d backup-uuid
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use powernap_core::{Config, PanelConfig, PowerSignal, RestoreConfig, ServerRef};
use powernap_panel::{PanelClient, Restorer};

#[derive(Parser)]
#[command(
    name = "powernap",
    about = "On-demand power control for panel-managed game servers",
    version
)]
struct Cli {
    /// Panel base URL (e.g. https://panel.example.com).
    #[arg(long, env = "POWERNAP_PANEL_URL", global = true)]
    panel_url: Option<String>,

    /// Panel client API token.
    #[arg(long, env = "POWERNAP_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Path to a powernap.toml config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a start signal to a server.
    Start {
        /// Panel server identifier.
        server_id: String,
        /// Display name used in logs (defaults to the identifier).
        #[arg(long)]
        name: Option<String>,
    },
    /// Send a stop signal to a server.
    Stop {
        server_id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a server's current power state.
    Status {
        server_id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Stop a server, wait for it to go offline, then restore a backup.
    Restore {
        server_id: String,
        /// UUID of the backup to restore.
        backup_id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Sum the declared memory limits of the given servers.
    TotalMemory {
        /// Panel server identifiers.
        server_ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,powernap=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let client = PanelClient::new(&config.panel);

    match cli.command {
        Command::Start { server_id, name } => {
            let server = server_ref(server_id, name);
            client.send_power_signal(&server, PowerSignal::Start).await?;
            println!("start signal accepted for {}", server.name);
        }
        Command::Stop { server_id, name } => {
            let server = server_ref(server_id, name);
            client.send_power_signal(&server, PowerSignal::Stop).await?;
            println!("stop signal accepted for {}", server.name);
        }
        Command::Status { server_id, name } => {
            let server = server_ref(server_id, name);
            let state = client.power_state(&server).await?;
            println!("{} is {}", server.name, state);
        }
        Command::Restore {
            server_id,
            backup_id,
            name,
        } => {
            let server = server_ref(server_id, name);
            let restorer = Restorer::from_config(client, &config.restore)?;
            restorer.restore_from_backup(&server, &backup_id).await?;
            println!("restore of {} accepted for {}", backup_id, server.name);
        }
        Command::TotalMemory { server_ids } => {
            let servers: HashSet<String> = server_ids.into_iter().collect();
            let total = client.total_memory_limit(&servers).await?;
            println!("{total}");
        }
    }

    Ok(())
}

fn server_ref(server_id: String, name: Option<String>) -> ServerRef {
    let name = name.unwrap_or_else(|| server_id.clone());
    ServerRef::new(name, server_id)
}

/// Resolve configuration from the config file and/or flags.
///
/// Flags override file values, so a file can hold the URL while the
/// token comes from the environment.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        let mut config = Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?;
        if let Some(url) = &cli.panel_url {
            config.panel.base_url = url.clone();
        }
        if let Some(key) = &cli.api_key {
            config.panel.api_key = key.clone();
        }
        return Ok(config);
    }

    let (Some(base_url), Some(api_key)) = (cli.panel_url.clone(), cli.api_key.clone()) else {
        anyhow::bail!("either --config or both --panel-url and --api-key are required");
    };
    Ok(Config {
        panel: PanelConfig { base_url, api_key },
        restore: RestoreConfig::default(),
    })
}
