use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use device_client::{CatalogResolver, CommandGateway, DeviceConfig};
use grouping::{group, GroupingStats};
use shared::{
    display::{display_alias, display_group_name},
    domain::Catalog,
};

#[derive(Parser, Debug)]
struct Cli {
    /// Light controller host, IP or base URL.
    #[arg(long, default_value = "127.0.0.1")]
    controller: String,
    #[arg(long, default_value = "0")]
    zone: String,
    #[arg(long, default_value_t = 3000)]
    timeout_ms: u64,
    #[arg(long, default_value = "response.json")]
    fallback: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved catalog as JSON.
    Catalog,
    /// Print grouping statistics and groups, largest first.
    Groups {
        #[arg(long, default_value_t = 15)]
        top: usize,
    },
    /// Activate the catalog sequence with the given id.
    Activate {
        #[arg(long)]
        id: String,
    },
    /// Turn the display off.
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let device = DeviceConfig::new(&cli.controller, cli.zone.as_str())
        .context("invalid controller address")?
        .with_timeout(Duration::from_millis(cli.timeout_ms.max(1)))
        .with_fallback_path(cli.fallback);
    let http = reqwest::Client::new();

    match cli.command {
        Command::Catalog => {
            let catalog = resolve(&device, http).await?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        Command::Groups { top } => {
            let catalog = resolve(&device, http).await?;
            print_groups(&catalog, top);
        }
        Command::Activate { id } => {
            let catalog = resolve(&device, http.clone()).await?;
            let (position, sequence) = catalog
                .find(&id)
                .ok_or_else(|| anyhow!("no sequence with id '{id}' in catalog"))?;
            let ack = CommandGateway::new(http, &device)
                .activate(&sequence.activation_request())
                .await
                .map_err(|err| anyhow!("{}: {err}", err.kind().message()))?;
            println!(
                "applied: {} ({})",
                display_alias(sequence, position),
                ack.body
            );
        }
        Command::Off => {
            let ack = CommandGateway::new(http, &device)
                .deactivate()
                .await
                .map_err(|err| anyhow!("{}: {err}", err.kind().message()))?;
            println!("display off ({})", ack.body);
        }
    }

    Ok(())
}

async fn resolve(device: &DeviceConfig, http: reqwest::Client) -> Result<Catalog> {
    let resolution = CatalogResolver::from_config(device, http)
        .resolve()
        .await
        .map_err(|err| anyhow!("{}: {err}", err.kind().message()))?;
    if let Some(cause) = &resolution.live_failure {
        eprintln!("controller unavailable ({cause}); using {}", device.fallback_path.display());
    }
    Ok(resolution.into_catalog())
}

fn print_groups(catalog: &Catalog, top: usize) {
    let index = group(catalog);
    let stats = GroupingStats::from_index(&index);

    println!("sequences:          {}", stats.total_sequences);
    println!("groups:             {}", stats.total_groups);
    println!("memberships:        {}", stats.total_memberships);
    println!("multi-group:        {}", stats.multi_group_sequences);
    if let Some(widest) = &stats.widest {
        println!(
            "most groups:        {} ({} groups)",
            widest.alias, widest.group_count
        );
    }
    if !stats.is_consistent() {
        println!("warning: some sequences are not placed in any group");
    }

    println!();
    for entry in index.largest_first().into_iter().take(top) {
        println!("{:<32} {:>4}", display_group_name(entry.name()), entry.len());
    }
}
