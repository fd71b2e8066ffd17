//! `clashdash`: manage a Clash-compatible proxy core from the terminal.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use clash_dash::api::ControllerClient;
use clash_dash::commands::{Command, Dispatcher};
use clash_dash::config::{load_config, ClientConfig, DashConfig};
use clash_dash::observability::logging;
use clash_dash::rules::{RuleBrowser, RuleListItem};
use clash_dash::server::{Server, ServerForm};
use clash_dash::sync::{parse_port, ConfigSync};
use clash_dash::PendingEdit;

#[derive(Parser)]
#[command(name = "clashdash")]
#[command(about = "Management CLI for Clash-compatible proxy cores", long_about = None)]
struct Cli {
    /// Configuration file with known servers.
    #[arg(short, long, default_value = "clashdash.toml")]
    config: PathBuf,

    /// Server name from the configuration file.
    #[arg(short, long)]
    server: Option<String>,

    /// Controller host; bypasses the configured server list.
    #[arg(long)]
    host: Option<String>,

    #[arg(long, default_value = "9090")]
    port: String,

    #[arg(long, default_value = "")]
    secret: String,

    #[arg(long)]
    tls: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current configuration
    Show,
    /// Change one configuration field, e.g. `set tun.enable true`
    Set { path: String, value: String },
    /// Change a port, e.g. `port mixed-port 7893`
    Port { key: String, value: String },
    /// Force a configuration reload
    Reload,
    /// Update GEO databases
    Geo,
    /// Flush the FakeIP cache
    FlushFakeip,
    /// Restart the core
    Restart,
    /// Upgrade the core
    Upgrade,
    /// List routing rules
    Rules,
    /// List rule providers
    Providers,
    /// Refresh one rule provider
    RefreshProvider { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if cli.host.is_some() && !cli.config.exists() {
        DashConfig::default()
    } else {
        load_config(&cli.config)?
    };
    logging::init(&config.logging.level);

    let server = resolve_server(&cli, &config, &cli.config)?;
    let client = ControllerClient::with_client(build_http_client(&config.client)?);

    tracing::debug!(server = %server.display_name(), scheme = server.scheme(), "Using server");

    match cli.command {
        Commands::Show => {
            let sync = ConfigSync::new(client);
            let snapshot = sync.try_fetch_config(&server).await?;
            println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?);
        }
        Commands::Set { path, value } => {
            let sync = ConfigSync::new(client);
            let edit = PendingEdit::new(path, parse_value(&value));
            sync.try_update_config(&server, &edit).await?;
            println!("{} = {}", edit.path, edit.value);
        }
        Commands::Port { key, value } => {
            let port = parse_port(&value).ok_or_else(|| format!("invalid port '{}'", value))?;
            let sync = ConfigSync::new(client);
            let edit = PendingEdit::new(key, port);
            sync.try_update_config(&server, &edit).await?;
            println!("{} = {}", edit.path, port);
        }
        Commands::Reload => run_command(client, &server, Command::ReloadConfig).await?,
        Commands::Geo => run_command(client, &server, Command::UpdateGeo).await?,
        Commands::FlushFakeip => run_command(client, &server, Command::FlushFakeIp).await?,
        Commands::Restart => run_command(client, &server, Command::RestartCore).await?,
        Commands::Upgrade => run_command(client, &server, Command::UpgradeCore).await?,
        Commands::Rules => {
            let browser = RuleBrowser::new(client);
            browser.try_fetch_data(&server).await?;
            let book = browser.book();
            for item in book.items() {
                print_rule(&item);
            }
        }
        Commands::Providers => {
            let providers = client.get_rule_providers(&server).await?;
            for provider in providers.values() {
                println!(
                    "{}\t{}\t{} rules\t{}",
                    provider.name,
                    provider.behavior,
                    provider.rule_count,
                    provider.updated_at.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::RefreshProvider { name } => {
            client.refresh_rule_provider(&server, &name).await?;
            println!("Rule provider '{}' refreshed", name);
        }
    }

    Ok(())
}

fn resolve_server(cli: &Cli, config: &DashConfig, path: &Path) -> Result<Server, String> {
    if let Some(host) = &cli.host {
        return server_from_flags(cli, host);
    }

    config
        .select_server(cli.server.as_deref())
        .cloned()
        .ok_or_else(|| match &cli.server {
            Some(name) => format!("no server named '{}' in {}", name, path.display()),
            None => format!("no servers configured in {}", path.display()),
        })
}

/// Server from `--host` and friends. The scheme follows `--tls` exactly,
/// unlike the add-server form which forces HTTPS for hostnames.
fn server_from_flags(cli: &Cli, host: &str) -> Result<Server, String> {
    let form = ServerForm {
        name: String::new(),
        host: host.to_string(),
        port: cli.port.clone(),
        secret: cli.secret.clone(),
        tls: cli.tls,
    };
    form.validate().map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    })?;
    Ok(Server::new(form.host, form.port, form.secret).with_tls(cli.tls))
}

fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
}

/// JSON literal if it parses, otherwise a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

async fn run_command(
    client: ControllerClient,
    server: &Server,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    Dispatcher::new(client).try_dispatch(server, command).await?;
    println!("{} succeeded", command);
    Ok(())
}

fn print_rule(item: &RuleListItem<'_>) {
    let rule = item.rule();
    match item.provider() {
        Some(provider) => println!(
            "{}\t{}\t{} · {}\t{} rules",
            rule.display_payload(),
            rule.proxy,
            rule.rule_type,
            provider.behavior,
            provider.rule_count
        ),
        None => println!("{}\t{}\t{}", rule.display_payload(), rule.proxy, rule.rule_type),
    }
}
