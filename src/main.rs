mod cli;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ContentAction, ServerAction};
use reelcheck::config::Config;
use reelcheck::prelude::*;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let (mut cfg, config_warning) = Config::load(cli.config.as_deref());
    if let Some(url) = cli.database_url.clone() { cfg.database_url = Some(url); }
    init_tracing(cfg.log.as_deref());
    if let Some(w) = config_warning { warn!("{}", w); }

    if let Err(e) = run(cli.command, &cfg).await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(directive: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(command: Commands, cfg: &Config) -> Result<()> {
    let rc = ReelCheck::connect_with_backends(cfg.database_url.as_deref(), true, &cfg.backends).await?;

    match command {
        Commands::Check { provider_ids, json } => {
            let mut results: Vec<SearchResult> = provider_ids.into_iter().map(SearchResult::new).collect();
            rc.check_many(&mut results).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for r in &results {
                    let state = if r.available { "available" } else { "missing" };
                    println!("{}: {}", r.provider_id, state);
                    for kind in &cfg.backends {
                        if let Some(url) = r.deep_link(*kind) { println!("  {}: {}", kind, url); }
                    }
                }
            }
        }
        Commands::Server { action } => match action {
            ServerAction::Add { backend, server_id, hostname, name } => {
                rc.add_server(backend, ServerConnectionDescriptor { name, hostname, server_id }).await?;
            }
            ServerAction::List { backend } => {
                let s = rc.settings(backend).await?;
                println!("{} ({})", backend, if s.enabled { "enabled" } else { "disabled" });
                for (i, srv) in s.servers.iter().enumerate() {
                    let host = if srv.hostname.is_empty() { backend.default_base_url() } else { srv.hostname.as_str() };
                    println!("  [{}] {} serverId={} {}", i, host, srv.server_id, srv.name.as_deref().unwrap_or(""));
                }
            }
        },
        Commands::Enable { backend } => rc.set_enabled(backend, true).await?,
        Commands::Disable { backend } => rc.set_enabled(backend, false).await?,
        Commands::Content { action } => match action {
            ContentAction::Add { backend, provider_id, item_id, title } => {
                rc.add_content(backend, &ServerContentRecord { provider_id, item_id, title }).await?;
            }
            ContentAction::Remove { backend, provider_id } => {
                let n = rc.remove_content(backend, &provider_id).await?;
                if n == 0 { println!("{} not found on {}", provider_id, backend); }
            }
            ContentAction::List { backend } => {
                for rec in rc.list_content(backend).await? {
                    println!("{}\t{}\t{}", rec.provider_id, rec.item_id.as_deref().unwrap_or("-"), rec.title.as_deref().unwrap_or(""));
                }
            }
        },
    }
    Ok(())
}
