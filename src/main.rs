mod cli;

use nas_cinema::{
    config,
    nas::{DirectoryResolver, NasClient},
    server,
};
use nas_cinema_common::{ConnectionStatus, MoviesResponse};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting NAS Movie Streamer");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    let result = server::start_server(config).await;
    tracing::info!("Shutting down...");
    result
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "nas_cinema=trace,nas_cinema_common=debug,tower_http=debug".to_string()
        } else {
            "nas_cinema=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::TestConnection => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(test_connection(cli.config.as_deref()))
        }
        Commands::List { folder, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_folder(cli.config.as_deref(), folder, json))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("nas-cinema {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn test_connection(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let nas = NasClient::new(&config.nas);

    let status = ConnectionStatus::from_probe(nas.ensure_session().await);
    let mark = if status.connected { "✓" } else { "✗" };
    println!("{} {} ({})", mark, status.message, nas.base_url());

    nas.close();
    if !status.connected {
        anyhow::bail!("NAS is not reachable");
    }
    Ok(())
}

async fn list_folder(
    config_path: Option<&std::path::Path>,
    folder: Option<String>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let folder = folder.unwrap_or_else(|| config.library.default_folder.clone());

    let nas = Arc::new(NasClient::new(&config.nas));
    let resolver = DirectoryResolver::new(nas.clone(), config.library.fallback_folder.clone());
    let resolution = resolver.list_folder(&folder).await;
    nas.close();

    if json {
        let response = MoviesResponse {
            total: resolution.movies.len(),
            movies: resolution.movies,
            source: resolution.source,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Folder: {}", folder);
    println!("Source: {}", resolution.source);
    println!("Movies: {}", resolution.movies.len());
    for (i, movie) in resolution.movies.iter().enumerate() {
        print!("  [{}] {}", i, movie.name);
        if let Some(ref format) = movie.format {
            print!(" ({})", format);
        }
        println!();
        println!("      {}", movie.path);
    }

    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  NAS: {}", config.nas.base_url);
            println!("  NAS user: {}", config.nas.username);
            println!("  Share root: /{}", config.nas.share_root.trim_matches('/'));
            println!("  Folders: {}", config.library.folders.join(", "));
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  NAS: {}", config.nas.base_url);
        }
    }

    Ok(())
}
