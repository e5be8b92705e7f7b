// ABOUTME: Command line entry point for the jazz improv MCP server
// ABOUTME: Starts stdio or HTTP transports and runs one-off enhancements

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jazz_improv_core::{EnhancementRequest, ProfileSynthesizer, SoloPhase, DEFAULT_FOUNDATION};
use jazz_improv_mcp_server::{handlers, JazzImprovMcpServer, LoggingConfig, ServerConfig};
use rmcp::ServiceExt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, Registry};

const LOG_FILE: &str = "jazz-improv-mcp.log";

#[derive(Parser)]
#[command(
    name = "jazz-improv-mcp",
    version,
    author,
    about = "Jazz improvisation prompt enhancement over MCP"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    verbose: bool,

    #[arg(long, global = true, help = "Configuration file path")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start MCP server with specified transport")]
    Start {
        #[command(subcommand)]
        transport: TransportType,
    },

    #[command(about = "Enhance a single prompt and print the result as JSON")]
    Enhance {
        #[arg(help = "Base image prompt")]
        prompt: String,

        #[arg(short, long, default_value = DEFAULT_FOUNDATION, help = "Harmonic foundation")]
        foundation: String,

        #[arg(short, long, default_value = SoloPhase::DEFAULT.as_str(), help = "Solo phase")]
        phase: String,

        #[arg(
            short,
            long,
            default_value_t = 5,
            allow_negative_numbers = true,
            help = "Intensity 1-10 (clamped)"
        )]
        intensity: i64,

        #[arg(long, help = "Disable Monk emphasis")]
        no_monk_emphasis: bool,
    },

    #[command(about = "Print the harmonic foundation catalog")]
    Foundations,
}

#[derive(Subcommand)]
enum TransportType {
    #[command(about = "Serve over stdin/stdout")]
    Stdio,

    #[cfg(feature = "server-http")]
    #[command(about = "Serve streamable HTTP")]
    Http {
        #[arg(long, help = "Host to bind (overrides config)")]
        host: Option<String>,

        #[arg(long, help = "Port to bind (overrides config)")]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config =
        ServerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Start { transport } => match transport {
            TransportType::Stdio => {
                let _guard = init_logging(&config.logging, cli.verbose, true);
                serve_stdio(config).await
            }
            #[cfg(feature = "server-http")]
            TransportType::Http { host, port } => {
                let _guard = init_logging(&config.logging, cli.verbose, false);
                serve_http(config, host, port).await
            }
        },
        Commands::Enhance {
            prompt,
            foundation,
            phase,
            intensity,
            no_monk_emphasis,
        } => {
            let _guard = init_logging(&config.logging, cli.verbose, true);
            let store = config
                .knowledge
                .load_store()
                .context("Failed to load catalogs")?;
            let synthesizer = ProfileSynthesizer::new(Arc::new(store));
            let request = EnhancementRequest::new(prompt)
                .with_foundation(foundation)
                .with_phase(phase)
                .with_intensity(intensity)
                .with_monk_emphasis(!no_monk_emphasis);
            let result = synthesizer.enhance(&request);
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Commands::Foundations => {
            let _guard = init_logging(&config.logging, cli.verbose, true);
            let store = config
                .knowledge
                .load_store()
                .context("Failed to load catalogs")?;
            let listing = handlers::list_harmonic_foundations(&store)?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
            Ok(())
        }
    }
}

async fn serve_stdio(config: ServerConfig) -> Result<()> {
    let server = JazzImprovMcpServer::from_config(&config).context("Failed to build server")?;
    info!("Starting jazz improv MCP server on stdio");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| error!("Failed to start stdio transport: {}", e))?;
    service.waiting().await?;

    info!("stdio session closed");
    Ok(())
}

#[cfg(feature = "server-http")]
async fn serve_http(mut config: ServerConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.http.host = host;
    }
    if let Some(port) = port {
        config.http.port = port;
    }
    config.validate().context("Invalid HTTP settings")?;

    let server = JazzImprovMcpServer::from_config(&config).context("Failed to build server")?;
    jazz_improv_mcp_server::start_http_server(server, config.http)
        .await
        .context("HTTP server failed")
}

/// Install the global subscriber. When stdout carries protocol or command
/// output, logs go to `log_dir` if configured, else stderr.
fn init_logging(config: &LoggingConfig, verbose: bool, keep_stdout_clean: bool) -> Option<WorkerGuard> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let env_filter = || EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if !keep_stdout_clean {
        let subscriber = Registry::default()
            .with(env_filter())
            .with(fmt::layer());
        tracing::subscriber::set_global_default(subscriber).ok();
        return None;
    }

    if let Some(dir) = &config.log_dir {
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::never(dir, LOG_FILE);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let subscriber = Registry::default().with(env_filter()).with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_line_number(true),
                );
                tracing::subscriber::set_global_default(subscriber).ok();
                return Some(guard);
            }
            Err(e) => eprintln!("Cannot create log directory {}: {}", dir.display(), e),
        }
    }

    let subscriber = Registry::default()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber).ok();
    None
}
