//! Tokenmeter CLI binary.
//!
//! Token counting for LLM tokenization schemes.
//!
//! # Commands
//!
//! - `count` - Count tokens in a piece of text
//! - `chat` - Count tokens in a JSON chat conversation
//! - `serve` - Start the HTTP counting server

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokenmeter::{
    models::ChatMessage,
    server::{create_router, AppState, ServerConfig},
    Config, CountEngine, VERSION,
};

#[derive(Parser)]
#[command(name = "tokenmeter")]
#[command(version = VERSION)]
#[command(about = "Token counting for LLM tokenization schemes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count tokens in a piece of text
    Count {
        /// Text input (or - for stdin)
        text: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Model selector (openai, claude, gemini, llama)
        #[arg(short, long, default_value = "openai")]
        model: String,

        /// Hugging Face tokenizer identifier (llama only)
        #[arg(long)]
        hf_model_id: Option<String>,
    },

    /// Count tokens in a chat conversation (JSON message list)
    Chat {
        /// JSON input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Model selector (openai, claude, gemini, llama)
        #[arg(short, long, default_value = "openai")]
        model: String,
    },

    /// Start the HTTP counting server
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Bind to all interfaces
        #[arg(long)]
        bind_all: bool,

        /// Config file path (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Allowed CORS origin (repeatable; replaces the default list)
        #[arg(long = "origin")]
        origins: Vec<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Pick up GEMINI_API_KEY and friends from a local .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Count {
            text,
            file,
            model,
            hf_model_id,
        } => cmd_count(text, file, &model, hf_model_id.as_deref()),

        Commands::Chat { input, file, model } => cmd_chat(input, file, &model),

        Commands::Serve {
            port,
            host,
            bind_all,
            config,
            origins,
            verbose,
        } => cmd_serve(port, host, bind_all, config, origins, verbose),
    }
}

fn cmd_count(
    text: Option<String>,
    file: Option<PathBuf>,
    model: &str,
    hf_model_id: Option<&str>,
) -> anyhow::Result<()> {
    let text = read_input(text, file)?;
    let engine = CountEngine::new()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let tokens = runtime.block_on(engine.count_text(model, &text, hf_model_id))?;

    println!("{tokens}");
    Ok(())
}

fn cmd_chat(input: Option<String>, file: Option<PathBuf>, model: &str) -> anyhow::Result<()> {
    let content = read_input(input, file)?;
    let messages: Vec<ChatMessage> = serde_json::from_str(&content)?;
    let engine = CountEngine::new()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let tokens = runtime.block_on(engine.count_chat(model, &messages))?;

    println!("{tokens}");
    Ok(())
}

fn cmd_serve(
    port: Option<u16>,
    host: Option<String>,
    bind_all: bool,
    config_path: Option<PathBuf>,
    origins: Vec<String>,
    verbose: bool,
) -> anyhow::Result<()> {
    // Initialize logging
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Config file if given, environment otherwise; CLI flags override both
    let file_config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    let host = host.unwrap_or(file_config.server.host);
    let port = port.unwrap_or(file_config.server.port);
    let addr: std::net::SocketAddr = format!("{host}:{port}").parse()?;

    let mut config = ServerConfig::default()
        .with_addr(addr)
        .with_origins(if origins.is_empty() {
            file_config.cors.origins
        } else {
            origins
        })
        .with_gemini_model(file_config.gemini.model);

    if bind_all {
        config = config.bind_all();
    }

    // Create state and router
    let state = Arc::new(AppState::new(config.clone())?);
    let app = create_router(state);

    // Start server
    tracing::info!("Starting tokenmeter server on {}", config.addr);
    tracing::info!("Allowed origins: {}", config.allowed_origins.join(", "));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(config.addr).await?;
        axum::serve(listener, app).await?;
        Ok::<_, anyhow::Error>(())
    })
}

// Helper functions

fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        Ok(std::fs::read_to_string(path)?)
    } else if let Some(s) = input {
        if s == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        } else {
            Ok(s)
        }
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}
