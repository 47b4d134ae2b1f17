use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use ybot::infrastructure::adapters::console::{ConsoleClient, ConsoleCommands, ConsoleReader};
use ybot::{Bot, BotError, Config};

const EVENT_BUFFER: usize = 64;
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "ybot")]
#[command(about = "A command-dispatching chat bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Version => {
            println!("ybot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if Path::new(config_path).exists() {
        Config::load_with_env(config_path, |key| std::env::var(key).ok())?
    } else {
        tracing::warn!("Config {} not found, using defaults and environment", config_path);
        Config::load_env()
    };

    if let Some(token) = token_override {
        config.connection.token = Some(token);
    }

    // The console client does not authenticate
    if config.token().is_none() {
        config.connection.token = Some("console".to_string());
    }

    Ok(config)
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let config = load_config(config_path, token_override)?;
    tracing::info!("Starting ybot: {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async move {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let client = Arc::new(ConsoleClient::new(config.bot.name.clone(), events_tx));
        let console_enabled = config.console.enabled;

        let bot = Bot::new(config, client.clone(), events_rx)?;
        let shutdown = bot.shutdown_handle();

        let identity = bot.connect().await?;
        tracing::info!("Logged in as {}", identity);

        let on_signal = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted");
                on_signal.trigger();
            }
        });

        if console_enabled {
            let reader = ConsoleReader::new(ConsoleCommands::with_defaults(), shutdown.clone())
                .with_forward(client);
            tokio::spawn(async move {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                if let Err(e) = reader.run(stdin).await {
                    tracing::error!("Console error: {}", e);
                }
                shutdown.trigger();
            });
        }

        bot.run().await?;
        Ok::<(), BotError>(())
    });

    // The console task may still be parked in a blocking stdin read
    rt.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
