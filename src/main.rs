use nutri_ai::api;
use nutri_ai::commands::{print_help, CommandHandler, CommandOutcome};
use nutri_ai::config::{ConfigError, ProviderConfig};
use nutri_ai::food::{FoodConfig, NutritionClient};
use nutri_ai::providers::gemini::GeminiProvider;
use std::net::SocketAddr;
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Estimate calories and macros for any food description", long_about = None)]
struct Args {
    #[arg(short, long)]
    api_key: Option<String>,

    #[arg(long)]
    model: Option<String>,

    /// Analyze a single query and exit
    #[arg(short, long)]
    query: Option<String>,

    #[arg(long)]
    api: bool,

    #[arg(long, default_value = "3000")]
    port: u16,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Terminal error: {0}")]
    Terminal(#[from] ReadlineError),
    #[error("Server error: {0}")]
    Server(String),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let default_filter = if args.api { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let client = build_client(&args)?;

    if args.api {
        run_api_server(client, args.port).await
    } else if let Some(query) = args.query.as_deref() {
        run_single_query(client, query).await
    } else {
        colored::control::set_override(true);
        run_cli_mode(client).await
    }
}

fn build_client(args: &Args) -> Result<NutritionClient, AppError> {
    let mut provider_config = match &args.api_key {
        Some(key) => ProviderConfig::from_lookup("gemini", |name| {
            if name == "GEMINI_API_KEY" {
                Some(key.clone())
            } else {
                std::env::var(name).ok()
            }
        })?,
        None => ProviderConfig::from_env("gemini")?,
    };
    if let Some(model) = &args.model {
        provider_config = provider_config.with_model(model.clone());
    }

    let provider = GeminiProvider::new(provider_config)
        .map_err(|e| AppError::Provider(e.to_string()))?;
    let food_config = FoodConfig::from_env()?;

    Ok(NutritionClient::new(Box::new(provider), food_config))
}

async fn run_single_query(client: NutritionClient, query: &str) -> Result<(), AppError> {
    let mut handler = CommandHandler::new(client);
    if let Err(e) = handler.search(query).await {
        eprintln!("{}", e.red());
        std::process::exit(1);
    }
    Ok(())
}

async fn run_cli_mode(client: NutritionClient) -> Result<(), AppError> {
    println!("Using model {}", client.model_name().await.cyan());
    let mut command_handler = CommandHandler::new(client);

    // Show initial help menu
    print_help();

    let mut rl = Editor::<(), DefaultHistory>::new()?;

    // Main input loop
    loop {
        match rl.readline("🍴 ") {
            Ok(line) => {
                let input = line.trim();
                if !input.is_empty() {
                    let _ = rl.add_history_entry(input);
                }

                match command_handler.handle_command(input).await {
                    Ok(CommandOutcome::Exit) => break,
                    Ok(CommandOutcome::Continue) => {}
                    Err(e) => println!("{}", e.red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

async fn run_api_server(client: NutritionClient, port: u16) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Starting API server on {}", addr);

    let app = api::create_api(client);

    let listener = TcpListener::bind(&addr).await
        .map_err(|e| AppError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    log::info!("Ready to accept connections on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    Ok(())
}
