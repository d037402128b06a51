pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use atelier_client::{BoundedClient, CatalogClient, QuoteGateway};
use atelier_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use commands::quote::QuoteArgs;

#[derive(Debug, Parser)]
#[command(
    name = "atelier",
    about = "Atelier storefront CLI",
    long_about = "Browse the furniture catalog and walk quote requests through the five-step wizard from the terminal.",
    after_help = "Examples:\n  atelier categories\n  atelier products --category tables --sort price_asc\n  atelier quote --product teak-side-table --name \"Asha Rao\" --email asha@example.com ...\n  atelier status Q-2024-0042"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to an atelier.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the API base URL")]
    base_url: Option<String>,
    #[arg(long, global = true, help = "Override the log level (trace|debug|info|warn|error)")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List catalog categories")]
    Categories,
    #[command(about = "List products, optionally filtered and sorted")]
    Products {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, requires = "category")]
        subcategory: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, help = "price_asc|price_desc|name_asc|name_desc|rating_desc")]
        sort: Option<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    #[command(about = "Show one product by slug")]
    Product {
        slug: String,
    },
    #[command(about = "Submit a quote request for one or more products")]
    Quote(QuoteArgs),
    #[command(about = "Check the lifecycle stage of a submitted quote")]
    Status {
        quote_id: String,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let load_options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: ConfigOverrides {
            base_url: cli.base_url.clone(),
            log_level: cli.log_level.clone(),
        },
    };

    let config = match AppConfig::load(load_options) {
        Ok(config) => config,
        Err(error) => {
            let error = atelier_core::errors::ApplicationError::from(error);
            let result = commands::CommandResult::failure(
                "config",
                error.error_class(),
                error.to_string(),
                error.exit_code(),
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_logging(&config);

    let http = BoundedClient::new(config.api.base_url.clone());
    let catalog = CatalogClient::new(http.clone(), config.api.fetch_timeout());
    let gateway = QuoteGateway::new(
        http,
        config.api.submit_timeout(),
        config.api.fetch_timeout(),
    );

    let result = match cli.command {
        Command::Categories => commands::catalog::categories(&catalog).await,
        Command::Products {
            category,
            subcategory,
            search,
            sort,
            min_price,
            max_price,
            page,
            limit,
        } => {
            commands::catalog::products(
                &catalog,
                commands::catalog::ProductFilters {
                    category,
                    subcategory,
                    search,
                    sort,
                    min_price,
                    max_price,
                    page,
                    limit,
                },
            )
            .await
        }
        Command::Product { slug } => commands::catalog::product(&catalog, &slug).await,
        Command::Quote(args) => commands::quote::run(&catalog, &gateway, args).await,
        Command::Status { quote_id } => commands::status::run(&gateway, &quote_id).await,
        Command::Config => commands::CommandResult {
            exit_code: 0,
            output: commands::config::run(&config, cli.config.as_deref()),
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
