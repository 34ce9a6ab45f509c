use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use user_directory::contract::model::User;
use user_directory::domain::ports::NoopPublisher;
use user_directory::gateways::UsersApiListing;
use user_directory::infra::{SyntheticUsersApi, UuidIdGenerator};
use user_directory::{DirectoryConfig, DirectoryController};

const MODULE_NAME: &str = "user_directory";

/// User directory console - browse the synthetic user directory
#[derive(Parser)]
#[command(name = "directory-console")]
#[command(about = "User directory console - list and search directory users")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Simulated backend latency in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the directory and print the users matching a query
    List {
        /// Free-text filter over name, email and role
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(
        &logging_config,
        Path::new(&config.console.home_dir),
    );
    tracing::info!("Directory console starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let directory_config = load_directory_config(&config)?;

    match cli.command.unwrap_or(Commands::List {
        search: String::new(),
    }) {
        Commands::List { search } => {
            list_users(directory_config, Duration::from_millis(cli.latency_ms), &search).await
        }
        Commands::Check => check_config(&config, &directory_config),
    }
}

fn load_directory_config(config: &AppConfig) -> Result<DirectoryConfig> {
    Ok(config
        .module_config::<DirectoryConfig>(MODULE_NAME)?
        .unwrap_or_default())
}

async fn list_users(config: DirectoryConfig, latency: Duration, search: &str) -> Result<()> {
    let api = Arc::new(
        SyntheticUsersApi::demo()
            .with_config(&config)
            .with_latency(latency),
    );
    let controller = DirectoryController::new(
        Arc::new(UsersApiListing::new(api)),
        Arc::new(UuidIdGenerator),
        Arc::new(NoopPublisher),
        config,
    );

    controller
        .refresh()
        .await
        .context("Failed to load the user directory")?;

    let visible = controller.search(search);
    print_table(&visible);
    println!("{} of {} users", visible.len(), controller.len());
    Ok(())
}

fn print_table(users: &[User]) {
    println!(
        "{:<16} {:<28} {:<9} {:<9} {}",
        "NAME", "EMAIL", "ROLE", "STATUS", "LAST LOGIN"
    );
    for u in users {
        println!(
            "{:<16} {:<28} {:<9} {:<9} {}",
            u.name,
            u.email,
            u.role,
            u.status.as_str(),
            u.last_login
        );
    }
}

fn check_config(config: &AppConfig, directory: &DirectoryConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if !directory.role_allowed(&directory.default_role) {
        anyhow::bail!(
            "default_role '{}' is not in allowed_roles {:?}",
            directory.default_role,
            directory.allowed_roles
        );
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
