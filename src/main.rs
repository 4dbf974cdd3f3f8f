use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;

use tix::cmd::config::{self as config_cmd, ConfigArgs};
use tix::cmd::ticket::{CreateArgs, DeleteArgs, ShowArgs, UpdateArgs};
use tix::cmd::{board, ticket};
use tix::config::AppConfig;
use tix::context::AppContext;
use tix::error::AppResult;
use tix::infra::api::ApiClient;

#[derive(Parser)]
#[command(
    name = "tix",
    author,
    version,
    about = "Terminal client for a ticket tracking service"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive ticket board (the default).
    Board,
    /// Print the summary line and the full ticket table.
    List,
    /// Show a single ticket.
    Show(ShowArgs),
    /// Create a ticket.
    Create(CreateArgs),
    /// Update fields on an existing ticket.
    Update(UpdateArgs),
    /// Delete a ticket.
    Delete(DeleteArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    // Logs stay on stderr and only appear when RUST_LOG asks for them,
    // so the board's alternate screen is never disturbed.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run().await {
        eprintln!("{} {error}", "Error:".red().bold());
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Board) {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Board => board::run(&build_context()?).await,
        Commands::List => ticket::run_list(&build_context()?).await,
        Commands::Show(args) => ticket::run_show(&build_context()?, args).await,
        Commands::Create(args) => ticket::run_create(&build_context()?, args).await,
        Commands::Update(args) => ticket::run_update(&build_context()?, args).await,
        Commands::Delete(args) => ticket::run_delete(&build_context()?, args).await,
    }
}

fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;
    let tracker = Arc::new(ApiClient::new(config.base_url.clone()));
    Ok(AppContext::new(config, tracker))
}
