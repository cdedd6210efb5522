//! CLI module for Switchyard
//!
//! Provides commands:
//! - `classify`: Show the category a prompt falls into
//! - `route`: Show the routing decision for a prompt
//! - `ask`: Complete a prompt with provider fallback
//! - `catalog`: List models and preference lists
//! - `status`: Credentials and configuration

use clap::{Args, Parser, Subcommand};
use switchyard_llm::{Priority, PromptCategory, Provider};

pub mod ask;
pub mod catalog;
pub mod route;
pub mod status;

/// Switchyard prompt router CLI
#[derive(Parser, Debug)]
#[command(name = "switchyard")]
#[command(about = "Route prompts to the best available model")]
#[command(version)]
pub struct Cli {
    /// Extra configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the category a prompt is classified into
    Classify(PromptArgs),
    /// Show the routing decision for a prompt
    Route(RouteArgs),
    /// Complete a prompt through the gateway with provider fallback
    Ask(AskArgs),
    /// List catalog models or a preference list
    Catalog(CatalogArgs),
    /// Show credentials and configuration
    Status,
}

#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Prompt text
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

impl PromptArgs {
    pub fn text(&self) -> String {
        self.prompt.join(" ")
    }
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    #[command(flatten)]
    pub prompt: PromptArgs,
    /// cost, latency or quality (defaults to the configured priority)
    #[arg(short, long)]
    pub priority: Option<Priority>,
    /// Providers to leave out
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<Provider>,
    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub prompt: PromptArgs,
    /// cost, latency or quality (defaults to the configured priority)
    #[arg(short, long)]
    pub priority: Option<Priority>,
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Show the preference list for this category
    #[arg(short, long)]
    pub category: Option<PromptCategory>,
    /// Priority for the preference list
    #[arg(short, long, default_value_t = Priority::Cost)]
    pub priority: Priority,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let load = || match &cli.config {
        Some(path) => crate::app::loader::load_config_file(path),
        None => crate::app::load_config(),
    };

    match cli.command {
        Some(Commands::Classify(ref args)) => route::classify(args),
        Some(Commands::Route(ref args)) => route::run(&load()?, args),
        Some(Commands::Ask(ref args)) => ask::run(&load()?, args).await,
        Some(Commands::Catalog(ref args)) => catalog::run(args),
        Some(Commands::Status) => status::run(&load()?),
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
