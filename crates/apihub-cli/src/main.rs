//! apihub CLI: MCP adapter in front of a remote API hub.

use clap::{Parser, Subcommand};

use apihub_config::{load_config, HubConfig, LogFormat};

mod commands;
mod logging;
mod output;

/// apihub - expose a remote API hub to AI agents as MCP tools.
#[derive(Debug, Parser)]
#[command(name = "apihub", version, about)]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain or json (overrides logging.format).
    #[arg(long, global = true, value_parser = ["plain", "json"])]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the MCP server over stdio (default) or HTTP.
    Serve(commands::serve::ServeArgs),
    /// Print the tool catalogue as served by tools/list.
    Tools(commands::tools::ToolsArgs),
    /// Print version information.
    Version,
}

impl Cli {
    fn load(&self) -> anyhow::Result<HubConfig> {
        let mut config = match load_config(self.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                output::print_diagnostic(&e);
                return Err(e.into());
            }
        };
        match self.log_format.as_deref() {
            Some("json") => config.logging.format = LogFormat::Json,
            Some("plain") => config.logging.format = LogFormat::Plain,
            _ => {}
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Tools(args)) => return commands::tools::execute(args),
        Some(Commands::Version) => return commands::version::execute(),
        _ => {}
    }

    let config = cli.load()?;
    logging::init(&config.logging, cli.verbose)?;
    tracing::debug!(config_path = ?cli.config, "apihub starting");

    let default_args = commands::serve::ServeArgs::default();
    let args = match &cli.command {
        Some(Commands::Serve(args)) => args,
        _ => &default_args,
    };
    let result = commands::serve::execute(args, config).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "apihub stopped with an error");
    }
    result
}
