//! Langdock A2A Agent entry point.

use anyhow::Context;
use clap::{Parser, Subcommand};
use langdock_a2a_agent::{a2a, config::Settings, logging};

#[derive(Debug, Parser)]
#[command(name = "langdock-a2a-agent", version, about)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the A2A server on port 3333 (default)
    Serve,
    /// Print the agent card JSON and exit
    Card,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.json_logs)?;

    let settings = Settings::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => a2a::start_server(&settings).await,
        Command::Card => {
            let card = a2a::agent_card::build_agent_card(&settings.agent_url, settings.agent_mode);
            println!("{}", serde_json::to_string_pretty(&card)?);
            Ok(())
        }
    }
}
