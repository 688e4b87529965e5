mod config;
mod letta;
mod markdown;
mod registrar;
mod telegram;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{Config, Credentials};
use letta::LettaClient;
use std::path::PathBuf;
use telegram::{ReqwestTransport, TelegramNotifier};
use tools::{NotifyArgs, NotifyTool, Tool};

/// Send Telegram notifications and register the notifier as a Letta tool.
#[derive(Parser)]
#[command(name = "notify-telegram", version, about)]
struct Cli {
    /// Path to an optional TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a message to the configured Telegram chat
    Send {
        /// Notification text (escaped for MarkdownV2 before sending)
        message: String,
    },
    /// Upload the notify_via_telegram tool to Letta
    Register {
        /// Letta API key (defaults to LETTA_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Print the tool definition that `register` uploads
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::Send { message } => {
            let notifier = TelegramNotifier::new(ReqwestTransport::new(), &config.telegram);
            let tool = NotifyTool::new(notifier, Credentials::from_env());

            let status = tool.run(NotifyArgs { message }).await?;
            println!("{}", status);
        }
        Command::Register { api_key } => {
            let api_key = config::resolve_letta_api_key(api_key, |key| std::env::var(key).ok());
            let base_url = config.letta.base_url.clone();

            let result =
                registrar::register(api_key, |key| Ok(LettaClient::new(base_url, key))).await;

            println!();
            println!("{}", result.summary());
        }
        Command::Schema => {
            let definition = tools::notify::tool_definition();
            println!("{}", serde_json::to_string_pretty(&definition)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_send() {
        let cli = Cli::try_parse_from(["notify-telegram", "send", "hello there"]).unwrap();
        assert!(matches!(cli.command, Command::Send { ref message } if message == "hello there"));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_cli_parses_register_without_args() {
        let cli = Cli::try_parse_from(["notify-telegram", "register"]).unwrap();
        assert!(matches!(cli.command, Command::Register { api_key: None }));
    }

    #[test]
    fn test_cli_parses_register_with_key() {
        let cli = Cli::try_parse_from([
            "notify-telegram",
            "--config",
            "/etc/notify.toml",
            "register",
            "--api-key",
            "sk-123",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/notify.toml"));
        assert!(matches!(cli.command, Command::Register { api_key: Some(ref k) } if k == "sk-123"));
    }

    #[test]
    fn test_cli_requires_message() {
        assert!(Cli::try_parse_from(["notify-telegram", "send"]).is_err());
    }
}
