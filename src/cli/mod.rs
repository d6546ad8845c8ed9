pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "product-api")]
#[command(about = "E-commerce product management API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Print a freshly issued bearer token for the configured secret")]
    Token,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Token) => commands::token::handle(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["product-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from([
            "product-api",
            "serve",
            "--port",
            "8081",
            "--database-url",
            "sqlite::memory:",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, Some(8081));
                assert_eq!(args.database_url.as_deref(), Some("sqlite::memory:"));
                assert!(args.host.is_none());
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn parses_token_command() {
        let cli = Cli::try_parse_from(["product-api", "token"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Token)));
    }
}
