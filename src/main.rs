use anyhow::Result;
use clap::{Parser, Subcommand};
use lyricsmith::app::App;
use lyricsmith::cli::{run_generate, GenerateArgs};
use lyricsmith::models::Config;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "lyricsmith")]
#[command(about = "Generate song lyrics from a remote lyric-generation API")]
struct CliArgs {
    /// Base URL of the lyrics API (overrides LYRICS_API_BASE).
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate lyrics and render them as an HTML page.
    Generate(GenerateArgs),
    /// Check whether the API is up.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyricsmith=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env()?;
    if let Some(base_url) = args.base_url {
        config.api_base = base_url;
    }

    match args.command {
        Command::Generate(generate_args) => {
            let succeeded = run_generate(
                generate_args,
                &config,
                &mut std::io::stdin(),
                &mut std::io::stdout(),
            )
            .await?;
            if !succeeded {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Health => {
            let app = App::new(&config)?;
            match app.check_health().await {
                Ok(health) => {
                    println!("{}: {}", health.status, health.message);
                    Ok(())
                }
                Err(e) => {
                    error!("Health check failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_parse_generate_args() {
        let args = CliArgs::try_parse_from([
            "lyricsmith",
            "generate",
            "a jazz standard about rain",
            "--top-k",
            "3",
            "--base-url",
            "http://localhost:8000",
        ])
        .unwrap();
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:8000"));
        assert!(format!("{:?}", args.command).contains("top_k: Some(3)"));
    }

    #[test]
    fn test_top_k_out_of_range_rejected() {
        let err = CliArgs::try_parse_from(["lyricsmith", "generate", "q", "--top-k", "0"])
            .unwrap_err();
        assert!(err.to_string().contains("between 1 and 20"));
    }
}
