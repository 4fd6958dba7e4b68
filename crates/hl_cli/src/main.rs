use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use hl_core::{EndpointProfile, NewsSource, RequestParams};
use hl_newsapi::{KeyRing, NewsApiClient, NewsApiConfig, Rotation};
use hl_web::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Proxies a news API and serves one article at a time", long_about = None)]
pub struct Cli {
    /// NewsAPI keys, comma separated
    #[arg(long, env = "NEWSAPI_KEYS", value_delimiter = ',', required = true, hide_env_values = true)]
    api_keys: Vec<String>,
    #[arg(long, env = "HL_KEY_ROTATION", value_enum, default_value_t = Rotation::RoundRobin)]
    rotation: Rotation,
    #[arg(long, env = "NEWSAPI_BASE_URL", default_value = hl_newsapi::client::DEFAULT_BASE_URL)]
    base_url: String,
    /// Timeout applied to each upstream call, in seconds
    #[arg(long, env = "HL_UPSTREAM_TIMEOUT", default_value_t = 8)]
    timeout_secs: u64,
    #[arg(long, env = "HL_USER_AGENT")]
    user_agent: Option<String>,
    #[arg(long, env = "HL_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Resolve a single article against the live API and print the response body
    Probe {
        #[arg(long, default_value = "us")]
        country: String,
        #[arg(long, default_value = "general")]
        topic: String,
        #[arg(long, default_value = "")]
        city: String,
        /// Endpoint profile to use: search or headlines
        #[arg(long, default_value = "search")]
        profile: String,
    },
}

impl Cli {
    fn news_source(&self) -> hl_core::Result<NewsApiClient> {
        let keys = KeyRing::new(&self.api_keys, self.rotation)?;
        info!("🔑 Loaded {} NewsAPI key(s), rotation {:?}", keys.len(), self.rotation);

        let mut config = NewsApiConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..NewsApiConfig::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        NewsApiClient::new(config, keys)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = Arc::new(cli.news_source().context("invalid upstream configuration")?);
    info!("📰 Upstream initialized: {} ({})", source.name(), cli.base_url);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            hl_web::serve(cli.bind, AppState::new(source)).await?;
        }
        Commands::Probe {
            country,
            topic,
            city,
            profile,
        } => {
            let profile = EndpointProfile::by_name(&profile)
                .with_context(|| format!("unknown profile '{}', expected search or headlines", profile))?;
            let params = RequestParams { country, topic, city };
            let article = profile.respond(source.as_ref(), &params, Utc::now()).await;
            println!("{}", serde_json::to_string_pretty(&article)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_split_on_commas() {
        let cli = Cli::try_parse_from(["hl", "--api-keys", "one,two", "probe", "--profile", "headlines"]).unwrap();
        assert_eq!(cli.api_keys, vec!["one", "two"]);
        assert_eq!(cli.rotation, Rotation::RoundRobin);
        assert_eq!(cli.timeout_secs, 8);
        assert!(matches!(cli.command, Some(Commands::Probe { .. })));
    }

    #[test]
    fn test_rotation_and_bind() {
        let cli = Cli::try_parse_from([
            "hl",
            "--api-keys",
            "k",
            "--rotation",
            "random",
            "--bind",
            "127.0.0.1:8080",
            "serve",
        ])
        .unwrap();
        assert_eq!(cli.rotation, Rotation::Random);
        assert_eq!(cli.bind.port(), 8080);
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_news_source_rejects_zero_timeout() {
        let cli = Cli::try_parse_from(["hl", "--api-keys", "k", "--timeout-secs", "0"]).unwrap();
        assert!(cli.news_source().is_err());
    }
}
