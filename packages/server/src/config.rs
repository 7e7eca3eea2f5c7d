use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::kernel::ai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::kernel::page_fetcher::{
    DEFAULT_BASE_URL, DEFAULT_MAX_BYTES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::kernel::{DatabaseConfig, OpenAIConfig, ScraperConfig};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub database: DatabaseConfig,
    pub scraper: ScraperConfig,
    pub openai: OpenAIConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| parse_list(&origins))
                .unwrap_or_default(),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            },
            scraper: ScraperConfig {
                base_url: env::var("SCRAPER_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                user_agent: env::var("USER_AGENT")
                    .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
                timeout: Duration::from_secs(
                    env::var("SCRAPER_TIMEOUT_SECS")
                        .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                        .parse()
                        .context("SCRAPER_TIMEOUT_SECS must be a valid number")?,
                ),
                max_bytes: env::var("SCRAPER_MAX_BYTES")
                    .unwrap_or_else(|_| DEFAULT_MAX_BYTES.to_string())
                    .parse()
                    .context("SCRAPER_MAX_BYTES must be a valid number")?,
            },
            openai: OpenAIConfig {
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
                model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
                base_url: env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            },
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
