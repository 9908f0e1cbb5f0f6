use anyhow::{bail, Context, Result};

use crate::layout::pagination::{DEFAULT_HEADER_RESERVATION, DEFAULT_ITEMS_PER_PAGE};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub items_per_page: usize,
    pub header_reservation: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let items_per_page = parse_or(&lookup, "ITEMS_PER_PAGE", DEFAULT_ITEMS_PER_PAGE)?;
        if items_per_page == 0 {
            bail!("ITEMS_PER_PAGE must be at least 1");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            items_per_page,
            header_reservation: parse_or(
                &lookup,
                "HEADER_RESERVATION",
                DEFAULT_HEADER_RESERVATION,
            )?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
