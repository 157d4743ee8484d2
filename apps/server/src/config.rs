use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{bail, Context};
use giftlist_core::constants::DEFAULT_SALES_TAX_RATE;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => bail!("Invalid GL_LOG_FORMAT '{}', expected 'text' or 'json'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub sales_tax_rate: Decimal,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "christmasList.db".into(),
            request_timeout: Duration::from_secs(60),
            static_dir: "static".into(),
            sales_tax_rate: DEFAULT_SALES_TAX_RATE,
            log_format: LogFormat::Text,
            log_file: None,
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let listen_addr = match env_var("GL_LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid GL_LISTEN_ADDR '{}'", raw))?,
            None => defaults.listen_addr,
        };
        let db_path = env_var("GL_DB_PATH").unwrap_or(defaults.db_path);
        let request_timeout = match env_var("GL_REQUEST_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse()
                    .with_context(|| format!("Invalid GL_REQUEST_TIMEOUT_MS '{}'", raw))?,
            ),
            None => defaults.request_timeout,
        };
        let static_dir = env_var("GL_STATIC_DIR").unwrap_or(defaults.static_dir);
        let sales_tax_rate = match env_var("GL_SALES_TAX_RATE") {
            Some(raw) => {
                let rate = Decimal::from_str(raw.trim())
                    .with_context(|| format!("Invalid GL_SALES_TAX_RATE '{}'", raw))?;
                if rate.is_sign_negative() {
                    bail!("GL_SALES_TAX_RATE must not be negative, got {}", rate);
                }
                rate
            }
            None => defaults.sales_tax_rate,
        };
        let log_format = match env_var("GL_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };
        let log_file = env_var("GL_LOG_FILE").map(PathBuf::from);

        Ok(Self {
            listen_addr,
            db_path,
            request_timeout,
            static_dir,
            sales_tax_rate,
            log_format,
            log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = Config::default();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.db_path, "christmasList.db");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.sales_tax_rate, Decimal::new(6, 2));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" TEXT ".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
