use std::env;
use std::time::Duration;

use vaccine_scan::ScanError;

/// Runtime configuration read from the process environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Postal code around which centers are searched
    pub postal_code: String,

    /// Search radius in kilometers
    pub radius_km: u32,

    /// Fixed delay between poll cycles
    pub poll_interval: Duration,

    /// Telegram bot credentials; `None` degrades notifications to the log
    pub telegram: Option<TelegramConfig>,
}

/// Telegram bot credentials
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token issued by the BotFather
    pub bot_token: String,

    /// Chat the bot posts availability alerts into
    pub chat_id: String,
}

impl Config {
    /// Load the configuration from the environment. Missing or malformed
    /// required values are fatal at startup; missing Telegram credentials
    /// only degrade the notification channel.
    pub fn from_env() -> Result<Self, ScanError> {
        let postal_code = env::var("POSTAL_CODE").map_err(|_| {
            ScanError::ConfigError("POSTAL_CODE environment variable not set".to_string())
        })?;

        let radius_km = env::var("SEARCH_RADIUS_KM")
            .map_err(|_| {
                ScanError::ConfigError("SEARCH_RADIUS_KM environment variable not set".to_string())
            })?
            .parse::<u32>()
            .map_err(|e| {
                ScanError::ConfigError(format!("SEARCH_RADIUS_KM is not a valid integer: {}", e))
            })?;

        if radius_km == 0 {
            return Err(ScanError::ConfigError(
                "SEARCH_RADIUS_KM must be positive".to_string(),
            ));
        }

        let poll_seconds = env::var("POLL_INTERVAL_SECONDS")
            .map_err(|_| {
                ScanError::ConfigError(
                    "POLL_INTERVAL_SECONDS environment variable not set".to_string(),
                )
            })?
            .parse::<u64>()
            .map_err(|e| {
                ScanError::ConfigError(format!(
                    "POLL_INTERVAL_SECONDS is not a valid integer: {}",
                    e
                ))
            })?;

        if poll_seconds == 0 {
            return Err(ScanError::ConfigError(
                "POLL_INTERVAL_SECONDS must be positive".to_string(),
            ));
        }

        let bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());
        let chat_id = env::var("TELEGRAM_CHAT_ID")
            .ok()
            .filter(|chat| !chat.is_empty());

        let telegram = match (bot_token, chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            (None, None) => None,
            _ => {
                log::warn!(
                    "Only one of TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID is set - notifications stay on the console"
                );
                None
            }
        };

        Ok(Self {
            postal_code,
            radius_km,
            poll_interval: Duration::from_secs(poll_seconds),
            telegram,
        })
    }
}
