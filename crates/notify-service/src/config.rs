//! Configuration for the notification service.

use anyhow::{ensure, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Twilio configuration (SMS, WhatsApp, OTP delivery)
    pub twilio: TwilioConfig,

    /// SendGrid configuration (email)
    pub sendgrid: SendGridConfig,

    /// OTP issuance configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    /// Account SID (AC...)
    pub account_sid: String,

    /// Auth token
    pub auth_token: SecretString,

    /// Sender number for SMS, E.164
    pub from_number: String,

    /// Sender number for WhatsApp; falls back to `from_number`
    #[serde(default)]
    pub whatsapp_from: Option<String>,

    /// REST API base URL
    #[serde(default = "default_twilio_api_url")]
    pub api_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendGridConfig {
    /// API key
    pub api_key: SecretString,

    /// Verified sender address
    pub from_email: String,

    /// Sender display name
    #[serde(default)]
    pub from_name: Option<String>,

    /// REST API base URL
    #[serde(default = "default_sendgrid_api_url")]
    pub api_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    /// How long an issued code stays valid
    #[serde(default = "default_otp_ttl", with = "humantime_serde")]
    pub ttl: Duration,

    /// Discard a code once it has been verified
    #[serde(default = "default_true")]
    pub single_use: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per minute shared by the delivery and OTP routes. Unset or
    /// zero leaves them unthrottled.
    #[serde(default)]
    pub global_per_minute: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl: default_otp_ttl(),
            single_use: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_twilio_api_url() -> String {
    "https://api.twilio.com".into()
}

fn default_sendgrid_api_url() -> String {
    "https://api.sendgrid.com".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_otp_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

fn default_true() -> bool {
    true
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables and validate it.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(
            config::Environment::default()
                .separator("__")
                .try_parsing(false),
        )
    }

    /// Build configuration from an environment source.
    pub fn from_environment(source: config::Environment) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject empty provider credentials and sender identities.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.twilio.account_sid.trim().is_empty()
                && !self.twilio.auth_token.expose_secret().trim().is_empty()
                && !self.twilio.from_number.trim().is_empty(),
            "Twilio credentials are not configured (TWILIO__ACCOUNT_SID, TWILIO__AUTH_TOKEN, TWILIO__FROM_NUMBER)"
        );
        ensure!(
            !self.sendgrid.api_key.expose_secret().trim().is_empty()
                && !self.sendgrid.from_email.trim().is_empty(),
            "SendGrid credentials are not configured (SENDGRID__API_KEY, SENDGRID__FROM_EMAIL)"
        );
        ensure!(!self.otp.ttl.is_zero(), "OTP__TTL must be greater than zero");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<String, String> {
        [
            ("TWILIO__ACCOUNT_SID", "ACtest123"),
            ("TWILIO__AUTH_TOKEN", "test-token"),
            ("TWILIO__FROM_NUMBER", "+15550001111"),
            ("SENDGRID__API_KEY", "SG.test-key"),
            ("SENDGRID__FROM_EMAIL", "noreply@example.com"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn load(env: HashMap<String, String>) -> Result<Config> {
        Config::from_environment(
            config::Environment::default()
                .separator("__")
                .try_parsing(false)
                .source(Some(env)),
        )
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(base_env()).unwrap();

        assert_eq!(config.twilio.account_sid, "ACtest123");
        assert_eq!(config.twilio.auth_token.expose_secret(), "test-token");
        assert_eq!(config.twilio.api_url, "https://api.twilio.com");
        assert!(config.twilio.whatsapp_from.is_none());
        assert_eq!(config.sendgrid.api_url, "https://api.sendgrid.com");
        assert_eq!(config.otp.ttl, Duration::from_secs(300));
        assert!(config.otp.single_use);
        assert_eq!(config.server.port, 8080);
        assert!(config.rate_limit.global_per_minute.is_none());
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let mut env = base_env();
        env.insert("OTP__TTL".into(), "90s".into());
        env.insert("OTP__SINGLE_USE".into(), "false".into());
        env.insert("SERVER__PORT".into(), "9000".into());
        env.insert("LOG__FORMAT".into(), "json".into());
        env.insert("TWILIO__WHATSAPP_FROM".into(), "+15559990000".into());
        env.insert("RATE_LIMIT__GLOBAL_PER_MINUTE".into(), "30".into());

        let config = load(env).unwrap();

        assert_eq!(config.otp.ttl, Duration::from_secs(90));
        assert!(!config.otp.single_use);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.twilio.whatsapp_from.as_deref(), Some("+15559990000"));
        assert_eq!(config.rate_limit.global_per_minute, Some(30));
    }

    #[test]
    fn test_missing_twilio_secret_fails() {
        let mut env = base_env();
        env.remove("TWILIO__AUTH_TOKEN");
        assert!(load(env).is_err());
    }

    #[test]
    fn test_empty_sendgrid_key_fails() {
        let mut env = base_env();
        env.insert("SENDGRID__API_KEY".into(), "".into());

        let err = load(env).unwrap_err();
        assert!(err.to_string().contains("SendGrid"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(base_env()).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("test-token"));
        assert!(!debug.contains("SG.test-key"));
    }
}
