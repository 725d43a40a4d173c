//! Application configuration.
//!
//! Configuration is assembled in three layers: built-in YAML defaults,
//! an optional override file pointed to by `CONFIG_PATH`, and finally
//! individual environment variables. Later layers win.

use std::env;
use std::fs;

use lazy_static::lazy_static;
use serde::Deserialize;

/// Built-in defaults, shipped with the binary.
const DEFAULT_CONFIG: &str = include_str!("../../config/default.yaml");

lazy_static! {
    pub static ref CONFIG: Config = Config::load().expect("Failed to load configuration");
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub otp: OtpConfig,
    pub product: ProductConfig,
    pub telegram: TelegramConfig,
    pub admins: AdminsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    pub lifetime_seconds: i64,
    pub resend_interval_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    pub image: ProductImageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductImageConfig {
    /// Maximum number of images attachable to one product.
    pub maximum: usize,
    /// Directory where uploaded images are stored.
    pub destination: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token. Empty disables the Telegram channel.
    pub token: String,
    /// Chats receiving order notifications.
    pub admin_chat_ids: Vec<i64>,
    /// Optional chat receiving OTP codes and other debug traffic.
    pub debug_chat_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminsConfig {
    /// Phones granted the admin role on sign-in.
    pub phones: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let mut source = DEFAULT_CONFIG.to_string();
        if let Ok(path) = env::var("CONFIG_PATH") {
            source = fs::read_to_string(&path)
                .map_err(|e| format!("Cannot read config file {}: {}", path, e))?;
        }

        let mut config = Config::from_yaml(&source)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document without touching the process environment.
    pub fn from_yaml(source: &str) -> Result<Self, String> {
        serde_yaml::from_str(source).map_err(|e| format!("Invalid config: {}", e))
    }

    fn apply_env(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            self.server.port = port.parse().expect("SERVER_PORT must be a valid number");
        }
        if let Ok(uri) = env::var("MONGODB_URI") {
            self.database.uri = uri;
        }
        if let Ok(name) = env::var("DATABASE_NAME") {
            self.database.name = name;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Ok(hours) = env::var("JWT_EXPIRATION_HOURS") {
            self.jwt.expiration_hours = hours
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a valid number");
        }
        if let Ok(token) = env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = token;
        }
        if let Ok(chats) = env::var("TELEGRAM_ADMIN_CHAT_IDS") {
            self.telegram.admin_chat_ids = chats
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    s.trim()
                        .parse()
                        .expect("TELEGRAM_ADMIN_CHAT_IDS must be comma-separated integers")
                })
                .collect();
        }
        if let Ok(phones) = env::var("ADMIN_PHONES") {
            self.admins.phones = phones
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .collect();
        }
        if let Ok(dir) = env::var("UPLOAD_DIR") {
            self.product.image.destination = dir;
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.is_empty() {
            return Err("jwt.secret must not be empty".to_string());
        }
        if self.otp.lifetime_seconds <= 0 {
            return Err("otp.lifetime_seconds must be positive".to_string());
        }
        if self.product.image.maximum == 0 {
            return Err("product.image.maximum must be at least 1".to_string());
        }
        Ok(())
    }

    /// True when a Telegram bot token is configured.
    pub fn telegram_enabled(&self) -> bool {
        !self.telegram.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::from_yaml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.name, "shop");
        assert_eq!(config.otp.lifetime_seconds, 300);
        assert_eq!(config.product.image.maximum, 6);
        assert!(!config.telegram_enabled());
    }

    #[test]
    fn override_file_replaces_defaults() {
        let yaml = r#"
server: { host: 0.0.0.0, port: 9000 }
database: { uri: "mongodb://db:27017", name: shop-test }
jwt: { secret: test-secret, expiration_hours: 1 }
otp: { lifetime_seconds: 60, resend_interval_seconds: 10 }
product: { image: { maximum: 3, destination: /tmp/img } }
telegram: { token: "123:abc", admin_chat_ids: [1, 2], debug_chat_id: 3 }
admins: { phones: ["+79990000000"] }
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.telegram.admin_chat_ids, vec![1, 2]);
        assert_eq!(config.telegram.debug_chat_id, Some(3));
        assert!(config.telegram_enabled());
        assert_eq!(config.admins.phones, vec!["+79990000000"]);
    }

    #[test]
    fn missing_section_is_rejected() {
        assert!(Config::from_yaml("server: { host: x, port: 1 }").is_err());
    }
}
