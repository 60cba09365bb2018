use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub telegram_bot_token: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
    pub api_rps: u32,
    pub auth_rps: u32,
    pub media_base_url: String,
    pub media_dir: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            telegram_bot_token: get_env("TELEGRAM_BOT_TOKEN")?,
            access_token_ttl_minutes: get_env_parse("ACCESS_TOKEN_TTL_MINUTES")?,
            refresh_token_ttl_days: get_env_parse("REFRESH_TOKEN_TTL_DAYS")?,
            api_rps: get_env_parse("API_RPS")?,
            auth_rps: get_env_parse("AUTH_RPS")?,
            media_base_url: get_env("MEDIA_BASE_URL")?,
            media_dir: env::var("MEDIA_DIR").unwrap_or_else(|_| "/app/media".to_string()),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
