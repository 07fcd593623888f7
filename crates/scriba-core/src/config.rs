//! Configuration module
//!
//! All settings are read once from the process environment at startup and
//! carried as an immutable value; nothing else in the application touches
//! `std::env`. The summarization credential is deliberately optional: its
//! absence degrades summarization at first use instead of failing startup.

use std::env;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const TRANSCRIBE_TIMEOUT_SECS: u64 = 900;
const SUMMARY_TIMEOUT_SECS: u64 = 120;
const MAX_UPLOAD_SIZE_MB: usize = 512;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Upload intake
    pub upload_dir: String,
    pub max_upload_size_bytes: usize,
    // Transcription tool
    pub whisper_path: String,
    pub whisper_model: String,
    pub transcripts_dir: String,
    pub transcribe_timeout_secs: u64,
    // Summarization API
    pub summary_api_url: String,
    pub summary_model: String,
    pub summary_api_key: Option<String>,
    pub summary_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_MB")
                .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_UPLOAD_SIZE_MB)
                * 1024
                * 1024,
            whisper_path: env::var("WHISPER_PATH").unwrap_or_else(|_| "whisper".to_string()),
            whisper_model: env::var("WHISPER_MODEL").unwrap_or_else(|_| "base".to_string()),
            transcripts_dir: env::var("TRANSCRIPTS_DIR")
                .unwrap_or_else(|_| "transcripts".to_string()),
            transcribe_timeout_secs: env::var("TRANSCRIBE_TIMEOUT_SECS")
                .unwrap_or_else(|_| TRANSCRIBE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(TRANSCRIBE_TIMEOUT_SECS),
            summary_api_url: env::var("SUMMARY_API_URL")
                .unwrap_or_else(|_| "https://api.together.xyz/v1/chat/completions".to_string()),
            summary_model: env::var("SUMMARY_MODEL")
                .unwrap_or_else(|_| "mistral-7b-instruct".to_string()),
            summary_api_key: env::var("SUMMARY_API_KEY").ok().filter(|k| !k.is_empty()),
            summary_timeout_secs: env::var("SUMMARY_TIMEOUT_SECS")
                .unwrap_or_else(|_| SUMMARY_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(SUMMARY_TIMEOUT_SECS),
        };

        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
