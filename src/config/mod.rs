// src/config/mod.rs
// All tunables come from the environment. Secrets (completion credential,
// session secret) are read here and must never be logged or rendered.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct BedsideConfig {
    // ── Server
    pub host: String,
    pub port: u16,

    // ── Completion collaborator
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub model: String,
    pub completion_timeout: u64,
    pub completion_stream: bool,

    // ── Sessions & security
    pub session_secret: String,
    pub session_ttl: u64,
    pub public: bool,
    pub rate_limit_per_minute: u32,

    // ── Logging
    pub log_level: String,
}

/// Parse an env var, tolerating trailing comments and whitespace.
/// Missing or unparseable values fall back to the default.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean = val.split('#').next().unwrap_or("").trim();
            clean.parse::<T>().unwrap_or(default)
        }
        Err(_) => default,
    }
}

impl BedsideConfig {
    pub fn from_env() -> Self {
        // .env is optional; deployments usually set the environment directly.
        dotenvy::dotenv().ok();

        Self {
            host: env_var_or("BEDSIDE_HOST", "0.0.0.0".to_string()),
            port: env_var_or("BEDSIDE_PORT", 3001),
            groq_api_key: env_var_or("GROQ_API_KEY", String::new()),
            groq_base_url: env_var_or(
                "GROQ_BASE_URL",
                "https://api.groq.com/openai/v1".to_string(),
            ),
            model: env_var_or("BEDSIDE_MODEL", "llama3-70b-8192".to_string()),
            completion_timeout: env_var_or("BEDSIDE_COMPLETION_TIMEOUT", 60),
            completion_stream: env_var_or("BEDSIDE_COMPLETION_STREAM", true),
            session_secret: env_var_or("BEDSIDE_SESSION_SECRET", String::new()),
            session_ttl: env_var_or("BEDSIDE_SESSION_TTL", 1800),
            public: env_var_or("BEDSIDE_PUBLIC", false),
            rate_limit_per_minute: env_var_or("BEDSIDE_RATE_LIMIT", 60),
            log_level: env_var_or("BEDSIDE_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<BedsideConfig> = Lazy::new(BedsideConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BedsideConfig::from_env();

        assert_eq!(config.model, "llama3-70b-8192");
        assert!(config.groq_base_url.starts_with("https://"));
        assert_eq!(config.rate_limit_per_minute, 60);
    }

    #[test]
    fn test_bind_address() {
        let mut config = BedsideConfig::from_env();
        config.host = "127.0.0.1".to_string();
        config.port = 8080;
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_env_var_or_strips_comments() {
        unsafe { std::env::set_var("BEDSIDE_TEST_PORT", "9090 # staging") };
        let parsed: u16 = env_var_or("BEDSIDE_TEST_PORT", 1);
        assert_eq!(parsed, 9090);
        unsafe { std::env::remove_var("BEDSIDE_TEST_PORT") };
    }
}
