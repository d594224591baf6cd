use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

/// Password length policy. The bounds shifted across revisions of this
/// system, so they are configuration rather than contract.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordPolicy {
    pub min_len: usize,
    pub max_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub password: PasswordPolicy,
    /// Base URL of the logging collaborator; events are dropped when unset.
    pub logger_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        let password = PasswordPolicy {
            min_len: std::env::var("PASSWORD_MIN_LEN")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(5),
            max_len: std::env::var("PASSWORD_MAX_LEN")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(14),
        };
        let logger_url = std::env::var("LOGGER_URL").ok();
        Ok(Self {
            database_url,
            jwt,
            password,
            logger_url,
        })
    }
}
