use std::env;
use tracing::warn;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bind_address: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            jwt_secret: env::var("MEDTRACK_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("MEDTRACK_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            token_ttl_hours: env::var("MEDTRACK_TOKEN_TTL_HOURS")
                .ok()
                .and_then(|v| match v.parse::<i64>() {
                    Ok(hours) if hours > 0 => Some(hours),
                    _ => {
                        warn!("MEDTRACK_TOKEN_TTL_HOURS is not a positive integer: {}", v);
                        None
                    }
                })
                .unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            bind_address: env::var("MEDTRACK_BIND_ADDRESS")
                .unwrap_or_else(|_| {
                    warn!("MEDTRACK_BIND_ADDRESS not set, using default");
                    DEFAULT_BIND_ADDRESS.to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.jwt_secret.is_empty()
    }
}
