//! Environment configuration
//!
//! Runtime configuration read from environment variables, with
//! development-friendly defaults.

use std::env;

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Home currency assigned to prices created without an explicit one
    pub default_currency: String,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            default_currency: env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "PLN".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

impl EnvironmentConfig {
    /// Whether we are running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Bind address of the server
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
