// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and never
//! mutated afterwards. Rotating the JWT secret therefore requires a restart,
//! which deliberately invalidates every previously issued token.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Shared HMAC secret for token verification (>= 32 bytes) | Required |
//! | `TOKEN_TTL_SECS` | Token validity window agreed with the issuer | `86400` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Environment variable name for the shared JWT secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token validity window, in seconds.
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";

/// Environment variable name for the logging format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default token validity window: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

/// Minimum shared-secret length: 256 bits.
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration errors reported at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{JWT_SECRET_ENV} environment variable is not set")]
    MissingSecret,
    #[error("{JWT_SECRET_ENV} must be at least {MIN_SECRET_BYTES} bytes, got {0}")]
    SecretTooShort(usize),
    #[error("{0} is not a valid value for {1}")]
    InvalidNumber(String, &'static str),
}

/// Immutable runtime configuration.
pub struct Config {
    /// Shared HMAC secret. Never logged; `Debug` redacts it.
    pub jwt_secret: Vec<u8>,
    /// Token validity window agreed with the external issuer. The issuer
    /// mints `exp`; this value is informational on the verification side
    /// and is logged at startup for operators.
    pub token_ttl: Duration,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var(JWT_SECRET_ENV).ok(),
            env::var(TOKEN_TTL_ENV).ok(),
            env::var("HOST").ok(),
            env::var("PORT").ok(),
        )
    }

    fn from_values(
        secret: Option<String>,
        ttl: Option<String>,
        host: Option<String>,
        port: Option<String>,
    ) -> Result<Self, ConfigError> {
        let secret = secret.ok_or(ConfigError::MissingSecret)?;
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::SecretTooShort(secret.len()));
        }

        let token_ttl_secs = match ttl {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber(raw, TOKEN_TTL_ENV))?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let port = match port {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber(raw, "PORT"))?,
            None => 8080,
        };

        Ok(Self {
            jwt_secret: secret.into_bytes(),
            token_ttl: Duration::from_secs(token_ttl_secs),
            host: host.unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
