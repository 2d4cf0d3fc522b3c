// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::env;
use std::time::Duration;

/// Path value that selects a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub database_path: String,
    pub max_body_bytes: usize,
    /// Empty means every origin is allowed.
    pub cors_allowed_origins: Vec<String>,
    pub seed_on_start: bool,
    pub shutdown_drain: Duration,
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_path: "stockroom.sqlite".to_string(),
            max_body_bytes: 64 * 1024,
            cors_allowed_origins: Vec::new(),
            seed_on_start: false,
            shutdown_drain: Duration::from_millis(2000),
            log_json: true,
        }
    }
}

impl ApiConfig {
    /// Reads `STOCKROOM_*` variables, falling back to [`Default`] for any
    /// that are unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("STOCKROOM_BIND").unwrap_or(defaults.bind_addr),
            database_path: env::var("STOCKROOM_DATABASE_PATH")
                .unwrap_or(defaults.database_path),
            max_body_bytes: env_usize("STOCKROOM_MAX_BODY_BYTES", defaults.max_body_bytes),
            cors_allowed_origins: env_list("STOCKROOM_CORS_ALLOWED_ORIGINS"),
            seed_on_start: env_bool("STOCKROOM_SEED_ON_START", defaults.seed_on_start),
            shutdown_drain: Duration::from_millis(env_u64(
                "STOCKROOM_SHUTDOWN_DRAIN_MS",
                2000,
            )),
            log_json: env_bool("STOCKROOM_LOG_JSON", defaults.log_json),
        }
    }

    #[must_use]
    pub fn origin_allowed(&self, origin: &str) -> bool {
        self.cors_allowed_origins.is_empty()
            || self.cors_allowed_origins.iter().any(|x| x == origin)
    }
}

pub fn validate_startup_config(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    if api.database_path.trim().is_empty() {
        return Err("database path must not be empty".to_string());
    }
    api.bind_addr
        .parse::<std::net::SocketAddr>()
        .map_err(|e| format!("invalid bind addr {}: {e}", api.bind_addr))?;
    Ok(())
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_list(name: &str) -> Vec<String> {
    env::var(name)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
