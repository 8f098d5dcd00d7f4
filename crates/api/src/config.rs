use std::time::Duration;

use ambiental_core::auth::AuthStrategy;
use ambiental_core::debounce::DEFAULT_DEBOUNCE;

use crate::auth::jwt::JwtConfig;

/// Where case records are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Supabase / PostgREST over HTTP.
    Rest { url: String, api_key: String },
    /// Direct Postgres connection (migrations are applied at startup).
    Postgres { database_url: String },
    /// Process-local tables; contents are lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Rest { .. } => "rest",
            StoreBackend::Postgres { .. } => "postgres",
            StoreBackend::Memory => "memory",
        }
    }

    /// Resolve the backend from `STORE_BACKEND` and its companion variables.
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend name or a missing companion variable.
    fn from_env() -> Self {
        let backend = std::env::var("STORE_BACKEND").unwrap_or_else(|_| "rest".into());
        match backend.trim().to_lowercase().as_str() {
            "rest" | "supabase" => StoreBackend::Rest {
                url: std::env::var("SUPABASE_URL")
                    .expect("SUPABASE_URL must be set when STORE_BACKEND=rest"),
                api_key: std::env::var("SUPABASE_KEY")
                    .expect("SUPABASE_KEY must be set when STORE_BACKEND=rest"),
            },
            "postgres" | "pg" => StoreBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when STORE_BACKEND=postgres"),
            },
            "memory" => StoreBackend::Memory,
            other => panic!("Unknown STORE_BACKEND '{other}'. Must be one of: rest, postgres, memory"),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret and the store credentials have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub store: StoreBackend,
    /// Which credential source handles logins.
    pub auth_provider: AuthStrategy,
    /// Raw `AUTH_STATIC_USERS` value, parsed by the static provider.
    pub static_users: String,
    /// Quiet period clients should wait before applying a search.
    pub search_debounce: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_BACKEND`        | `rest`                     |
    /// | `AUTH_PROVIDER`        | `static`                   |
    /// | `AUTH_STATIC_USERS`    | empty                      |
    /// | `SEARCH_DEBOUNCE_MS`   | `300`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let auth_provider: AuthStrategy = std::env::var("AUTH_PROVIDER")
            .unwrap_or_else(|_| "static".into())
            .parse()
            .unwrap_or_else(|e| panic!("{e}"));

        let search_debounce = std::env::var("SEARCH_DEBOUNCE_MS")
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .expect("SEARCH_DEBOUNCE_MS must be a valid u64")
            })
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            store: StoreBackend::from_env(),
            auth_provider,
            static_users: std::env::var("AUTH_STATIC_USERS").unwrap_or_default(),
            search_debounce,
        }
    }
}
