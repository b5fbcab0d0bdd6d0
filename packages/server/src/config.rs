use anyhow::{Context, Result};
use dotenvy::dotenv;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub classifier: ClassifierConfig,
}

/// Connection parameters for the assessment database.
///
/// Either a full `DATABASE_URL` or the libpq-style `PG*` variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

/// Which classification backend the assessment engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    Stub,
    OpenAi,
}

impl FromStr for ClassifierBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "stub" => Ok(ClassifierBackend::Stub),
            "openai" => Ok(ClassifierBackend::OpenAi),
            other => Err(anyhow::anyhow!("Invalid classifier backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub backend: ClassifierBackend,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::Stub,
            openai_api_key: None,
            openai_model: "gpt-4o".to_string(),
            openai_base_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database: DatabaseConfig::from_env()?,
            classifier: ClassifierConfig::from_env()?,
        })
    }
}

/// Read an optional variable, treating a blank value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = non_empty_var("DATABASE_URL");

        // PG* variables are only mandatory when no URL is given
        let required = |name: &str| -> Result<String> {
            match (&url, env::var(name)) {
                (_, Ok(value)) => Ok(value),
                (Some(_), Err(_)) => Ok(String::new()),
                (None, Err(_)) => Err(anyhow::anyhow!("{} must be set", name)),
            }
        };

        Ok(Self {
            host: required("PGHOST")?,
            port: env::var("PGPORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .context("PGPORT must be a valid number")?,
            user: required("PGUSER")?,
            password: env::var("PGPASSWORD").unwrap_or_default(),
            database: required("PGDATABASE")?,
            ssl_mode: env::var("PGSSLMODE").unwrap_or_else(|_| "require".to_string()),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            url,
        })
    }

    /// Build sqlx connect options. `DATABASE_URL` wins over the PG* fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).context("DATABASE_URL is not a valid URL");
        }

        let ssl_mode = PgSslMode::from_str(&self.ssl_mode)
            .with_context(|| format!("Invalid PGSSLMODE: {}", self.ssl_mode))?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(ssl_mode))
    }
}

impl ClassifierConfig {
    pub fn from_env() -> Result<Self> {
        let backend: ClassifierBackend = env::var("CLASSIFIER_BACKEND")
            .unwrap_or_default()
            .parse()?;
        let openai_api_key = non_empty_var("OPENAI_API_KEY");

        if backend == ClassifierBackend::OpenAi && openai_api_key.is_none() {
            anyhow::bail!("OPENAI_API_KEY must be set when CLASSIFIER_BACKEND=openai");
        }

        Ok(Self {
            backend,
            openai_api_key,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_base_url: non_empty_var("OPENAI_BASE_URL"),
        })
    }
}
