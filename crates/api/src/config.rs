use crate::auth::jwt::JwtConfig;

/// Startup configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("incomplete database config: need DATABASE_URL or DB_HOST, DB_USER, DB_PASSWORD, DB_NAME")]
    IncompleteDatabase,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret and database location have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`DatabaseConfig::from_env`] for the rest.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 8080)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 10)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_vars(&var)?,
            database: DatabaseConfig::from_vars(&var)?,
        })
    }
}

/// Where the database lives and how many connections to open.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Pool size (default: `20`).
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// `DATABASE_URL` wins when set. Otherwise the URL is assembled from
    /// `DB_HOST`, `DB_PORT` (5432), `DB_USER`, `DB_PASSWORD`, `DB_NAME` and
    /// `DB_SSL` (disable), plus `sslrootcert` when `DB_SSL_ROOT_CERT` is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 20)?;

        let url = match var("DATABASE_URL").filter(|s| !s.is_empty()) {
            Some(url) => url,
            None => assemble_database_url(&var)?,
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}

fn assemble_database_url<F>(var: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &str| var(name).filter(|s| !s.is_empty());
    let (Some(host), Some(user), Some(password), Some(name)) = (
        required("DB_HOST"),
        required("DB_USER"),
        required("DB_PASSWORD"),
        required("DB_NAME"),
    ) else {
        return Err(ConfigError::IncompleteDatabase);
    };
    let port = required("DB_PORT").unwrap_or_else(|| "5432".into());
    let ssl_mode = required("DB_SSL").unwrap_or_else(|| "disable".into());

    let mut url = format!(
        "postgres://{}:{}@{host}:{port}/{name}?sslmode={ssl_mode}",
        urlencoding::encode(&user),
        urlencoding::encode(&password),
    );
    if let Some(root_cert) = required("DB_SSL_ROOT_CERT") {
        url.push_str("&sslrootcert=");
        url.push_str(&urlencoding::encode(&root_cert));
    }
    Ok(url)
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

/// Parse a duration such as `24h`, `90m`, `3600s` or `1h30m`.
///
/// Returns `None` for anything else, including a bare number, and for totals
/// that do not fit in `i64` nanoseconds (about 292 years).
pub fn parse_duration(input: &str) -> Option<chrono::Duration> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut total = chrono::Duration::zero();
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        let amount: i64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "h" => chrono::Duration::try_hours(amount)?,
            "m" => chrono::Duration::try_minutes(amount)?,
            "s" => chrono::Duration::try_seconds(amount)?,
            "ms" => chrono::Duration::try_milliseconds(amount)?,
            _ => return None,
        };
        total = total.checked_add(&part)?;
        rest = &rest[unit_len..];
    }
    total.num_nanoseconds()?;
    Some(total)
}
