use std::str::FromStr;

/// Which document store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// A MongoDB deployment reached through `MONGODB_URI`.
    Mongo,
    /// The in-process store; data lives only as long as the server.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown store backend '{other}', expected 'mongodb' or 'memory'"
            )),
        }
    }
}

/// Document store settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Connection string (ignored by the memory backend).
    pub uri: String,
    /// Database name holding the `photos` and `music` collections.
    pub name: String,
    /// Connect, server-selection and per-operation timeout in seconds.
    pub timeout_secs: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Whole-request timeout in seconds. Defaults to
    /// [`default_request_timeout`] of the database timeout.
    pub request_timeout_secs: u64,
    /// Insert the sample catalogs into empty collections at startup.
    pub seed_sample_data: bool,
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `HOST`                 | `0.0.0.0`                    |
    /// | `PORT`                 | `3000`                       |
    /// | `REQUEST_TIMEOUT_SECS` | 4 x `DB_TIMEOUT_SECS`        |
    /// | `SEED_SAMPLE_DATA`     | `false`                      |
    /// | `STORE_BACKEND`        | `mongodb`                    |
    /// | `MONGODB_URI`          | `mongodb://localhost:27017`  |
    /// | `DB_NAME`              | `petal`                      |
    /// | `DB_TIMEOUT_SECS`      | `30`                         |
    ///
    /// Every value goes through [`unwrap_env_value`] first.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let seed_sample_data = parse_flag(&env_or("SEED_SAMPLE_DATA", "false"));

        let backend: StoreBackend = env_or("STORE_BACKEND", "mongodb")
            .parse()
            .unwrap_or_else(|e| panic!("STORE_BACKEND: {e}"));

        let timeout_secs: u64 = env_or("DB_TIMEOUT_SECS", "30")
            .parse()
            .expect("DB_TIMEOUT_SECS must be a valid u64");

        let request_timeout_secs: u64 = env_or(
            "REQUEST_TIMEOUT_SECS",
            &default_request_timeout(timeout_secs).to_string(),
        )
        .parse()
        .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database = DatabaseConfig {
            backend,
            uri: env_or("MONGODB_URI", "mongodb://localhost:27017"),
            name: env_or("DB_NAME", "petal"),
            timeout_secs,
        };

        Self {
            host,
            port,
            request_timeout_secs,
            seed_sample_data,
            database,
        }
    }
}

/// Request timeout that never cuts off a database call still inside its
/// own budget: connect, ping, the operation and close are each bounded by
/// `db_timeout_secs`.
pub fn default_request_timeout(db_timeout_secs: u64) -> u64 {
    db_timeout_secs.saturating_mul(4)
}

/// Read `key`, unwrap it, and fall back to `default` when unset or blank.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|raw| unwrap_env_value(&raw))
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Strip the `Key: NAME Value: ...` wrapper some hosting platforms put
/// around environment values, plus surrounding whitespace and one pair of
/// matching quotes.
///
/// Values without the wrapper are only trimmed.
pub fn unwrap_env_value(raw: &str) -> String {
    let trimmed = raw.trim();
    let inner = if trimmed.starts_with("Key:") || trimmed.starts_with("Value:") {
        match trimmed.rfind("Value:") {
            Some(pos) => &trimmed[pos + "Value:".len()..],
            None => "",
        }
    } else {
        trimmed
    };
    strip_quotes(inner.trim()).to_string()
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_is_trimmed() {
        assert_eq!(
            unwrap_env_value("  mongodb://localhost:27017\n"),
            "mongodb://localhost:27017"
        );
    }

    #[test]
    fn key_value_wrapper_is_stripped() {
        let raw = "Key: MONGODB_URI\nValue: mongodb+srv://user:pw@cluster0.example.net/?retryWrites=true";
        assert_eq!(
            unwrap_env_value(raw),
            "mongodb+srv://user:pw@cluster0.example.net/?retryWrites=true"
        );
    }

    #[test]
    fn single_line_wrapper_with_quotes() {
        assert_eq!(unwrap_env_value("Key: DB_NAME Value: \"petal\""), "petal");
    }

    #[test]
    fn bare_value_prefix() {
        assert_eq!(unwrap_env_value("Value: 8080"), "8080");
    }

    #[test]
    fn key_without_value_is_empty() {
        assert_eq!(unwrap_env_value("Key: PORT"), "");
    }

    #[test]
    fn colons_inside_plain_values_survive() {
        assert_eq!(unwrap_env_value("'http://a:b@c'"), "http://a:b@c");
    }

    #[test]
    fn store_backend_parses_case_insensitively() {
        assert_eq!("MongoDB".parse::<StoreBackend>(), Ok(StoreBackend::Mongo));
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn request_timeout_outlasts_database_operations() {
        assert_eq!(default_request_timeout(30), 120);
        assert!(default_request_timeout(5) > 3 * 5);
    }

    #[test]
    fn flags() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
