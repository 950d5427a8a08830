use anyhow::bail;
use anyhow::Context;
use anyhow::Result;

/// Process configuration, read once from the environment.
///
/// Schema and table names end up interpolated into SQL text, so they are
/// validated against the identifier allowlist here, at load time.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    pub schema: String,
    pub table: String,
    pub http: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: var("DB_HOST", "localhost"),
            port: var("DB_PORT", "5432")
                .parse()
                .context("DB_PORT must be a port number")?,
            user: var("DB_USER", "postgres"),
            password: std::env::var("DB_PASS").ok(),
            database: identifier(var("DB_NAME", "mangroves"))?,
            schema: identifier(var("DB_SCHEMA", "farm_inventory"))?,
            table: identifier(var("DB_TABLE", "farms"))?,
            http: var("HTTP_ADDR", "127.0.0.1:8080"),
        })
    }

    /// Schema-qualified table name for SQL text.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }
}

fn var(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Accept only unquoted lowercase SQL identifiers. Anything else is a
/// configuration error, never something to escape at query time.
fn identifier(value: String) -> Result<String> {
    let mut chars = value.chars();
    let head = match chars.next() {
        Some(c) => c,
        None => bail!("empty SQL identifier"),
    };
    if value.len() > 63 {
        bail!("SQL identifier too long: {}", value);
    }
    if !(head.is_ascii_lowercase() || head == '_') {
        bail!("invalid SQL identifier: {}", value);
    }
    if chars.any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')) {
        bail!("invalid SQL identifier: {}", value);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_accepts_plain_names() {
        assert!(identifier("farm_inventory".to_string()).is_ok());
        assert!(identifier("_farms2".to_string()).is_ok());
    }

    #[test]
    fn identifier_rejects_injection() {
        assert!(identifier("farms; DROP TABLE farms".to_string()).is_err());
        assert!(identifier("farms\"".to_string()).is_err());
        assert!(identifier("Farms".to_string()).is_err());
        assert!(identifier("2farms".to_string()).is_err());
        assert!(identifier(String::new()).is_err());
    }

    #[test]
    fn identifier_rejects_overlong_names() {
        assert!(identifier("f".repeat(63)).is_ok());
        assert!(identifier("f".repeat(64)).is_err());
    }
}
