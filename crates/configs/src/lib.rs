use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Log every statement (`DB_DEBUG_ENABLE`).
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 5 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Bounds applied by the data-access layer to every query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_query_timeout")]
    pub default_timeout_secs: u64,
    #[serde(default = "default_extended_timeout")]
    pub extended_timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

fn default_query_timeout() -> u64 { 60 }
fn default_extended_timeout() -> u64 { 120 }
fn default_page_size() -> u64 { 30 }
fn default_max_page_size() -> u64 { 1000 }

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: default_query_timeout(),
            extended_timeout_secs: default_extended_timeout(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise defaults; env overrides apply either way.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.query.apply_env();
        self.query.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        if let Ok(flag) = std::env::var("DB_DEBUG_ENABLE") {
            self.sqlx_logging = parse_flag(&flag);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl QueryConfig {
    /// Apply `QUERY_TIMEOUT_SECS`, `QUERY_TIMEOUT_EXTENDED_SECS`, `DEFAULT_PAGE_SIZE`, `MAX_PAGE_SIZE`.
    pub fn apply_env(&mut self) {
        let read = |key: &str| std::env::var(key).ok().and_then(|v| v.trim().parse::<u64>().ok());
        if let Some(v) = read("QUERY_TIMEOUT_SECS") { self.default_timeout_secs = v; }
        if let Some(v) = read("QUERY_TIMEOUT_EXTENDED_SECS") { self.extended_timeout_secs = v; }
        if let Some(v) = read("DEFAULT_PAGE_SIZE") { self.default_page_size = v; }
        if let Some(v) = read("MAX_PAGE_SIZE") { self.max_page_size = v; }
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_timeout_secs == 0 || self.extended_timeout_secs == 0 {
            return Err(anyhow!("query timeouts must be positive seconds"));
        }
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(anyhow!("query page sizes must be >= 1"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(anyhow!("query.default_page_size must be <= max_page_size"));
        }
        Ok(())
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_section_defaults_when_missing() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            url = "postgres://localhost/parking"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.query.default_timeout_secs, 60);
        assert_eq!(cfg.query.extended_timeout_secs, 120);
        assert_eq!(cfg.query.default_page_size, 30);
        assert_eq!(cfg.query.max_page_size, 1000);
        assert_eq!(cfg.database.max_connections, 10);
    }

    #[test]
    fn query_section_partial_override() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [query]
            default_page_size = 50
            "#,
        )
        .unwrap();
        assert_eq!(cfg.query.default_page_size, 50);
        assert_eq!(cfg.query.max_page_size, 1000);
    }

    #[test]
    fn query_validation_rejects_inverted_page_sizes() {
        let q = QueryConfig { default_page_size: 2000, ..QueryConfig::default() };
        assert!(q.validate().is_err());
        let q = QueryConfig { default_timeout_secs: 0, ..QueryConfig::default() };
        assert!(q.validate().is_err());
        assert!(QueryConfig::default().validate().is_ok());
    }

    #[test]
    fn database_validation_checks_scheme_and_pool() {
        let mut db = DatabaseConfig {
            url: "mysql://localhost/parking".into(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 5,
            idle_timeout_secs: 600,
            max_lifetime_secs: 3600,
            acquire_timeout_secs: 30,
            sqlx_logging: false,
        };
        assert!(db.validate().is_err());
        db.url = "postgres://localhost/parking".into();
        assert!(db.validate().is_ok());
        db.min_connections = 20;
        assert!(db.validate().is_err());
    }

    #[test]
    fn debug_flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
