use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "contacts.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Contents of `contactql.toml`; every key is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ContactqlConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Allowed CORS origins. Empty or `"*"` allows any origin.
    pub cors_origins: Vec<String>,
    pub graphiql: Option<bool>,
    pub strict_ids: Option<bool>,
}

/// Fully resolved settings the server runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub database: PathBuf,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub graphiql: bool,
    pub strict_ids: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
            graphiql: true,
            strict_ids: false,
        }
    }
}

/// Values given on the command line (or their environment variables)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ServerSettings {
    /// Layer defaults, then the config file, then overrides
    pub fn resolve(config: Option<&ContactqlConfig>, overrides: Overrides) -> Self {
        let mut settings = Self::default();

        if let Some(config) = config {
            if let Some(db) = &config.database {
                settings.database = PathBuf::from(db);
            }
            if let Some(host) = &config.host {
                settings.host = host.clone();
            }
            if let Some(port) = config.port {
                settings.port = port;
            }
            settings.cors_origins = config.cors_origins.clone();
            if let Some(graphiql) = config.graphiql {
                settings.graphiql = graphiql;
            }
            if let Some(strict) = config.strict_ids {
                settings.strict_ids = strict;
            }
        }

        if let Some(db) = overrides.database {
            settings.database = db;
        }
        if let Some(host) = overrides.host {
            settings.host = host;
        }
        if let Some(port) = overrides.port {
            settings.port = port;
        }

        settings
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {}:{}: {}", self.host, self.port, e))?;
        Ok(addr)
    }

    /// True when CORS should allow any origin
    pub fn cors_is_permissive(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("contactql.toml")
}

/// Read the config file; a missing file is not an error
pub fn load_config(path: Option<&Path>) -> crate::Result<Option<ContactqlConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let config = toml::from_str::<ContactqlConfig>(&contents)
        .map_err(|source| crate::Error::Config { path: path.clone(), source })?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

/// Config written by `contactql init`, with every default spelled out
pub fn starter_config() -> ContactqlConfig {
    ContactqlConfig {
        database: Some(DEFAULT_DATABASE.to_string()),
        host: Some(DEFAULT_HOST.to_string()),
        port: Some(DEFAULT_PORT),
        cors_origins: vec!["*".to_string()],
        graphiql: Some(true),
        strict_ids: Some(false),
    }
}

/// Write `config` to `path`, refusing to clobber an existing file unless `force`
pub fn write_config(path: &Path, config: &ContactqlConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config).context("serializing config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("writing config to {}", path.display()))?;
    Ok(())
}

/// Create the directory the database file lives in
pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("creating database directory {}", parent.display()))
}
