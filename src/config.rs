//! Service configuration
//!
//! Read from an optional TOML file; every key has a default.
//!
//! ```toml
//! listen = "127.0.0.1:8787"
//! log = "production"
//!
//! [store]
//! kind = "directory"
//! path = "/var/lib/diffkeep"
//!
//! [render]
//! segment_policy = "exact"
//! length_policy = "reject"
//! ```

use crate::{
    logging::Profile,
    render::RenderOptions,
    store::{DiffStore, FileStore, MemoryStore, StoreError},
};
use serde::Deserialize;
use std::{
    env, fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

/// Environment variable overriding [`Config::listen`]
pub const LISTEN_ENV: &str = "DIFFKEEP_LISTEN";

const DEFAULT_LISTEN: ([u8; 4], u16) = ([127, 0, 0, 1], 8787);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid listen address '{value}' in {LISTEN_ENV}")]
    InvalidListen { value: String },
}

/// Where records are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum StoreConfig {
    /// In process memory, lost on exit
    #[default]
    Memory,
    /// One JSON file per record below `path`
    Directory { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen: SocketAddr,
    pub log: Profile,
    pub store: StoreConfig,
    pub render: RenderOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(DEFAULT_LISTEN),
            log: Profile::default(),
            store: StoreConfig::default(),
            render: RenderOptions::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load the configuration from `path`, or use the defaults when no path is given, then apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };

        if let Ok(value) = env::var(LISTEN_ENV) {
            config.listen = value
                .parse()
                .map_err(|_| ConfigError::InvalidListen { value })?;
        }

        Ok(config)
    }

    /// Open the configured store
    pub fn open_store(&self) -> Result<Box<dyn DiffStore>, StoreError> {
        match &self.store {
            StoreConfig::Memory => {
                info!("using in-memory store");
                Ok(Box::new(MemoryStore::new()))
            }
            StoreConfig::Directory { path } => {
                info!(path = %path.display(), "using directory store");
                Ok(Box::new(FileStore::open(path)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{LengthPolicy, SegmentPolicy};

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.listen.to_string(), "127.0.0.1:8787");
        assert_eq!(config.store, StoreConfig::Memory);
    }

    #[test]
    fn full_file() {
        let config = Config::from_toml_str(
            r#"
listen = "0.0.0.0:9000"
log = "production"

[store]
kind = "directory"
path = "/tmp/diffs"

[render]
segment_policy = "exact"
length_policy = "truncate"
"#,
        )
        .unwrap();

        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.log, Profile::Production);
        assert_eq!(
            config.store,
            StoreConfig::Directory {
                path: PathBuf::from("/tmp/diffs")
            }
        );
        assert_eq!(config.render.segment_policy, SegmentPolicy::Exact);
        assert_eq!(config.render.length_policy, LengthPolicy::Truncate);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("listen_port = 1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(Config::from_toml_str("[render]\nsegment_policy = \"fixed\"").is_err());
        assert!(Config::from_toml_str("[store]\nkind = \"redis\"").is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diffkeep.toml");
        fs::write(&path, "[render]\nlength_policy = \"reject\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.render.length_policy, LengthPolicy::Reject);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn open_directory_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store: StoreConfig::Directory {
                path: dir.path().join("records"),
            },
            ..Config::default()
        };

        config.open_store().unwrap();
        assert!(dir.path().join("records").is_dir());
    }
}
