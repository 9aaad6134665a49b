//! Server configuration
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML file, and command-line overrides.
//!
//! ```toml
//! workbook = "data/QR_V2.xlsx"
//! bind = "0.0.0.0:5001"
//! max_body_bytes = 2097152
//!
//! [sheets]
//! catalog = "Sheet1"
//! fields = "Sheet2"
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BIND: &str = "0.0.0.0:5001";
pub const DEFAULT_WORKBOOK: &str = "data/QR_V2.xlsx";
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Names of the two sheets the API reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetNames {
    /// Stress catalog (Stress, Type, Operation, Condition)
    pub catalog: String,
    /// Record header/metadata fields
    pub fields: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            catalog: "Sheet1".to_string(),
            fields: "Sheet2".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub workbook: PathBuf,
    pub bind: SocketAddr,
    pub sheets: SheetNames,
    pub max_body_bytes: usize,
}

/// On-disk shape of the config file; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    workbook: Option<PathBuf>,
    bind: Option<String>,
    sheets: Option<SheetNames>,
    max_body_bytes: Option<usize>,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub workbook: Option<PathBuf>,
    pub bind: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook: default_workbook_path(),
            bind: DEFAULT_BIND
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 5001))),
            sheets: SheetNames::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Config pointing at `workbook`, everything else default
    pub fn for_workbook(workbook: impl Into<PathBuf>) -> Self {
        Self {
            workbook: workbook.into(),
            ..Self::default()
        }
    }

    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and silently skipped when absent.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply(overrides)?;
        Ok(config)
    }

    /// Parse a TOML config file; relative workbook paths resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml(&raw, base)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    fn from_toml(raw: &str, base: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw).context("Failed to parse TOML")?;
        let mut config = Self::default();

        if let Some(workbook) = file.workbook {
            config.workbook = if workbook.is_relative() {
                base.join(workbook)
            } else {
                workbook
            };
        }
        if let Some(bind) = file.bind {
            config.bind = parse_bind(&bind)?;
        }
        if let Some(sheets) = file.sheets {
            config.sheets = sheets;
        }
        if let Some(limit) = file.max_body_bytes {
            config.max_body_bytes = limit;
        }

        Ok(config)
    }

    pub fn apply(&mut self, overrides: Overrides) -> Result<()> {
        if let Some(workbook) = overrides.workbook {
            self.workbook = workbook;
        }
        if let Some(bind) = overrides.bind {
            self.bind = parse_bind(&bind)?;
        }
        Ok(())
    }
}

fn parse_bind(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", raw))
}

/// `data/QR_V2.xlsx` next to the running executable
fn default_workbook_path() -> PathBuf {
    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(DEFAULT_WORKBOOK)
}

/// `~/.config/qrsheet/config.toml` (platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("qrsheet").join("config.toml"))
}
