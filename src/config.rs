use serde::Deserialize;
use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_SYNTHETIC_PREFIX: &str = "$";
pub const DEFAULT_FILLER: char = '_';

/// Naming rules shared by an environment and the offline template generator.
///
/// Both sides must agree on these values, otherwise derived cache keys will
/// not match the keys of the template table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenConfig {
    pub synthetic_prefix: String,
    pub filler: char,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {error}", path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        path: PathBuf,
        message: String,
        text: String,
        span: Option<Range<usize>>,
    },
    #[error("Invalid codegen config: {message}")]
    Invalid { message: String },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    synthetic_prefix: Option<String>,
    filler: Option<char>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            synthetic_prefix: DEFAULT_SYNTHETIC_PREFIX.to_string(),
            filler: DEFAULT_FILLER,
        }
    }
}

impl CodegenConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(&content, path)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, Path::new("<inline>"))
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: error.message().to_string(),
            text: text.to_string(),
            span: error.span(),
        })?;
        let defaults = Self::default();
        let config = Self {
            synthetic_prefix: raw.synthetic_prefix.unwrap_or(defaults.synthetic_prefix),
            filler: raw.filler.unwrap_or(defaults.filler),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.synthetic_prefix;
        if prefix.is_empty() {
            return Err(ConfigError::Invalid {
                message: "synthetic_prefix must not be empty".into(),
            });
        }
        if let Some(bad) = prefix
            .chars()
            .find(|c| c.is_ascii_digit() || c.is_whitespace() || *c == ',')
        {
            return Err(ConfigError::Invalid {
                message: format!("synthetic_prefix `{prefix}` contains reserved character {bad:?}"),
            });
        }
        if self.filler.is_whitespace() || self.filler == ',' {
            return Err(ConfigError::Invalid {
                message: format!("filler {:?} cannot be used in link names", self.filler),
            });
        }
        Ok(())
    }
}
