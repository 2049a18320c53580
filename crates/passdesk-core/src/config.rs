//! Engine configuration, read from TOML.
//!
//! ```toml
//! [bulk]
//! concurrency = 1
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{PassError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulkConfig {
    /// Records in flight at once. `1` processes the selection strictly in
    /// order, one record at a time.
    pub concurrency: usize,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub bulk: BulkConfig,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| PassError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PassError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bulk.concurrency == 0 {
            return Err(PassError::Config("bulk.concurrency must be at least 1".into()));
        }
        Ok(())
    }
}
