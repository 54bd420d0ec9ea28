//! Persistence seam for the catalog: read-all / write-all key-value documents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::config::LoanConfig;
use crate::error::LoanCalcError;
use crate::LoanCalcResult;

/// External configuration store.
///
/// `read_all` returns `Ok(None)` when nothing has been stored yet; callers
/// treat that the same as an unusable document.
pub trait ConfigStore {
    fn read_all(&self) -> LoanCalcResult<Option<Vec<LoanConfig>>>;
    fn write_all(&mut self, configs: &[LoanConfig]) -> LoanCalcResult<()>;
}

/// In-process store, used by tests and by embedders that keep state elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    configs: Option<Vec<LoanConfig>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configs(configs: Vec<LoanConfig>) -> Self {
        Self {
            configs: Some(configs),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn read_all(&self) -> LoanCalcResult<Option<Vec<LoanConfig>>> {
        Ok(self.configs.clone())
    }

    fn write_all(&mut self, configs: &[LoanConfig]) -> LoanCalcResult<()> {
        self.configs = Some(configs.to_vec());
        Ok(())
    }
}

/// A JSON array of loan configs on disk.
#[derive(Debug, Clone)]
pub struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn read_all(&self) -> LoanCalcResult<Option<Vec<LoanConfig>>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "catalog file not found");
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            LoanCalcError::Store(format!("Failed to read '{}': {}", self.path.display(), e))
        })?;
        let configs: Vec<LoanConfig> = serde_json::from_str(&contents).map_err(|e| {
            LoanCalcError::Store(format!("Failed to parse '{}': {}", self.path.display(), e))
        })?;
        Ok(Some(configs))
    }

    fn write_all(&mut self, configs: &[LoanConfig]) -> LoanCalcResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(configs)?;
        // Write beside the target then rename so readers never see half a file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        debug!(path = %self.path.display(), count = configs.len(), "catalog written");
        Ok(())
    }
}
