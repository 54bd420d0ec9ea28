//! Loan configuration catalog.
//!
//! A [`Catalog`] is an immutable, ordered snapshot of [`LoanConfig`] entries
//! keyed by `loan_type`. Mutations (`upsert`, `remove`) return a new snapshot
//! and leave the receiver untouched, so readers holding a clone keep seeing
//! the state they started with. Persistence goes through a [`ConfigStore`].

pub mod config;
pub mod defaults;
pub mod store;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

pub use config::{LoanConfig, MAX_TERM_YEARS};
pub use defaults::{default_configs, DEFAULT_LOAN_TYPES};
pub use store::{ConfigStore, JsonFileConfigStore, MemoryConfigStore};

use crate::error::LoanCalcError;
use crate::LoanCalcResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Arc<Vec<LoanConfig>>,
}

impl Catalog {
    /// The compiled-in five-product catalog.
    pub fn defaults() -> Self {
        Self {
            entries: Arc::new(default_configs()),
        }
    }

    /// Build a catalog from explicit entries.
    ///
    /// Fails when the list is empty, any entry is invalid, or a loan type
    /// appears twice.
    pub fn from_configs(configs: Vec<LoanConfig>) -> LoanCalcResult<Self> {
        if configs.is_empty() {
            return Err(LoanCalcError::InvalidInput {
                field: "catalog".into(),
                reason: "catalog must contain at least one loan type".into(),
            });
        }
        let mut seen = HashSet::with_capacity(configs.len());
        for cfg in &configs {
            cfg.validate()?;
            if !seen.insert(cfg.loan_type.as_str()) {
                return Err(LoanCalcError::InvalidConfig {
                    loan_type: cfg.loan_type.clone(),
                    reason: "duplicate loan type".into(),
                });
            }
        }
        Ok(Self {
            entries: Arc::new(configs),
        })
    }

    /// Load from an optional store, falling back to [`Catalog::defaults`].
    ///
    /// Never fails: a missing store, an empty store, a read error or a
    /// malformed document all yield the defaults.
    pub fn load(source: Option<&dyn ConfigStore>) -> Self {
        let Some(store) = source else {
            debug!("no configuration store, using default loan catalog");
            return Self::defaults();
        };

        match store.read_all() {
            Ok(Some(configs)) => match Self::from_configs(configs) {
                Ok(catalog) => {
                    debug!(count = catalog.len(), "loaded loan catalog from store");
                    catalog
                }
                Err(e) => {
                    warn!(error = %e, "stored loan catalog is malformed, using defaults");
                    Self::defaults()
                }
            },
            Ok(None) => {
                debug!("configuration store is empty, using default loan catalog");
                Self::defaults()
            }
            Err(e) => {
                warn!(error = %e, "configuration store unavailable, using defaults");
                Self::defaults()
            }
        }
    }

    /// Write every entry through the store.
    pub fn save(&self, store: &mut dyn ConfigStore) -> LoanCalcResult<()> {
        store.write_all(&self.entries)
    }

    pub fn get(&self, loan_type: &str) -> Option<&LoanConfig> {
        self.entries.iter().find(|c| c.loan_type == loan_type)
    }

    /// Like [`Catalog::get`] but reports an unknown loan type as an error.
    pub fn require(&self, loan_type: &str) -> LoanCalcResult<&LoanConfig> {
        self.get(loan_type)
            .ok_or_else(|| LoanCalcError::ConfigNotFound {
                loan_type: loan_type.to_string(),
            })
    }

    /// Insert or replace the entry keyed by `config.loan_type`.
    ///
    /// Replacement keeps the entry's position; new entries go last.
    pub fn upsert(&self, config: LoanConfig) -> LoanCalcResult<Self> {
        config.validate()?;
        let mut entries = self.entries.as_ref().clone();
        match entries.iter_mut().find(|c| c.loan_type == config.loan_type) {
            Some(existing) => *existing = config,
            None => entries.push(config),
        }
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    /// Drop the entry for `loan_type`. Removing an absent key is a no-op.
    pub fn remove(&self, loan_type: &str) -> Self {
        if self.get(loan_type).is_none() {
            return self.clone();
        }
        let entries: Vec<LoanConfig> = self
            .entries
            .iter()
            .filter(|c| c.loan_type != loan_type)
            .cloned()
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoanConfig> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[LoanConfig] {
        &self.entries
    }

    pub fn loan_types(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.loan_type.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::defaults()
    }
}
