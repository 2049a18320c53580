//! Applying one override set across many pass records.
//!
//! Each record goes through fetch, merge and save on its own. A failure is
//! attributed to the record's serial and the run moves on; callers only see
//! the final [`BulkResult`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use indexmap::IndexSet;
use tracing::{info, warn};

use crate::config::BulkConfig;
use crate::error::{PassError, Result};
use crate::layout::Seating;
use crate::model::PassData;
use crate::overrides::OverrideSet;
use crate::session::RecordEditSession;
use crate::store::{AssetEncoder, AssetStore, Base64AssetEncoder, EncodedAssets, PassStore};

/// A record that could not be updated.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkFailure {
    pub serial: String,
    pub error: PassError,
}

/// Outcome of a bulk run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkResult {
    pub succeeded: usize,
    pub failed: usize,
    /// Serials saved, in selection order.
    pub saved: Vec<String>,
    /// Failures, in selection order.
    pub failures: Vec<BulkFailure>,
}

impl BulkResult {
    fn record(&mut self, serial: String, outcome: Result<PassData>) {
        match outcome {
            Ok(_) => {
                self.succeeded += 1;
                self.saved.push(serial);
            }
            Err(error) => {
                self.failed += 1;
                self.failures.push(BulkFailure { serial, error });
            }
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn error_for(&self, serial: &str) -> Option<&PassError> {
        self.failures
            .iter()
            .find(|f| f.serial == serial)
            .map(|f| &f.error)
    }
}

impl fmt::Display for BulkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} succeeded, {} failed", self.succeeded, self.failed)?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.serial, failure.error)?;
        }
        Ok(())
    }
}

/// How the asset overrides relate to the template catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPlan {
    /// Files that replace a template asset.
    pub replaced: Vec<String>,
    /// Files the template does not have.
    pub added: Vec<String>,
}

/// Split the asset overrides into template replacements and new files.
pub async fn plan_assets(store: &dyn AssetStore, overrides: &OverrideSet) -> Result<AssetPlan> {
    let templates: HashSet<String> = store.template_files().await?.into_iter().collect();
    let mut plan = AssetPlan::default();
    for name in overrides.assets().keys() {
        if templates.contains(name) {
            plan.replaced.push(name.clone());
        } else {
            plan.added.push(name.clone());
        }
    }
    Ok(plan)
}

pub struct BulkMutationEngine {
    store: Arc<dyn PassStore>,
    encoder: Arc<dyn AssetEncoder>,
    config: BulkConfig,
}

impl BulkMutationEngine {
    pub fn new(store: Arc<dyn PassStore>) -> Self {
        Self {
            store,
            encoder: Arc::new(Base64AssetEncoder),
            config: BulkConfig::default(),
        }
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn AssetEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_config(mut self, config: BulkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BulkConfig {
        &self.config
    }

    /// Apply `overrides` to every serial in `serials`.
    ///
    /// Duplicate serials are processed once. Results are reported in
    /// selection order whatever the configured concurrency.
    pub async fn run<I, S>(&self, serials: I, overrides: &OverrideSet) -> BulkResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let serials: IndexSet<String> = serials.into_iter().map(Into::into).collect();
        let assets = self.encoder.encode_all(overrides.assets());
        info!(
            records = serials.len(),
            fields = overrides.effective_fields().count(),
            assets = assets.len(),
            "bulk run started"
        );

        let assets = &assets;
        let outcomes: Vec<(String, Result<PassData>)> = stream::iter(serials)
            .map(|serial| async move {
                let outcome = self.process(&serial, overrides, assets).await;
                (serial, outcome)
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut result = BulkResult::default();
        for (serial, outcome) in outcomes {
            match &outcome {
                Ok(_) => info!(serial = %serial, "pass updated"),
                Err(e) => warn!(serial = %serial, error = %e, "pass update failed"),
            }
            result.record(serial, outcome);
        }
        info!(
            succeeded = result.succeeded,
            failed = result.failed,
            "bulk run finished"
        );
        result
    }

    async fn process(
        &self,
        serial: &str,
        overrides: &OverrideSet,
        assets: &EncodedAssets,
    ) -> Result<PassData> {
        let mut session = RecordEditSession::load(self.store.as_ref(), serial).await?;
        for (path, value) in overrides.effective_fields() {
            session.mutate_path(path, value.clone())?;
        }
        let aux = session.snapshot().auxiliary_fields()?;
        let seating = Seating::detect(&aux).ok_or(PassError::VariantMismatch { count: aux.len() })?;
        session.save(self.store.as_ref(), &seating, assets).await
    }
}
