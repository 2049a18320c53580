//! Interfaces to the remote pass store, plus an in-process implementation.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{PassError, Result, StoreError};
use crate::model::{PassData, PassRecord};

/// Asset filename to transport-encoded payload.
pub type EncodedAssets = BTreeMap<String, String>;

/// The remote record store.
#[async_trait]
pub trait PassStore: Send + Sync {
    async fn list(&self) -> Result<Vec<PassRecord>, StoreError>;

    async fn get(&self, serial: &str) -> Result<PassData, StoreError>;

    /// Replace the record and upload `assets` alongside it.
    async fn save(
        &self,
        serial: &str,
        pass: &PassData,
        assets: &EncodedAssets,
    ) -> Result<(), StoreError>;
}

/// The template asset catalogue shared by all passes.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn template_files(&self) -> Result<Vec<String>, StoreError>;
}

/// Binary to text encoding for asset upload. Must be deterministic and
/// reversible.
pub trait AssetEncoder: Send + Sync {
    fn encode(&self, bytes: &[u8]) -> String;

    fn decode(&self, text: &str) -> Result<Vec<u8>>;

    fn encode_all(&self, files: &BTreeMap<String, Vec<u8>>) -> EncodedAssets {
        files
            .iter()
            .map(|(name, bytes)| (name.clone(), self.encode(bytes)))
            .collect()
    }
}

/// Standard-alphabet, padded base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64AssetEncoder;

impl AssetEncoder for Base64AssetEncoder {
    fn encode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>> {
        STANDARD
            .decode(text)
            .map_err(|e| PassError::InvalidRecord(format!("asset payload is not base64: {e}")))
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    records: BTreeMap<String, PassRecord>,
    assets: HashMap<String, EncodedAssets>,
    templates: Vec<String>,
    failing_gets: HashSet<String>,
    failing_saves: HashSet<String>,
    save_log: Vec<String>,
}

/// A `PassStore` and `AssetStore` kept in memory.
///
/// Failures can be injected per serial, which makes it the store used by
/// the tests and by `pass-edit`.
#[derive(Debug, Default)]
pub struct MemoryPassStore {
    state: Mutex<MemoryState>,
}

impl MemoryPassStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, record: PassRecord) {
        self.state()
            .records
            .insert(record.serial_number.clone(), record);
    }

    /// Insert a bare record under `serial`.
    pub fn insert_pass(&self, serial: impl Into<String>, pass: PassData) {
        let serial = serial.into();
        self.insert(PassRecord {
            serial_number: serial,
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            status: None,
            pass_data: pass,
        });
    }

    pub fn set_templates<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state().templates = names.into_iter().map(Into::into).collect();
    }

    /// Make `get` on `serial` fail with a transport error.
    pub fn fail_get(&self, serial: impl Into<String>) {
        self.state().failing_gets.insert(serial.into());
    }

    /// Make `save` on `serial` fail with a transport error.
    pub fn fail_save(&self, serial: impl Into<String>) {
        self.state().failing_saves.insert(serial.into());
    }

    pub fn pass(&self, serial: &str) -> Option<PassData> {
        self.state()
            .records
            .get(serial)
            .map(|r| r.pass_data.clone())
    }

    pub fn assets(&self, serial: &str) -> Option<EncodedAssets> {
        self.state().assets.get(serial).cloned()
    }

    /// Serials of successful saves, in call order.
    pub fn saves(&self) -> Vec<String> {
        self.state().save_log.clone()
    }
}

#[async_trait]
impl PassStore for MemoryPassStore {
    async fn list(&self) -> Result<Vec<PassRecord>, StoreError> {
        Ok(self.state().records.values().cloned().collect())
    }

    async fn get(&self, serial: &str) -> Result<PassData, StoreError> {
        let state = self.state();
        if state.failing_gets.contains(serial) {
            return Err(StoreError::Transport(format!("GET {serial} failed")));
        }
        state
            .records
            .get(serial)
            .map(|r| r.pass_data.clone())
            .ok_or_else(|| StoreError::NotFound(serial.to_string()))
    }

    async fn save(
        &self,
        serial: &str,
        pass: &PassData,
        assets: &EncodedAssets,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        if state.failing_saves.contains(serial) {
            return Err(StoreError::Transport(format!("POST {serial} failed")));
        }
        let record = state
            .records
            .get_mut(serial)
            .ok_or_else(|| StoreError::NotFound(serial.to_string()))?;
        record.pass_data = pass.clone();
        if !assets.is_empty() {
            state
                .assets
                .entry(serial.to_string())
                .or_default()
                .extend(assets.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        state.save_log.push(serial.to_string());
        Ok(())
    }
}

#[async_trait]
impl AssetStore for MemoryPassStore {
    async fn template_files(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.state().templates.clone())
    }
}
