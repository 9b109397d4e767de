use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use web_sys::Storage;

use super::error::StorageError;
use super::model::{FieldValue, FormModel};

/// Autosaved text values keyed by field name. Checkboxes are never part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Draft(BTreeMap<String, String>);

impl Draft {
    /// Reads a stored slot. Entries whose value is not a string are dropped
    /// one by one; only a slot that is not a JSON object fails as a whole.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        let entries: BTreeMap<String, Value> = serde_json::from_str(raw)?;
        let values = entries
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(text) => Some((name, text)),
                _ => None,
            })
            .collect();
        Ok(Self(values))
    }

    pub fn capture(model: &FormModel) -> Self {
        let values = model
            .names()
            .filter_map(|name| match model.value(name)? {
                FieldValue::Text(text) => Some((name.to_string(), text.clone())),
                FieldValue::Checked(_) => None,
            })
            .collect();
        Self(values)
    }

    /// Writes non-empty values into matching text fields. Returns how many
    /// fields were filled.
    pub fn apply(&self, model: &mut FormModel) -> usize {
        let mut restored = 0;
        for (name, text) in &self.0 {
            if text.is_empty() || model.text(name).is_none() {
                continue;
            }
            if model.set_text(name, text.clone()) {
                restored += 1;
            }
        }
        restored
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// The single durable draft slot.
pub trait DraftStore {
    fn load(&self) -> Result<Option<Draft>, StorageError>;
    fn save(&self, draft: &Draft) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory slot holding the serialized draft. Clones share the slot, which
/// lets a second form instance observe what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.slot.borrow_mut() = Some(raw.into());
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<Draft>, StorageError> {
        match self.slot.borrow().as_deref() {
            Some(raw) => Draft::from_json(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), StorageError> {
        let raw = serde_json::to_string(draft)?;
        *self.slot.borrow_mut() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// `window.localStorage` under a fixed key.
pub struct LocalStorageDraftStore {
    key: String,
}

impl LocalStorageDraftStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|e| StorageError::Access(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl DraftStore for LocalStorageDraftStore {
    fn load(&self) -> Result<Option<Draft>, StorageError> {
        let raw = self
            .storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))?;
        match raw {
            Some(raw) => Draft::from_json(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), StorageError> {
        let raw = serde_json::to_string(draft)?;
        self.storage()?
            .set_item(&self.key, &raw)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }
}
