//! Widget-data persistence.
//!
//! Features store their state as one opaque JSON document per
//! `(member, widget)` pair. The document's shape is owned entirely by the
//! feature that writes it; this crate only moves values in and out.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Opaque get/set persistence keyed by member and widget name.
///
/// A missing document is `None`, never an error; callers decide what an
/// empty document means for them.
pub trait WidgetStore {
    fn get_widget_data(&self, member_id: &str, widget: &str)
        -> Result<Option<Value>, StorageError>;

    fn set_widget_data(
        &self,
        member_id: &str,
        widget: &str,
        value: Value,
    ) -> Result<(), StorageError>;
}

/// In-memory store for tests and fixtures.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<(String, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WidgetStore for MemoryStore {
    fn get_widget_data(
        &self,
        member_id: &str,
        widget: &str,
    ) -> Result<Option<Value>, StorageError> {
        let data = self.data.lock().expect("widget store lock poisoned");
        Ok(data.get(&(member_id.to_string(), widget.to_string())).cloned())
    }

    fn set_widget_data(
        &self,
        member_id: &str,
        widget: &str,
        value: Value,
    ) -> Result<(), StorageError> {
        let mut data = self.data.lock().expect("widget store lock poisoned");
        data.insert((member_id.to_string(), widget.to_string()), value);
        Ok(())
    }
}

/// File-backed store: `<root>/<member_id>/<widget>.json`.
///
/// An unreadable document is logged and treated as absent so that a
/// corrupted file degrades to an empty document instead of wedging every
/// feature that reads it.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn widget_path(&self, member_id: &str, widget: &str) -> PathBuf {
        self.root.join(member_id).join(format!("{widget}.json"))
    }
}

impl WidgetStore for FileStore {
    fn get_widget_data(
        &self,
        member_id: &str,
        widget: &str,
    ) -> Result<Option<Value>, StorageError> {
        let path = self.widget_path(member_id, widget);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "unreadable widget document, treating as absent");
                Ok(None)
            }
        }
    }

    fn set_widget_data(
        &self,
        member_id: &str,
        widget: &str,
        value: Value,
    ) -> Result<(), StorageError> {
        let path = self.widget_path(member_id, widget);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(&value)?)?;
        Ok(())
    }
}
