//! Control registry
//!
//! Registry for managing available field controls. A control can be
//! registered under several type names sharing one implementation, with a
//! parent type recorded for each alias so the host can resolve subtype
//! lookups back to the canonical control.
//!
//! Thread-safe and async-compatible using tokio's RwLock; registration
//! typically happens once at page setup, reads happen on every render.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use formedia_core::ControlError;

use crate::control::Control;

/// Registry mapping type names to control implementations.
#[derive(Clone, Default)]
pub struct ControlRegistry {
    controls: Arc<RwLock<HashMap<String, Arc<dyn Control>>>>,
    parents: Arc<RwLock<HashMap<String, String>>>,
}

impl ControlRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one implementation under one or more type names, optionally
    /// recording a parent type for each name. Registering a name twice is
    /// an error.
    pub async fn register(
        &self,
        names: &[&str],
        control: Arc<dyn Control>,
        parent: Option<&str>,
    ) -> Result<()> {
        let mut controls = self.controls.write().await;
        let mut parents = self.parents.write().await;

        for name in names {
            if controls.contains_key(*name) {
                return Err(ControlError::DuplicateControlType(name.to_string()).into());
            }
        }
        for name in names {
            controls.insert(name.to_string(), Arc::clone(&control));
            if let Some(parent) = parent {
                parents.insert(name.to_string(), parent.to_string());
            }
        }
        Ok(())
    }

    /// Get a control by type name
    pub async fn get(&self, name: &str) -> Result<Arc<dyn Control>> {
        let controls = self.controls.read().await;
        controls
            .get(name)
            .cloned()
            .ok_or_else(|| ControlError::UnknownControlType(name.to_string()).into())
    }

    /// Check if a type name is registered
    pub async fn contains(&self, name: &str) -> bool {
        self.controls.read().await.contains_key(name)
    }

    /// The parent type recorded for an alias, if any
    pub async fn parent_of(&self, name: &str) -> Option<String> {
        self.parents.read().await.get(name).cloned()
    }

    /// All registered type names, unordered
    pub async fn list(&self) -> Vec<String> {
        self.controls.read().await.keys().cloned().collect()
    }
}
