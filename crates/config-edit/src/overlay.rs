//! Overlay documents: whole-root overrides and directive lists, grouped by
//! the overlay that supplied them.

use std::fmt;

use config_edit_reflect::Reflect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::EditDirective;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("invalid TOML overlay document: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON overlay document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Directives for one root of one collection.
///
/// ```
/// use config_edit::ConfigEdit;
///
/// let edit = ConfigEdit::from_toml_str(r#"
///     collection = "UnitPreset"
///     key = "mech_a"
///
///     [[edits]]
///     path = "count"
///     value = "5"
/// "#).unwrap();
/// assert_eq!(edit.edits.len(), 1);
/// assert!(!edit.removed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEdit {
    pub collection: String,
    pub key: String,
    /// File the edit was loaded from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Delete the root instead of editing it.
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub edits: Vec<EditDirective>,
}

impl ConfigEdit {
    pub fn new(collection: impl Into<String>, key: impl Into<String>) -> Self {
        ConfigEdit {
            collection: collection.into(),
            key: key.into(),
            source: None,
            removed: false,
            edits: Vec::new(),
        }
    }

    pub fn with_directive(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.edits.push(EditDirective::new(path, value));
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn removing(mut self) -> Self {
        self.removed = true;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, OverlayError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, OverlayError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A replacement or additional root, inserted wholesale.
pub struct ConfigOverride {
    pub collection: String,
    pub key: String,
    pub root: Box<dyn Reflect>,
}

impl ConfigOverride {
    pub fn new(collection: impl Into<String>, key: impl Into<String>, root: impl Reflect) -> Self {
        ConfigOverride {
            collection: collection.into(),
            key: key.into(),
            root: Box::new(root),
        }
    }
}

impl fmt::Debug for ConfigOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverride")
            .field("collection", &self.collection)
            .field("key", &self.key)
            .field("root", &self.root.shape().name())
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct OverlayDocument {
    #[serde(default)]
    edits: Vec<ConfigEdit>,
}

/// Everything one overlay contributes to a batch.
#[derive(Debug)]
pub struct Overlay {
    pub id: String,
    pub overrides: Vec<ConfigOverride>,
    pub edits: Vec<ConfigEdit>,
}

impl Overlay {
    pub fn new(id: impl Into<String>) -> Self {
        Overlay {
            id: id.into(),
            overrides: Vec::new(),
            edits: Vec::new(),
        }
    }

    pub fn with_override(
        mut self,
        collection: impl Into<String>,
        key: impl Into<String>,
        root: impl Reflect,
    ) -> Self {
        self.overrides.push(ConfigOverride::new(collection, key, root));
        self
    }

    pub fn with_edit(mut self, edit: ConfigEdit) -> Self {
        self.edits.push(edit);
        self
    }

    /// An overlay whose edits come from a TOML document with an `[[edits]]`
    /// array.
    pub fn from_toml_str(id: impl Into<String>, text: &str) -> Result<Self, OverlayError> {
        let document: OverlayDocument = toml::from_str(text)?;
        Ok(Overlay {
            edits: document.edits,
            ..Overlay::new(id)
        })
    }

    /// As [`Overlay::from_toml_str`], for a JSON document `{"edits": [...]}`.
    pub fn from_json_str(id: impl Into<String>, text: &str) -> Result<Self, OverlayError> {
        let document: OverlayDocument = serde_json::from_str(text)?;
        Ok(Overlay {
            edits: document.edits,
            ..Overlay::new(id)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.edits.is_empty()
    }
}
