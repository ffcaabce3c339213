//! Control trait and definition
//!
//! The abstraction the registry stores: every field control declares its
//! static metadata, configures itself once per page, and builds its element
//! tree from resolved attributes.

use anyhow::Result;
use async_trait::async_trait;

use formedia_core::{AttrField, AttrValues};

use crate::config::ControlClassConfig;
use crate::dom::PageEnv;
use crate::markup::BuiltField;

/// Static metadata a control advertises to the form designer.
#[derive(Debug, Clone)]
pub struct ControlDefinition {
    /// Toolbar glyph.
    pub icon: &'static str,
    /// Display label when no i18n override applies.
    pub default_label: &'static str,
    /// Editable attribute schema, in display order.
    pub default_attrs: Vec<AttrField>,
}

/// A pluggable field-type implementation.
#[async_trait]
pub trait Control: Send + Sync {
    /// The control's icon, label, and attribute schema.
    fn definition(&self) -> ControlDefinition;

    /// One-time page setup (listener installation and the like). Called
    /// once per control instance; implementations must stay idempotent
    /// across instances.
    async fn configure(&self, page: &PageEnv, config: &ControlClassConfig) -> Result<()>;

    /// Build the element tree for one field from its resolved attributes.
    fn build(&self, attrs: &AttrValues, label: &str) -> Option<BuiltField>;

    /// Post-render hook.
    fn on_render(&self) {}
}
