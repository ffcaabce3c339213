//! Control-class configuration
//!
//! The host passes per-type configuration as a JSON bag (keys like
//! `media.image` in its control config). The only options this control
//! recognizes are `default_change_handler` (bool, default true) and an
//! optional programmatic replacement handler. Both collapse into the
//! [`ChangeHandling`] variant exactly once at configure time; nothing is
//! type-inspected at event time.

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use formedia_core::MediaSubtype;

use crate::dom::ChangeHandler;

/// Which change handler, if any, gets attached for a control type.
#[derive(Clone)]
pub enum ChangeHandling {
    /// Built-in conversion pipeline (the default).
    Default,
    /// No handler at all (`default_change_handler: false`).
    Disabled,
    /// Host-supplied replacement; mutually exclusive with the built-in one.
    Custom(Arc<dyn ChangeHandler>),
}

impl ChangeHandling {
    /// Resolve from a type-scoped config bag plus an optional programmatic
    /// handler. A custom handler wins over the disable flag, matching the
    /// host's documented precedence.
    pub fn resolve(bag: Option<&JsonValue>, custom: Option<Arc<dyn ChangeHandler>>) -> Self {
        if let Some(handler) = custom {
            return ChangeHandling::Custom(handler);
        }
        let default_enabled = bag
            .and_then(|b| b.get("default_change_handler"))
            .and_then(JsonValue::as_bool)
            .unwrap_or(true);
        if default_enabled {
            ChangeHandling::Default
        } else {
            ChangeHandling::Disabled
        }
    }
}

impl fmt::Debug for ChangeHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeHandling::Default => f.write_str("Default"),
            ChangeHandling::Disabled => f.write_str("Disabled"),
            ChangeHandling::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Resolved configuration for one control class.
#[derive(Debug, Clone)]
pub struct ControlClassConfig {
    pub change_handling: ChangeHandling,
}

impl ControlClassConfig {
    pub fn resolve(bag: Option<&JsonValue>, custom: Option<Arc<dyn ChangeHandler>>) -> Self {
        Self {
            change_handling: ChangeHandling::resolve(bag, custom),
        }
    }

    /// Resolve for a subtype out of the host's full control config. The
    /// host does not fall back from `media.<subtype>` to the parent type's
    /// entry, so configuration has to be repeated per subtype key; this
    /// helper looks up `media.<subtype>` only.
    pub fn for_subtype(
        control_config: &JsonValue,
        subtype: MediaSubtype,
        custom: Option<Arc<dyn ChangeHandler>>,
    ) -> Self {
        let key = format!("media.{subtype}");
        Self::resolve(control_config.get(&key), custom)
    }
}

impl Default for ControlClassConfig {
    fn default() -> Self {
        Self {
            change_handling: ChangeHandling::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ChangeEvent;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;

    struct NoopHandler;

    #[async_trait]
    impl ChangeHandler for NoopHandler {
        async fn on_change(&self, _event: ChangeEvent) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn absent_config_means_default() {
        assert!(matches!(
            ChangeHandling::resolve(None, None),
            ChangeHandling::Default
        ));
        assert!(matches!(
            ChangeHandling::resolve(Some(&json!({})), None),
            ChangeHandling::Default
        ));
    }

    #[test]
    fn false_flag_disables_the_builtin_handler() {
        let bag = json!({ "default_change_handler": false });
        assert!(matches!(
            ChangeHandling::resolve(Some(&bag), None),
            ChangeHandling::Disabled
        ));
    }

    #[test]
    fn custom_handler_wins_over_the_disable_flag() {
        let bag = json!({ "default_change_handler": false });
        let handling = ChangeHandling::resolve(Some(&bag), Some(Arc::new(NoopHandler)));
        assert!(matches!(handling, ChangeHandling::Custom(_)));
    }

    #[test]
    fn subtype_lookup_uses_dotted_keys() {
        let control_config = json!({
            "media.image": { "default_change_handler": false },
        });
        let image =
            ControlClassConfig::for_subtype(&control_config, MediaSubtype::Image, None);
        assert!(matches!(image.change_handling, ChangeHandling::Disabled));

        // Not repeated for video, so video keeps the default.
        let video =
            ControlClassConfig::for_subtype(&control_config, MediaSubtype::Video, None);
        assert!(matches!(video.change_handling, ChangeHandling::Default));
    }
}
