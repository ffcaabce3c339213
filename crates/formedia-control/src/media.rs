//! The media control
//!
//! One implementation serves the canonical `media` type and its three
//! subtype aliases. `configure` resolves the change handling for the class
//! and installs the delegated upload listener (guarded so a page full of
//! media fields still ends up with exactly one); `build` delegates to the
//! markup builder.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use formedia_core::{default_attrs, AttrValues, MediaSubtype};

use crate::config::ControlClassConfig;
use crate::control::{Control, ControlDefinition};
use crate::dom::PageEnv;
use crate::markup::{build_media_field, BuiltField};
use crate::pipeline::install_handler;
use crate::registry::ControlRegistry;

/// Canonical type name; the subtype aliases record it as their parent.
pub const MEDIA_CONTROL_TYPE: &str = "media";

/// Media (image, video, audio) field control.
#[derive(Debug, Default)]
pub struct MediaControl;

impl MediaControl {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Control for MediaControl {
    fn definition(&self) -> ControlDefinition {
        ControlDefinition {
            icon: "🖼️",
            default_label: "Media",
            default_attrs: default_attrs(),
        }
    }

    async fn configure(&self, page: &PageEnv, config: &ControlClassConfig) -> Result<()> {
        install_handler(page, &config.change_handling);
        Ok(())
    }

    fn build(&self, attrs: &AttrValues, label: &str) -> Option<BuiltField> {
        build_media_field(attrs, label)
    }
}

/// Register the media control under its canonical type name plus the three
/// subtype aliases, all sharing one implementation instance.
pub async fn register_media_controls(registry: &ControlRegistry) -> Result<()> {
    let control: Arc<dyn Control> = Arc::new(MediaControl::new());
    registry
        .register(&[MEDIA_CONTROL_TYPE], Arc::clone(&control), None)
        .await?;
    registry
        .register(&MediaSubtype::names(), control, Some(MEDIA_CONTROL_TYPE))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registers_media_plus_the_three_aliases() {
        let registry = ControlRegistry::new();
        register_media_controls(&registry).await.unwrap();

        assert!(registry.contains(MEDIA_CONTROL_TYPE).await);
        for name in MediaSubtype::names() {
            assert!(registry.contains(name).await);
            assert_eq!(
                registry.parent_of(name).await.as_deref(),
                Some(MEDIA_CONTROL_TYPE)
            );
        }

        let media = registry.get("media").await.unwrap();
        let image = registry.get("image").await.unwrap();
        assert!(Arc::ptr_eq(&media, &image));
    }

    #[test]
    fn definition_carries_the_glyph_label_and_schema() {
        let definition = MediaControl::new().definition();
        assert_eq!(definition.icon, "🖼️");
        assert_eq!(definition.default_label, "Media");
        assert_eq!(definition.default_attrs.len(), 8);
    }
}
