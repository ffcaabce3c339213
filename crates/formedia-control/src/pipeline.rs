//! Upload conversion pipeline: read → sniff → classify → write back.
//!
//! This module provides the canonical read→sniff→classify→write-back flow
//! for media uploads, plus the marker-guarded installation of the delegated
//! change listener. One listener serves every media field on the page; the
//! marker in the page's loaded cache guarantees installation happens at most
//! once no matter how many control instances configure themselves.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use formedia_core::data_uri::sniff_media_type;
use formedia_core::{ControlError, MediaSubtype};

use crate::config::ChangeHandling;
use crate::dom::{ChangeEvent, ChangeHandler, PageEnv};
use crate::reader::{DataUrlReader, FileReader};

/// Marker recorded in the page's loaded cache once the listener is attached.
pub const MEDIA_HANDLER_MARKER: &str = "controlMediaEmbedded";

/// Selector the delegated listener is scoped to: the media file-upload
/// input inside a form-builder element's configuration panel.
pub const MEDIA_UPLOAD_SELECTOR: &str = ".form-builder .frm-holder .fld-media-file-upload";

/// Attach the configured change handler, at most once per page.
///
/// Safe to call from every control instance on a page: the first call with
/// a handler attaches it and records the marker, later calls see the marker
/// and return without touching the listener set.
pub fn install_handler(page: &PageEnv, handling: &ChangeHandling) {
    let handler: Arc<dyn ChangeHandler> = match handling {
        ChangeHandling::Disabled => return,
        ChangeHandling::Default => Arc::new(DefaultChangeHandler::new()),
        ChangeHandling::Custom(custom) => Arc::clone(custom),
    };
    if page.install_once(MEDIA_HANDLER_MARKER, MEDIA_UPLOAD_SELECTOR, handler) {
        debug!(selector = MEDIA_UPLOAD_SELECTOR, "media change handler attached");
    }
}

/// The built-in conversion handler: reads the selected file as a data URI,
/// infers mimetype and subtype from the URI header, writes all three fields
/// back into the surrounding field group, and clears the input.
pub struct DefaultChangeHandler {
    reader: Arc<dyn FileReader>,
}

impl DefaultChangeHandler {
    pub fn new() -> Self {
        Self {
            reader: Arc::new(DataUrlReader),
        }
    }

    pub fn with_reader(reader: Arc<dyn FileReader>) -> Self {
        Self { reader }
    }
}

impl Default for DefaultChangeHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeHandler for DefaultChangeHandler {
    async fn on_change(&self, event: ChangeEvent) -> Result<()> {
        // The host UI constrains the input to a single file; an empty
        // selection is a caller precondition violation.
        let file = event.input.file().ok_or(ControlError::NoFileSelected)?;

        // Single suspension point. A failed read is silent by design: the
        // fields keep their previous values and no error surfaces.
        let data_uri = match self.reader.read_as_data_url(&file).await {
            Ok(uri) => uri,
            Err(err) => {
                debug!(file = %file.name, error = %err, "file read failed, fields left untouched");
                return Ok(());
            }
        };

        if let Some(mediatype) = sniff_media_type(&data_uri) {
            event.fields.set_mimetype(mediatype);
            event
                .fields
                .set_subtype(MediaSubtype::classify(mediatype).as_str());
        }

        // src is written even when the header didn't sniff (partial update,
        // not a rollback), and its change notification fires either way.
        event.fields.set_src(&data_uri);
        event.input.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{FieldGroup, FileInput, SelectedFile};

    fn event_with(file: SelectedFile) -> ChangeEvent {
        let input = FileInput::new();
        input.select(file);
        ChangeEvent::new(input, FieldGroup::new())
    }

    #[tokio::test]
    async fn png_selection_updates_all_three_fields_and_clears_the_input() {
        let event = event_with(SelectedFile::new("cat.png", "image/png", &b"png-bytes"[..]));
        DefaultChangeHandler::new()
            .on_change(event.clone())
            .await
            .unwrap();

        assert_eq!(event.fields.mimetype(), "image/png");
        assert_eq!(event.fields.subtype(), "image");
        assert!(event.fields.src().starts_with("data:image/png;base64,"));
        assert_eq!(event.input.value(), "");
        assert!(event.input.file().is_none());
    }

    #[tokio::test]
    async fn pdf_selection_lands_on_the_audio_catch_all() {
        let event = event_with(SelectedFile::new("doc.pdf", "application/pdf", &b"%PDF"[..]));
        DefaultChangeHandler::new()
            .on_change(event.clone())
            .await
            .unwrap();

        assert_eq!(event.fields.mimetype(), "application/pdf");
        assert_eq!(event.fields.subtype(), "audio");
    }

    #[tokio::test]
    async fn unsniffable_uri_keeps_prior_mimetype_but_still_writes_src() {
        struct BlankReader;

        #[async_trait]
        impl FileReader for BlankReader {
            async fn read_as_data_url(&self, _file: &SelectedFile) -> Result<String> {
                Ok("data:;base64,AAAA".to_string())
            }
        }

        let event = event_with(SelectedFile::new("mystery", "", &b"x"[..]));
        event.fields.set_mimetype("image/gif");
        event.fields.set_subtype("image");

        DefaultChangeHandler::with_reader(Arc::new(BlankReader))
            .on_change(event.clone())
            .await
            .unwrap();

        assert_eq!(event.fields.mimetype(), "image/gif");
        assert_eq!(event.fields.subtype(), "image");
        assert_eq!(event.fields.src(), "data:;base64,AAAA");
        assert_eq!(event.input.value(), "");
    }

    #[tokio::test]
    async fn read_failure_is_silent_and_leaves_every_field_alone() {
        struct FailingReader;

        #[async_trait]
        impl FileReader for FailingReader {
            async fn read_as_data_url(&self, _file: &SelectedFile) -> Result<String> {
                anyhow::bail!("disk vanished")
            }
        }

        let event = event_with(SelectedFile::new("gone.png", "image/png", &b"x"[..]));
        event.fields.set_src("data:previous");
        let rx = event.fields.watch_src();

        let result = DefaultChangeHandler::with_reader(Arc::new(FailingReader))
            .on_change(event.clone())
            .await;

        assert!(result.is_ok());
        assert_eq!(event.fields.src(), "data:previous");
        assert!(!rx.has_changed().unwrap());
        // The input is not cleared either; the pipeline never completed.
        assert_eq!(event.input.value(), "gone.png");
    }

    #[tokio::test]
    async fn empty_selection_is_a_precondition_error() {
        let event = ChangeEvent::new(FileInput::new(), FieldGroup::new());
        let err = DefaultChangeHandler::new().on_change(event).await;
        assert!(err.is_err());
    }

    #[test]
    fn install_is_idempotent_across_many_instances() {
        let page = PageEnv::new();
        for _ in 0..4 {
            install_handler(&page, &ChangeHandling::Default);
        }
        assert_eq!(page.listener_count(MEDIA_UPLOAD_SELECTOR), 1);
        assert!(page.has_marker(MEDIA_HANDLER_MARKER));
    }

    #[test]
    fn disabled_handling_attaches_nothing() {
        let page = PageEnv::new();
        install_handler(&page, &ChangeHandling::Disabled);
        assert_eq!(page.listener_count(MEDIA_UPLOAD_SELECTOR), 0);
        assert!(!page.has_marker(MEDIA_HANDLER_MARKER));
    }
}
