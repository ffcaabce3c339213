//! Modelled host DOM surfaces
//!
//! The control runs inside a form-builder host that owns the real DOM. This
//! module models the handful of surfaces the control actually touches: the
//! file input it listens on, the element-configuration field group it writes
//! into, the change event joining the two, and the page-level delegation
//! point where listeners are attached.
//!
//! `FileInput` and `FieldGroup` are cheap cloneable handles over shared
//! state, so a dispatched event and the test observing it see the same
//! underlying values.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;
use tracing::warn;

use crate::markers::LoadedMarkers;

/// One user-selected file, with the MIME type the browser reported for it.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(name: &str, content_type: &str, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Default)]
struct FileInputState {
    file: Option<SelectedFile>,
    value: String,
}

/// A file-input element. Holds at most one selected file and the input's
/// value string; clearing the value permits re-selecting the same file to
/// re-trigger the pipeline.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    state: Arc<Mutex<FileInputState>>,
}

impl FileInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user picking a file: sets both the selection and the
    /// input value.
    pub fn select(&self, file: SelectedFile) {
        let mut state = self.state.lock().expect("file input lock");
        state.value = file.name.clone();
        state.file = Some(file);
    }

    pub fn file(&self) -> Option<SelectedFile> {
        self.state.lock().expect("file input lock").file.clone()
    }

    pub fn value(&self) -> String {
        self.state.lock().expect("file input lock").value.clone()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock().expect("file input lock");
        state.file = None;
        state.value.clear();
    }
}

#[derive(Debug, Default)]
struct FieldState {
    src: String,
    mimetype: String,
    subtype: String,
}

/// The element-configuration container surrounding a media field: the three
/// fields the upload pipeline writes back into.
///
/// Setting `src` emits a change notification on a watch channel so the host
/// re-render (or a test) can observe the update; `mimetype` and `subtype`
/// update silently, matching the host's field semantics.
#[derive(Debug, Clone)]
pub struct FieldGroup {
    state: Arc<Mutex<FieldState>>,
    src_tx: watch::Sender<String>,
}

impl FieldGroup {
    pub fn new() -> Self {
        let (src_tx, _) = watch::channel(String::new());
        Self {
            state: Arc::new(Mutex::new(FieldState::default())),
            src_tx,
        }
    }

    pub fn src(&self) -> String {
        self.state.lock().expect("field group lock").src.clone()
    }

    pub fn mimetype(&self) -> String {
        self.state.lock().expect("field group lock").mimetype.clone()
    }

    pub fn subtype(&self) -> String {
        self.state.lock().expect("field group lock").subtype.clone()
    }

    pub fn set_src(&self, value: &str) {
        self.state.lock().expect("field group lock").src = value.to_string();
        self.src_tx.send_replace(value.to_string());
    }

    pub fn set_mimetype(&self, value: &str) {
        self.state.lock().expect("field group lock").mimetype = value.to_string();
    }

    pub fn set_subtype(&self, value: &str) {
        self.state.lock().expect("field group lock").subtype = value.to_string();
    }

    /// Subscribe to `src` change notifications.
    pub fn watch_src(&self) -> watch::Receiver<String> {
        self.src_tx.subscribe()
    }
}

impl Default for FieldGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// A file-selection change event: the originating input plus the field
/// group of the surrounding form element. Consumed once per selection.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub input: FileInput,
    pub fields: FieldGroup,
}

impl ChangeEvent {
    pub fn new(input: FileInput, fields: FieldGroup) -> Self {
        Self { input, fields }
    }
}

/// A change-event listener. The built-in conversion pipeline implements
/// this; hosts may supply their own to replace it entirely.
#[async_trait]
pub trait ChangeHandler: Send + Sync {
    async fn on_change(&self, event: ChangeEvent) -> Result<()>;
}

#[derive(Default)]
struct ListenerSet {
    listeners: Vec<(String, Arc<dyn ChangeHandler>)>,
}

impl ListenerSet {
    fn attach(&mut self, selector: &str, handler: Arc<dyn ChangeHandler>) {
        self.listeners.push((selector.to_string(), handler));
    }

    fn handlers_for(&self, selector: &str) -> Vec<Arc<dyn ChangeHandler>> {
        self.listeners
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, h)| Arc::clone(h))
            .collect()
    }

    fn count_for(&self, selector: &str) -> usize {
        self.listeners.iter().filter(|(s, _)| s == selector).count()
    }
}

/// Per-page environment: the body-level delegation point plus the
/// loaded-marker cache, bundled so setup routines get both injected
/// instead of reaching for globals.
#[derive(Default)]
pub struct PageEnv {
    listeners: Mutex<ListenerSet>,
    markers: Mutex<LoadedMarkers>,
}

impl PageEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a delegated listener guarded by a marker: when the marker is
    /// already present nothing happens. Returns whether the listener was
    /// attached. Check-then-append is safe here; configuration runs on a
    /// single execution context.
    pub fn install_once(
        &self,
        marker: &str,
        selector: &str,
        handler: Arc<dyn ChangeHandler>,
    ) -> bool {
        let mut markers = self.markers.lock().expect("marker lock");
        if markers.has(marker) {
            return false;
        }
        self.listeners
            .lock()
            .expect("listener lock")
            .attach(selector, handler);
        markers.add(marker);
        true
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.lock().expect("marker lock").has(marker)
    }

    pub fn listener_count(&self, selector: &str) -> usize {
        self.listeners
            .lock()
            .expect("listener lock")
            .count_for(selector)
    }

    /// Deliver a change event to every listener attached for the selector.
    /// Handler errors are logged and swallowed; event delivery never fails
    /// the dispatching caller.
    pub async fn dispatch_change(&self, selector: &str, event: ChangeEvent) {
        let handlers = self
            .listeners
            .lock()
            .expect("listener lock")
            .handlers_for(selector);
        for handler in handlers {
            if let Err(err) = handler.on_change(event.clone()).await {
                warn!(selector, error = %err, "change handler failed");
            }
        }
    }
}
