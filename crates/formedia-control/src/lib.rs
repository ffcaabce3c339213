//! Formedia Control Library
//!
//! The media field control and the host surfaces it talks to: the control
//! trait and registry, the per-page environment (delegated listener set plus
//! loaded-marker cache), the upload conversion pipeline that turns a file
//! selection into an embedded data URI, and the markup builder that emits
//! the HTML5 element tree for the active subtype.
//!
//! The built-in change handler can be disabled or replaced per control type
//! through the host's control configuration; see [`ChangeHandling`].

pub mod config;
pub mod control;
pub mod dom;
pub mod markers;
pub mod markup;
pub mod media;
pub mod pipeline;
pub mod reader;
pub mod registry;

// Re-export commonly used types
pub use config::{ChangeHandling, ControlClassConfig};
pub use control::{Control, ControlDefinition};
pub use dom::{ChangeEvent, ChangeHandler, FieldGroup, FileInput, PageEnv, SelectedFile};
pub use markers::LoadedMarkers;
pub use markup::{build_media_field, markup, BuiltField, Element, Layout, Node};
pub use media::{register_media_controls, MediaControl, MEDIA_CONTROL_TYPE};
pub use pipeline::{
    install_handler, DefaultChangeHandler, MEDIA_HANDLER_MARKER, MEDIA_UPLOAD_SELECTOR,
};
pub use reader::{DataUrlReader, FileReader, FsFileReader};
pub use registry::ControlRegistry;
