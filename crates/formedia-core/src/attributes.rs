//! Declarative attribute schema
//!
//! The control advertises its editable attributes to the host as a fixed,
//! ordered schema (`default_attrs`). At render time the host hands back the
//! resolved values as a flat name→value map (`AttrValues`) which the markup
//! builder consumes.

use serde::Serialize;

/// Input widget the host should render for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    /// Text inputs do not handle large data URI strings; `src` uses a
    /// textarea so the browser doesn't hang on multi-megabyte values.
    Textarea,
    File,
    Select,
}

/// One entry in the control's attribute schema.
#[derive(Debug, Clone, Serialize)]
pub struct AttrField {
    pub name: String,
    pub label: String,
    pub input_type: InputType,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME accept list for file inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    /// `(value, label)` pairs for select inputs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<(String, String)>,
}

impl AttrField {
    fn new(name: &str, label: &str, input_type: InputType, value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            input_type,
            value: value.to_string(),
            description: None,
            accept: None,
            options: Vec::new(),
        }
    }

    fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn accept(mut self, accept: &str) -> Self {
        self.accept = Some(accept.to_string());
        self
    }

    fn options(mut self, options: &[(&str, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(v, l)| (v.to_string(), l.to_string()))
            .collect();
        self
    }
}

/// Name of the file pseudo-field. It only exists to open the browser's file
/// picker; its value is never persisted into the form definition.
pub const FILE_UPLOAD_FIELD: &str = "media-file-upload";

/// The default attribute schema for the media control, in display order.
pub fn default_attrs() -> Vec<AttrField> {
    vec![
        AttrField::new("className", "Class", InputType::Text, "img-fluid"),
        AttrField::new("description", "Help Text", InputType::Text, ""),
        AttrField::new("src", "Src", InputType::Textarea, ""),
        AttrField::new("mimetype", "Mime Type", InputType::Text, "")
            .description("Mimetype of Media"),
        AttrField::new(FILE_UPLOAD_FIELD, "File", InputType::File, "")
            .description("Upload a media file (Image, Audio, Video)")
            .accept("image/*,video/mp4,video/x-m4v,video/*,audio/x-m4a,audio/*"),
        AttrField::new("width", "Width", InputType::Text, "200"),
        AttrField::new("height", "Height", InputType::Text, "auto"),
        AttrField::new("subtype", "Media Type", InputType::Select, "").options(&[
            ("image", "Image"),
            ("video", "Video"),
            ("audio", "Audio"),
        ]),
    ]
}

/// Resolved attribute values for one field instance, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct AttrValues(Vec<(String, String)>);

impl AttrValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values from the schema defaults (file pseudo-field excluded).
    pub fn from_defaults() -> Self {
        let mut values = Self::new();
        for field in default_attrs() {
            if field.input_type == InputType::File {
                continue;
            }
            values.set(&field.name, &field.value);
        }
        values
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a value, preserving first-insertion order.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.0.push((name.to_string(), value.to_string())),
        }
    }

    /// A copy with the named keys removed. The host injects a `type` key
    /// into every field's config; the builders strip it before emitting
    /// element attributes.
    pub fn without(&self, names: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(n, _)| !names.contains(&n.as_str()))
                .cloned()
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AttrValues {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.set(name, value);
        }
        values
    }
}
