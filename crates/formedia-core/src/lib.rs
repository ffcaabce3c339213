//! Formedia Core Library
//!
//! This crate provides the domain types shared by the media control: the
//! media subtype model, the data-URI grammar (encode, sniff, classify),
//! the declarative attribute schema, and the error types.

pub mod attributes;
pub mod data_uri;
pub mod error;
pub mod subtype;

// Re-export commonly used types
pub use attributes::{default_attrs, AttrField, AttrValues, InputType};
pub use data_uri::{encode, sniff_media_type};
pub use error::ControlError;
pub use subtype::MediaSubtype;
