//! Error types module
//!
//! All errors raised by the control and its registry are unified under the
//! `ControlError` enum. The upload pipeline itself is silent by design (a
//! failed read is logged and dropped, never surfaced), so the variants here
//! cover registration and host-contract violations only.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Unknown control type: {0}")]
    UnknownControlType(String),

    #[error("Control type already registered: {0}")]
    DuplicateControlType(String),

    #[error("Unknown media subtype: {0}")]
    UnknownSubtype(String),

    #[error("No file selected")]
    NoFileSelected,

    #[error("File read failed: {0}")]
    ReadFailed(#[from] io::Error),
}
