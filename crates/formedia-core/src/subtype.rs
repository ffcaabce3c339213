//! Media subtype model
//!
//! The `media` control is registered once and aliased under three
//! specializations. `MediaSubtype` names them and carries the MIME-prefix
//! classification used by the upload pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ControlError;

/// Media subtype enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSubtype {
    Image,
    Video,
    Audio,
}

impl MediaSubtype {
    /// Classify a MIME type string into a subtype by prefix.
    ///
    /// Anything that is neither `image/*` nor `video/*` classifies as
    /// `Audio` — including types like `application/pdf`. The catch-all is
    /// inherited behavior and is relied on by existing forms, so it is kept
    /// as-is rather than tightened.
    pub fn classify(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaSubtype::Image
        } else if mime.starts_with("video/") {
            MediaSubtype::Video
        } else {
            MediaSubtype::Audio
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaSubtype::Image => "image",
            MediaSubtype::Video => "video",
            MediaSubtype::Audio => "audio",
        }
    }

    /// All subtype names, in registration order.
    pub fn names() -> [&'static str; 3] {
        ["image", "video", "audio"]
    }
}

impl fmt::Display for MediaSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaSubtype {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaSubtype::Image),
            "video" => Ok(MediaSubtype::Video),
            "audio" => Ok(MediaSubtype::Audio),
            other => Err(ControlError::UnknownSubtype(other.to_string())),
        }
    }
}
