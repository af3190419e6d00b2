use std::fmt;
use std::str::FromStr;

use crate::foundation::error::PicframeError;

/// One of the fixed visual treatments applied to a picture.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DecorationMode {
    /// Translucent black band along the bottom edge with a centered caption.
    Banner,
    /// Opaque black border on all four edges.
    Frame,
    /// Overlay asset blended over the whole picture at 30% opacity.
    Overlay,
}

impl DecorationMode {
    /// Every mode, in the order the selector presents them.
    pub const ALL: [DecorationMode; 3] = [Self::Banner, Self::Frame, Self::Overlay];

    /// Stable lowercase identifier (`banner`, `frame`, `overlay`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Frame => "frame",
            Self::Overlay => "overlay",
        }
    }

    /// Resolve a selector identifier, failing closed.
    ///
    /// Unknown identifiers yield `None`, which the compositor treats as "no decoration".
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                tracing::warn!(mode = s, error = %e, "unknown decoration mode, passing through");
                None
            }
        }
    }
}

impl fmt::Display for DecorationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecorationMode {
    type Err = PicframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "banner" => Ok(Self::Banner),
            "frame" => Ok(Self::Frame),
            "overlay" => Ok(Self::Overlay),
            other => Err(PicframeError::validation(format!(
                "unknown decoration mode '{other}' (expected banner, frame or overlay)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decor/mode.rs"]
mod tests;
