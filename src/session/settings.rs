use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::assets::overlay::DEFAULT_OVERLAY_PATH;
use crate::decor::mode::DecorationMode;
use crate::encode::png::DEFAULT_EXPORT_FILE_NAME;
use crate::foundation::error::{PicframeError, PicframeResult};

/// Options controlling an [`crate::EditorSession`].
///
/// All fields have defaults, so a settings file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSettings {
    /// Overlay graphic location. `None` disables overlay mode entirely.
    pub overlay_path: Option<PathBuf>,
    /// Caption font file. `None` searches well-known system fonts.
    pub font_path: Option<PathBuf>,
    /// Suggested file name for exports.
    pub export_file_name: String,
    /// Mode selected when the session starts.
    pub default_mode: DecorationMode,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            overlay_path: Some(PathBuf::from(DEFAULT_OVERLAY_PATH)),
            font_path: None,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            default_mode: DecorationMode::Banner,
        }
    }
}

impl SessionSettings {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PicframeResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| PicframeError::validation(format!("parse settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PicframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PicframeError::validation(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject settings that cannot produce a usable export.
    pub fn validate(&self) -> PicframeResult<()> {
        let name = self.export_file_name.trim();
        if name.is_empty() {
            return Err(PicframeError::validation(
                "export_file_name must be non-empty",
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(PicframeError::validation(
                "export_file_name must be a bare file name",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/settings.rs"]
mod tests;
