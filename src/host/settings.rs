use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::DEFAULT_TARGET_FPS;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::filter::PresentFilter;

/// Host-side persisted preferences.
///
/// The core never reads or writes these; a host loads them at startup, feeds `target_fps` into
/// a [`crate::TargetFps`] handle and writes them back when the user changes something.
///
/// Loading never fails on content: a value of the wrong type, a non-positive rate or an
/// unparsable file each fall back to the defaults with a `warn`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Preferred maximum frame rate. Non-positive values fall back to the default on load.
    #[serde(deserialize_with = "lenient_fps")]
    pub target_fps: f64,
    /// Presentation filter for software surfaces.
    #[serde(deserialize_with = "lenient_filter")]
    pub filter: PresentFilter,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            filter: PresentFilter::default(),
        }
    }
}

impl HostSettings {
    /// Parse settings from JSON, repairing unusable values.
    ///
    /// Malformed JSON yields the defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(parsed) => parsed.sanitized(),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable host settings; using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> BackdropResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file; using defaults");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Ok(Self::from_json(&json))
    }

    /// Write settings to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> BackdropResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create settings directory '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BackdropError::serde(format!("serialize host settings: {e}")))?;
        std::fs::write(path, json)
            .with_context(|| format!("write settings '{}'", path.display()))?;
        Ok(())
    }

    /// Replace unusable values with defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            tracing::warn!(
                target_fps = self.target_fps,
                "ignoring unusable stored frame rate"
            );
            self.target_fps = DEFAULT_TARGET_FPS;
        }
        if let Err(err) = self.filter.validate() {
            tracing::warn!(error = %err, "ignoring unusable stored filter");
            self.filter = PresentFilter::default();
        }
        self
    }
}

/// Numbers pass through; numeric strings are parsed; anything else is the default rate.
fn lenient_fps<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
    let fps = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(fps.unwrap_or_else(|| {
        tracing::warn!(stored = %value, "ignoring non-numeric stored frame rate");
        DEFAULT_TARGET_FPS
    }))
}

fn lenient_filter<'de, D>(deserializer: D) -> Result<PresentFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring malformed stored filter");
        PresentFilter::default()
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/host/settings.rs"]
mod tests;
