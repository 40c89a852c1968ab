//! Per-request compression hints.

/// Level used when the request does not name one.
pub const DEFAULT_LEVEL: &str = "medium";

/// Hints accepted alongside an upload.
///
/// Neither field changes how a document is serialized yet: every level
/// produces the same metadata-stripped, object-stream packed output. They
/// are carried through so callers and logs see what was asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressOptions {
    /// Compression level name as supplied by the caller (`"medium"` by default)
    pub level: String,
    /// Target output size in megabytes
    pub max_mb: Option<f64>,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            max_mb: None,
        }
    }
}

impl CompressOptions {
    /// Build options from raw form values.
    ///
    /// A missing level falls back to [`DEFAULT_LEVEL`]; a supplied one is kept
    /// verbatim. `max_mb` takes the longest leading float (so `"2mb"` reads as
    /// 2) and is dropped when there is none or it is not finite.
    pub fn from_form(level: Option<&str>, max_mb: Option<&str>) -> Self {
        Self {
            level: level.unwrap_or(DEFAULT_LEVEL).to_string(),
            max_mb: max_mb.and_then(parse_max_mb),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_max_mb(mut self, max_mb: Option<f64>) -> Self {
        self.max_mb = max_mb;
        self
    }
}

fn parse_max_mb(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    (1..=raw.len())
        .rev()
        .filter(|&end| raw.is_char_boundary(end))
        .find_map(|end| raw[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
