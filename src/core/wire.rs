use serde::Deserialize;

/// Yahoo's `{ "raw": 1.23, "fmt": "1.23" }` number wrapper; absent fields arrive as `{}`.
#[derive(Deserialize, Clone, Copy, Debug, Default)]
pub struct RawNum<T> {
    pub(crate) raw: Option<T>,
}

pub fn from_raw<T>(raw: Option<RawNum<T>>) -> Option<T> {
    raw.and_then(|n| n.raw)
}

/// Like [`from_raw`] but drops NaN and infinities.
pub fn from_raw_finite(raw: Option<RawNum<f64>>) -> Option<f64> {
    from_raw(raw).filter(|v| v.is_finite())
}

/// Trims and drops empty strings.
pub fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
