//! Opaque image locator.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Path or URL of an image asset.
///
/// The carousel never looks inside; it only compares, hashes and hands refs
/// to the loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.0)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
    }

    /// Resolves the ref against an asset root.
    ///
    /// Site-absolute refs (`/portfolio/a.webp`) are treated as relative to the root.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(self.0.trim_start_matches('/'))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_strips_leading_slash() {
        let image = ImageRef::from("/portfolio/lawwise/1.webp");
        assert_eq!(
            image.resolve(Path::new("/srv/site")),
            PathBuf::from("/srv/site/portfolio/lawwise/1.webp")
        );
    }

    #[test]
    fn extension_is_lower_cased() {
        assert_eq!(ImageRef::from("a/B.WEBP").extension().as_deref(), Some("webp"));
        assert_eq!(ImageRef::from("no-extension").extension(), None);
    }
}
