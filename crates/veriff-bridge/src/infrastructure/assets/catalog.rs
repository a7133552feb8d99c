//! Bundled-resource catalog.
//!
//! Hosts refer to bundled images by bare name (`"logo"`, `"brand_mark"`).  The
//! [`DirectoryCatalog`] maps a name onto a file under the configured resource
//! directory, trying the name as-is first and then with common image
//! extensions appended.

use std::path::PathBuf;

use tracing::debug;

use super::AssetError;

/// Extensions tried, in order, when a name has no exact match.
const CANDIDATE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Source of bundled image resources.
pub trait ResourceCatalog: Send + Sync {
    /// Returns the raw bytes of the resource called `name`.
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// A catalog backed by a flat directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        let exact = self.root.join(name);
        let with_ext = CANDIDATE_EXTENSIONS
            .iter()
            .map(move |ext| self.root.join(format!("{name}.{ext}")));
        std::iter::once(exact).chain(with_ext)
    }
}

/// Resource names are flat: no separators, no parent references.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

impl ResourceCatalog for DirectoryCatalog {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        if !is_plain_name(name) {
            return Err(AssetError::NotFound(name.to_string()));
        }

        for path in self.candidates(name) {
            if !path.is_file() {
                continue;
            }
            debug!("bundled resource {name:?} found at {}", path.display());
            return std::fs::read(&path).map_err(|source| AssetError::Io { path, source });
        }

        Err(AssetError::NotFound(name.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("veriff-catalog-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_exact_name() {
        // Arrange
        let dir = scratch_dir();
        std::fs::write(dir.join("logo.webp"), b"exact").unwrap();
        let catalog = DirectoryCatalog::new(&dir);

        // Act
        let bytes = catalog.load("logo.webp").unwrap();

        // Assert
        assert_eq!(bytes, b"exact");
    }

    #[test]
    fn test_load_appends_png_extension() {
        let dir = scratch_dir();
        std::fs::write(dir.join("brand.png"), b"png-bytes").unwrap();
        let catalog = DirectoryCatalog::new(&dir);

        assert_eq!(catalog.load("brand").unwrap(), b"png-bytes");
    }

    #[test]
    fn test_png_wins_over_jpg() {
        let dir = scratch_dir();
        std::fs::write(dir.join("brand.png"), b"png").unwrap();
        std::fs::write(dir.join("brand.jpg"), b"jpg").unwrap();
        let catalog = DirectoryCatalog::new(&dir);

        assert_eq!(catalog.load("brand").unwrap(), b"png");
    }

    #[test]
    fn test_missing_resource_is_not_found() {
        let catalog = DirectoryCatalog::new(scratch_dir());
        assert!(matches!(catalog.load("absent"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_path_like_names_are_refused() {
        let dir = scratch_dir();
        std::fs::write(dir.join("inner.png"), b"x").unwrap();
        let catalog = DirectoryCatalog::new(dir.parent().unwrap());

        for name in ["../etc/passwd", "sub/inner", "..", ""] {
            assert!(
                matches!(catalog.load(name), Err(AssetError::NotFound(_))),
                "{name:?} must be refused"
            );
        }
    }

    #[test]
    fn test_candidates_try_exact_name_then_extensions() {
        let catalog = DirectoryCatalog::new("/res");

        let tried: Vec<PathBuf> = catalog.candidates("brand").collect();

        assert_eq!(
            tried,
            ["brand", "brand.png", "brand.jpg", "brand.jpeg"]
                .iter()
                .map(|n| PathBuf::from("/res").join(n))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_directory_named_like_resource_is_skipped() {
        let dir = scratch_dir();
        std::fs::create_dir_all(dir.join("icon")).unwrap();
        std::fs::write(dir.join("icon.png"), b"file").unwrap();
        let catalog = DirectoryCatalog::new(&dir);

        assert_eq!(catalog.load("icon").unwrap(), b"file");
    }
}
