// Asset file access

use super::AssetError;
use std::path::{Path, PathBuf};

/// Asset loader responsible for finding and reading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(name);

        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        Ok(std::fs::read(&path)?)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path("player1_idle.png");

        assert_eq!(path, PathBuf::from("/game/assets/player1_idle.png"));
        assert_eq!(loader.base_path(), Path::new("/game/assets"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let loader = AssetLoader::new(std::env::temp_dir().join("rusted-duel-no-such-dir"));
        assert!(matches!(
            loader.load_bytes("heart.png"),
            Err(AssetError::NotFound(_))
        ));
    }
}
