// Central asset management system

use super::{AssetError, AssetHandle, AssetId, AssetLoader, ImageHandle};
use image::RgbaImage;
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// Central asset manager for the game
///
/// Decodes images once and hands out typed handles; renderers look the
/// pixels up by handle.
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// Decoded images
    images: HashMap<AssetId, RgbaImage>,

    /// Path to ID mapping for images
    image_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            images: HashMap::new(),
            image_paths: HashMap::new(),
        }
    }

    /// Load and decode an image, returning the cached handle if already loaded
    pub fn load_image(&mut self, name: &str) -> Result<ImageHandle, AssetError> {
        if let Some(&id) = self.image_paths.get(name) {
            return Ok(AssetHandle::new(id));
        }

        let bytes = self.loader.load_bytes(name)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Decode {
                name: name.to_string(),
                source,
            })?
            .to_rgba8();

        debug!("Loaded {} ({}x{})", name, image.width(), image.height());

        let id = AssetId::from_path(name);
        self.images.insert(id, image);
        self.image_paths.insert(name.to_string(), id);

        Ok(AssetHandle::new(id))
    }

    /// Load a horizontal sprite strip and check it holds every frame
    pub fn load_sprite_sheet(
        &mut self,
        name: &str,
        required: (u32, u32),
    ) -> Result<ImageHandle, AssetError> {
        let handle = self.load_image(name)?;
        let actual = self
            .image_size(handle)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;

        if actual.0 < required.0 || actual.1 < required.1 {
            return Err(AssetError::SheetTooSmall {
                name: name.to_string(),
                required,
                actual,
            });
        }

        Ok(handle)
    }

    /// Get decoded pixels
    pub fn image(&self, handle: ImageHandle) -> Option<&RgbaImage> {
        self.images.get(&handle.id())
    }

    /// Get image dimensions
    pub fn image_size(&self, handle: ImageHandle) -> Option<(u32, u32)> {
        self.image(handle).map(|image| image.dimensions())
    }

    /// Number of loaded images
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Get the loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Fresh directory under the system temp dir
    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rusted-duel-assets-{}-{}",
            test,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        RgbaImage::new(width, height).save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_load_image_and_cache() {
        let dir = scratch_dir("cache");
        write_png(&dir, "heart.png", 25, 25);

        let mut assets = AssetManager::new(&dir);
        let first = assets.load_image("heart.png").unwrap();
        let second = assets.load_image("heart.png").unwrap();

        assert_eq!(first, second);
        assert_eq!(assets.image_count(), 1);
        assert_eq!(assets.image_size(first), Some((25, 25)));
    }

    #[test]
    fn test_missing_image_is_error() {
        let dir = scratch_dir("missing");
        let mut assets = AssetManager::new(&dir);
        assert!(matches!(
            assets.load_image("bg1.png"),
            Err(AssetError::NotFound(_))
        ));
        assert_eq!(assets.image_count(), 0);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let dir = scratch_dir("garbage");
        std::fs::write(dir.join("broken.png"), b"definitely not a png").unwrap();

        let mut assets = AssetManager::new(&dir);
        assert!(matches!(
            assets.load_image("broken.png"),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn test_sprite_sheet_size_check() {
        let dir = scratch_dir("sheet");
        write_png(&dir, "wide.png", 240, 36);
        write_png(&dir, "narrow.png", 200, 36);

        let mut assets = AssetManager::new(&dir);
        assert!(assets.load_sprite_sheet("wide.png", (240, 36)).is_ok());
        assert!(matches!(
            assets.load_sprite_sheet("narrow.png", (240, 36)),
            Err(AssetError::SheetTooSmall { actual: (200, 36), .. })
        ));
    }
}
