// Asset management system
//
// Resolves sprite sheet identifiers to decoded images before gameplay starts.
// Any failure here is fatal: the game refuses to start with missing art.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, ImageHandle};
pub use loader::AssetLoader;
pub use manager::AssetManager;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Sprite sheet {name} is {actual:?} but needs at least {required:?}")]
    SheetTooSmall {
        name: String,
        required: (u32, u32),
        actual: (u32, u32),
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
