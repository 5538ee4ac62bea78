// Asset loading functionality

use super::AssetError;
use log::info;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Texture,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
        }
    }
}

/// Asset loader responsible for finding and loading asset files
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
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(asset_type, name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        Ok(std::fs::read(&path)?)
    }

    /// Load and decode an image
    pub fn load_image(&self, name: &str) -> Result<image::DynamicImage, AssetError> {
        let bytes = self.load_bytes(AssetType::Texture, name)?;
        let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            path: self.resolve_path(AssetType::Texture, name).display().to_string(),
            source,
        })?;

        info!("Loaded {} ({}x{})", name, image.width(), image.height());
        Ok(image)
    }
}
