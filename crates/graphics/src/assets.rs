use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;

use crate::{codec, GraphicsError, Texture, TextureConfig};

/// Loads textures from a root directory, once per path.
///
/// Textures are handed out as shared handles. A texture's memory is released
/// when the cache and every handle to it have been dropped.
pub struct AssetCache {
    root: PathBuf,
    config: TextureConfig,
    textures: RwLock<HashMap<PathBuf, Arc<Texture>>>,
}

impl AssetCache {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: TextureConfig) -> Self {
        Self {
            root: root.into(),
            config,
            textures: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the texture at `path` (relative to the cache root), decoding
    /// it on first use.
    pub fn texture(&self, path: impl AsRef<Path>) -> Result<Arc<Texture>, GraphicsError> {
        let path = self.root.join(path);

        if let Some(texture) = self.textures.read().get(&path) {
            return Ok(texture.clone());
        }

        let pixels = codec::load_png(&path)?;
        let texture = Arc::new(Texture::with_config(pixels, &self.config));
        tracing::info!(
            path = %path.display(),
            width = texture.width(),
            height = texture.height(),
            "loaded texture"
        );

        // Another caller may have loaded the same file in the meantime; keep
        // whichever landed first so every handle refers to one texture.
        let mut textures = self.textures.write();
        Ok(textures.entry(path).or_insert(texture).clone())
    }

    /// Adds an already decoded texture under `path`, replacing any previous
    /// entry.
    pub fn insert(&self, path: impl AsRef<Path>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures
            .write()
            .insert(self.root.join(path), texture.clone());
        texture
    }

    /// Drops the cache's handle to the texture at `path`. Returns true if it
    /// was cached.
    pub fn evict(&self, path: impl AsRef<Path>) -> bool {
        self.textures.write().remove(&self.root.join(path)).is_some()
    }

    pub fn clear(&self) {
        self.textures.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.read().is_empty()
    }
}
