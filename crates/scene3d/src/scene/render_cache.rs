//! Per-scene cache of named shared textures
//!
//! Renderables look up auxiliary textures by well-known string keys; the
//! shadow-map provider is simply whoever stored a texture under
//! [`SHADOW_MAP_KEY`]. Handles are opaque: the texture provider that minted
//! them owns the GPU resources, the cache only shares them by name.

use std::collections::HashMap;

use crate::render::device::TextureHandle;

/// Key under which the scene's shadow map texture is published.
pub const SHADOW_MAP_KEY: &str = "shadow_map";

/// Named shared-texture map, owned by the scene.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    textures: HashMap<String, TextureHandle>,
}

impl RenderCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a texture under `key`, replacing any previous entry.
    pub fn add_texture(&mut self, key: impl Into<String>, texture: TextureHandle) {
        let key = key.into();
        if self.textures.insert(key.clone(), texture).is_some() {
            log::debug!("render cache replaced texture under {key:?}");
        }
    }

    /// Remove the texture under `key`, if present.
    pub fn remove_texture(&mut self, key: &str) {
        self.textures.remove(key);
    }

    /// Look up a texture by key.
    pub fn texture(&self, key: &str) -> Option<TextureHandle> {
        self.textures.get(key).copied()
    }

    /// The scene's shadow map, if one has been published.
    pub fn shadow_map(&self) -> Option<TextureHandle> {
        self.texture(SHADOW_MAP_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_get_remove_round_trip() {
        let mut cache = RenderCache::new();
        cache.add_texture("glow", TextureHandle(7));

        assert_eq!(cache.texture("glow"), Some(TextureHandle(7)));
        cache.remove_texture("glow");
        assert_eq!(cache.texture("glow"), None);
    }

    #[test]
    fn shadow_map_uses_the_fixed_key() {
        let mut cache = RenderCache::new();
        assert_eq!(cache.shadow_map(), None);

        cache.add_texture(SHADOW_MAP_KEY, TextureHandle(3));
        assert_eq!(cache.shadow_map(), Some(TextureHandle(3)));
    }

    #[test]
    fn adding_under_an_existing_key_replaces() {
        let mut cache = RenderCache::new();
        cache.add_texture("glow", TextureHandle(1));
        cache.add_texture("glow", TextureHandle(2));

        assert_eq!(cache.texture("glow"), Some(TextureHandle(2)));
    }
}
