//! GPU buffer cache keyed by asset identity
//!
//! Deduplicates buffer allocation and upload across renderables: the first
//! reference to an asset id allocates three buffers (positions, normals,
//! texels), every later reference gets the same handles back without
//! re-uploading. The cache owns buffer lifetime; renderables hold handles
//! only and never free them directly.
//!
//! When the GPU context is lost (e.g. the app returns to the foreground),
//! the host marks the cache invalid; the next renderable to notice purges
//! everything with [`GeometryCache::invalidate_all`] and re-registers its
//! geometry.

use std::collections::HashMap;

use super::device::{BufferHandle, RenderDevice};

/// The three buffers backing one asset's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VboSet {
    /// Flattened per-corner positions
    pub vertices: BufferHandle,
    /// Flattened per-corner normals
    pub normals: BufferHandle,
    /// Flattened per-corner texture coordinates
    pub texels: BufferHandle,
}

/// Process-wide cache of geometry buffers by asset id.
#[derive(Debug, Default)]
pub struct GeometryCache {
    vbos: HashMap<String, VboSet>,
    invalidated: bool,
}

impl GeometryCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the buffer set for `id`, allocating one on first reference.
    ///
    /// Returns the set and whether it already existed; a fresh set has no
    /// data until [`Self::upload`] runs.
    pub fn get_or_create(&mut self, device: &mut dyn RenderDevice, id: &str) -> (VboSet, bool) {
        if let Some(set) = self.vbos.get(id) {
            return (*set, true);
        }

        let set = VboSet {
            vertices: device.create_buffer(),
            normals: device.create_buffer(),
            texels: device.create_buffer(),
        };
        self.vbos.insert(id.to_string(), set);
        log::debug!("geometry cache allocated buffers for {id:?}");

        (set, false)
    }

    /// Upload vertex streams into the buffers registered for `id`.
    ///
    /// A no-op for unknown ids; the texel upload is skipped when the stream
    /// is empty (untextured geometry).
    pub fn upload(
        &mut self,
        device: &mut dyn RenderDevice,
        id: &str,
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        texels: &[[f32; 2]],
    ) {
        let Some(set) = self.vbos.get(id) else {
            return;
        };

        device.upload_buffer(set.vertices, bytemuck::cast_slice(positions), false);
        device.upload_buffer(set.normals, bytemuck::cast_slice(normals), false);
        if !texels.is_empty() {
            device.upload_buffer(set.texels, bytemuck::cast_slice(texels), false);
        }
    }

    /// Release every tracked buffer and clear the map.
    ///
    /// Used when the GPU context has been lost and recreated; afterwards
    /// every renderable must re-run `get_or_create` + `upload` before its
    /// next draw.
    pub fn invalidate_all(&mut self, device: &mut dyn RenderDevice) {
        self.invalidated = false;

        for set in self.vbos.values() {
            device.delete_buffer(set.vertices);
            device.delete_buffer(set.normals);
            device.delete_buffer(set.texels);
        }

        log::debug!("geometry cache purged {} entries", self.vbos.len());
        self.vbos.clear();
    }

    /// Flag the cache as holding stale handles from a lost context.
    pub fn mark_context_lost(&mut self) {
        self.invalidated = true;
    }

    /// Whether a context-loss purge is pending.
    pub fn is_invalid(&self) -> bool {
        self.invalidated
    }
}
