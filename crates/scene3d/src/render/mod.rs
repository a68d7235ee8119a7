//! The per-frame 3D render pipeline
//!
//! Everything that runs between "the host asks a layer's children to draw"
//! and the GL draw calls: the dirty-tracked camera and its frustum, the
//! light bank, the geometry buffer cache, and the two renderable variants
//! (mesh models and billboards). The GPU itself is reached only through the
//! collaborator traits in [`device`].

pub mod billboard;
pub mod camera;
pub mod device;
pub mod frustum;
pub mod geometry_cache;
pub mod lighting;
pub mod model;
pub mod renderable;

pub use billboard::Billboard;
pub use camera::Camera;
pub use device::{
    BufferHandle, DrawMode, ProgramHandle, RenderDevice, ShaderCache, ShaderKey, TextureHandle,
    TextureProvider, VertexAttribute,
};
pub use frustum::{CullPlanes, Frustum, FrustumPlane};
pub use geometry_cache::{GeometryCache, VboSet};
pub use lighting::{Light, LightBank, LightSource, MAX_LIGHTS};
pub use model::MeshModel;
pub use renderable::{DrawOutcome, RenderableState};

use thiserror::Error;

use crate::assets::ParseError;
use crate::scene::{RenderCache, SceneLayer};

/// Errors fatal to renderable construction or restoration.
///
/// Per-frame conditions (a culled object, a missing optional texture) are
/// never errors; they are silent and recoverable by design.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The shader cache has no program registered under the required key.
    #[error("shader program {0:?} is not registered")]
    ShaderMissing(ShaderKey),

    /// Geometry or material parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Everything a renderable needs for one draw, borrowed for the call.
///
/// All services are explicitly constructed by the host and injected here;
/// nothing in the pipeline reaches for process-global state.
pub struct FrameContext<'a> {
    /// GPU surface for this frame
    pub device: &'a mut dyn RenderDevice,
    /// Shader program storage
    pub shaders: &'a dyn ShaderCache,
    /// The layer owning the camera and lights
    pub layer: &'a mut SceneLayer,
    /// Per-scene named textures (shadow map lookup)
    pub render_cache: &'a RenderCache,
    /// Seconds since the previous frame
    pub delta_time: f32,
}
