//! # scene3d
//!
//! A 3D scene extension layered over a 2D game engine host: mesh models,
//! billboards, Phong lights and a frustum-culling camera rendered into an
//! otherwise 2D scene graph.
//!
//! ## What lives here
//!
//! - **Geometry parsing**: a wavefront-style text loader producing flat,
//!   de-indexed vertex streams grouped by material ([`assets`])
//! - **Transform math**: model/view/projection builders, AABB transforms,
//!   and the dirty-tracked pose every renderable owns ([`foundation::math`])
//! - **Camera and frustum**: lazy matrix derivation behind per-matrix dirty
//!   flags, a generation counter for per-observer change tracking, and the
//!   per-corner visibility test ([`render::camera`], [`render::frustum`])
//! - **Renderables**: [`render::MeshModel`] and [`render::Billboard`],
//!   sharing one transform/visibility/lighting pipeline by composition
//! - **Geometry cache**: GPU buffer deduplication by asset id with an
//!   explicit context-loss invalidate-and-rebuild path
//!
//! The GPU API, shader program storage and texture decoding are
//! collaborators consumed through the traits in [`render::device`]; the
//! host implements them over its GL context and injects them per frame
//! through [`render::FrameContext`]. Everything runs synchronously on the
//! thread that owns the graphics context, driven by one external call per
//! frame.
//!
//! ## Sketch
//!
//! ```no_run
//! use scene3d::prelude::*;
//!
//! # fn host(device: &mut dyn RenderDevice, shaders: &dyn ShaderCache) -> Result<(), RenderError> {
//! let mut geometry = GeometryCache::new();
//! let mut layer = SceneLayer::new(Camera::for_viewport(960.0, 640.0, 800.0));
//! let render_cache = RenderCache::new();
//!
//! let mesh = "v 0 0 0\nv 1 0 0\nv 0 1 0\nus red\nf 1 2 3\n";
//! let materials = "ne red\nKd 1 0 0\nKs 0 0 0\n";
//! let mut model = MeshModel::from_sources(
//!     "tri", mesh, materials, 1.0, None, shaders, device, &mut geometry,
//! )?;
//! model.state.culling = Some(CullPlanes::All);
//!
//! // once per frame, on the render thread:
//! let mut frame = FrameContext {
//!     device,
//!     shaders,
//!     layer: &mut layer,
//!     render_cache: &render_cache,
//!     delta_time: 1.0 / 60.0,
//! };
//! model.draw(&mut frame);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for pipeline users
pub mod prelude {
    pub use crate::assets::{MeshData, MeshParser, ParseError};
    pub use crate::config::{ConfigError, CullMode, RenderSettings};
    pub use crate::foundation::math::{Aabb, Mat4, Mat4Ext, Transform, Vec2, Vec3, Vec4};
    pub use crate::render::{
        Billboard, Camera, CullPlanes, DrawOutcome, FrameContext, Frustum, FrustumPlane,
        GeometryCache, Light, LightSource, MeshModel, ProgramHandle, RenderDevice, RenderError,
        ShaderCache, ShaderKey, TextureHandle, TextureProvider, MAX_LIGHTS,
    };
    pub use crate::scene::{RenderCache, SceneLayer, SHADOW_MAP_KEY};
}
