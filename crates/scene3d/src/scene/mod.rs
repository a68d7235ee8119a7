//! Scene-side collaborator surface: the layer that owns the camera and
//! lights, and the per-scene cache of named shared textures.

pub mod layer;
pub mod render_cache;

pub use layer::SceneLayer;
pub use render_cache::{RenderCache, SHADOW_MAP_KEY};
