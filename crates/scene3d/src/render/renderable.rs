//! Shared per-object draw state
//!
//! `MeshModel` and `Billboard` share one transform/visibility/lighting
//! pipeline by embedding [`RenderableState`]: the pose transform, the cached
//! model/model-view/MVP/normal matrices, the world-space bounding box, the
//! camera generation watermark, and the resolved light bank. The concrete
//! renderables add geometry, textures and the actual draw calls on top.

use crate::foundation::math::{Aabb, Mat4, Transform};
use crate::scene::SceneLayer;

use super::device::{ProgramHandle, RenderDevice, ShaderCache, ShaderKey, VertexAttribute};
use super::frustum::CullPlanes;
use super::lighting::{LightBank, LightSource};

/// The matrices recomputed when a renderable or its camera changes.
#[derive(Debug, Clone)]
pub struct Matrices {
    /// Local-to-world transform
    pub model: Mat4,
    /// Model-view transform
    pub model_view: Mat4,
    /// Full model-view-projection transform
    pub mvp: Mat4,
    /// Inverse-transpose of model-view, for normal transformation
    pub normal: Mat4,
}

impl Default for Matrices {
    fn default() -> Self {
        Self {
            model: Mat4::identity(),
            model_view: Mat4::identity(),
            mvp: Mat4::identity(),
            normal: Mat4::identity(),
        }
    }
}

/// Outcome of one per-frame draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The object issued its draw calls.
    Drawn,
    /// The object was frustum-culled and touched nothing.
    Culled,
}

/// Draw-time state shared by every renderable.
#[derive(Debug, Clone, Default)]
pub struct RenderableState {
    /// Pose owned by the renderable; mutators raise its dirty flag.
    pub transform: Transform,
    /// Light selection policy.
    pub light_source: LightSource,
    /// `None` disables culling; `Some` selects the plane mode.
    pub culling: Option<CullPlanes>,
    /// Draw line lists instead of filled primitives.
    pub wireframe: bool,
    /// Render a wireframe bounding-box overlay after the object.
    pub show_bounds: bool,
    /// Uniform alpha in 0..1.
    pub opacity: f32,

    matrices: Matrices,
    world_aabb: Aabb,
    camera_generation: u64,
    lights: LightBank,
}

impl RenderableState {
    /// State with default pose, mirrored lights, culling off, opaque.
    pub fn new() -> Self {
        Self {
            opacity: 1.0,
            ..Self::default()
        }
    }

    /// Cached matrices from the last refresh.
    pub fn matrices(&self) -> &Matrices {
        &self.matrices
    }

    /// World-space bounding box from the last refresh.
    pub fn world_aabb(&self) -> &Aabb {
        &self.world_aabb
    }

    /// Forget resolved light state (used after GPU context loss so the next
    /// refresh rebuilds and re-uploads the bank).
    pub fn invalidate_lights(&mut self) {
        self.lights.invalidate();
    }

    /// Recompute matrices and the world AABB if the transform mutated or
    /// the camera changed since this object last looked.
    ///
    /// Returns whether a refresh happened. The camera generation is the
    /// per-observer dirty signal: each renderable records the generation it
    /// integrated, so one object consuming the change never hides it from
    /// the others.
    pub fn refresh_matrices(&mut self, local_aabb: &Aabb, layer: &mut SceneLayer) -> bool {
        let camera_changed = layer.camera().changed_since(self.camera_generation);
        if !self.transform.is_dirty() && !camera_changed {
            return false;
        }

        let model = self.transform.model_matrix(layer.position());
        let view = layer.camera_mut().view_matrix();
        let projection = layer.camera_mut().projection_matrix();

        let model_view = view * model;
        let normal = model_view
            .try_inverse()
            .map_or_else(Mat4::identity, |inv| inv.transpose());

        self.matrices = Matrices {
            model,
            model_view,
            mvp: projection * model_view,
            normal,
        };
        self.world_aabb = local_aabb.transform(&model);

        self.transform.clear_dirty();
        self.camera_generation = layer.camera().generation();
        true
    }

    /// Frustum visibility for this object, honoring the culling config.
    pub fn is_visible(&self, layer: &mut SceneLayer) -> bool {
        match self.culling {
            None => true,
            Some(mode) => layer.camera_mut().is_object_visible(&self.world_aabb, mode),
        }
    }

    /// Upload the cached matrices and opacity to the active program.
    pub fn upload_matrices(&self, device: &mut dyn RenderDevice, program: ProgramHandle) {
        device.set_uniform_mat4(program, "u_mvp_matrix", &mat_to_cols(&self.matrices.mvp));
        device.set_uniform_mat4(program, "u_mv_matrix", &mat_to_cols(&self.matrices.model_view));
        device.set_uniform_mat4(program, "u_normal_matrix", &mat_to_cols(&self.matrices.normal));
        device.set_uniform_f32(program, "u_alpha", self.opacity);
    }

    /// Resolve the light source against the layer and upload the bank.
    pub fn apply_lights(
        &mut self,
        layer: &mut SceneLayer,
        device: &mut dyn RenderDevice,
        program: ProgramHandle,
    ) {
        let scale = self.transform.scale();
        self.lights.refresh(&self.light_source, layer, scale);
        self.lights.upload(device, program);
    }

    /// Render the local bounding box as a 2D line rectangle through the
    /// flat-color program. A missing overlay program is a soft failure.
    pub fn draw_bounds_overlay(
        &self,
        device: &mut dyn RenderDevice,
        shaders: &dyn ShaderCache,
        local_aabb: &Aabb,
    ) {
        let Some(program) = shaders.program_for_key(ShaderKey::FlatColor) else {
            log::warn!("no flat-color program registered; skipping bounds overlay");
            return;
        };

        device.use_program(program);
        device.set_uniform_mat4(program, "u_mvp_matrix", &mat_to_cols(&self.matrices.mvp));

        let min = local_aabb.min;
        let max = local_aabb.max;
        let edges: [[f32; 2]; 8] = [
            [min.x, min.y],
            [min.x, max.y],
            [min.x, max.y],
            [max.x, max.y],
            [max.x, max.y],
            [max.x, min.y],
            [max.x, min.y],
            [min.x, min.y],
        ];

        device.bind_attribute_data(VertexAttribute::Position, 2, bytemuck::cast_slice(&edges));
        device.draw_arrays(super::device::DrawMode::Lines, 0, 8);
    }
}

/// Column-major matrix elements for uniform upload.
pub(crate) fn mat_to_cols(m: &Mat4) -> [f32; 16] {
    let mut cols = [0.0; 16];
    cols.copy_from_slice(m.as_slice());
    cols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn refresh_skips_when_nothing_changed() {
        let mut layer = SceneLayer::default();
        let mut state = RenderableState::new();
        let local = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(state.refresh_matrices(&local, &mut layer));
        assert!(!state.refresh_matrices(&local, &mut layer));

        state.transform.set_yaw(10.0);
        assert!(state.refresh_matrices(&local, &mut layer));
    }

    #[test]
    fn camera_mutation_triggers_refresh_for_every_observer() {
        let mut layer = SceneLayer::default();
        let mut a = RenderableState::new();
        let mut b = RenderableState::new();
        let local = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        a.refresh_matrices(&local, &mut layer);
        b.refresh_matrices(&local, &mut layer);

        layer.camera_mut().set_fov(80.0);

        // Both objects see the change even though A refreshes first.
        assert!(a.refresh_matrices(&local, &mut layer));
        assert!(b.refresh_matrices(&local, &mut layer));
    }

    #[test]
    fn world_aabb_recenters_on_the_object_position() {
        let mut layer = SceneLayer::default();
        let mut state = RenderableState::new();
        let local = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        state.transform.set_position(Vec3::new(5.0, 0.0, 0.0));
        state.transform.set_yaw(90.0);
        state.refresh_matrices(&local, &mut layer);

        let center = state.world_aabb().center();
        assert_relative_eq!(center.x, 5.0, epsilon = 1e-4);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(center.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn layer_offset_shifts_the_model_translation() {
        let mut layer = SceneLayer::default();
        layer.set_position(crate::foundation::math::Vec2::new(100.0, 50.0));
        let mut state = RenderableState::new();
        let local = Aabb::default();

        state.refresh_matrices(&local, &mut layer);
        let model = &state.matrices().model;

        assert_relative_eq!(model[(0, 3)], 100.0);
        assert_relative_eq!(model[(1, 3)], 50.0);
    }

    #[test]
    fn culling_disabled_is_always_visible() {
        let mut layer = SceneLayer::default();
        layer.camera_mut().look_at(Vec3::new(1000.0, 1000.0, 1000.0));
        let mut state = RenderableState::new();
        let local = Aabb::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5));
        state.refresh_matrices(&local, &mut layer);

        assert!(state.is_visible(&mut layer));

        state.culling = Some(CullPlanes::All);
        assert!(!state.is_visible(&mut layer));
    }
}
