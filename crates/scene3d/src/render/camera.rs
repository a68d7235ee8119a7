//! Perspective camera with lazy matrix derivation
//!
//! The camera owns its eye/center/up vectors and projection parameters and
//! derives the view and projection matrices lazily, each behind its own
//! dirty flag. Dependents do not consume those flags; they compare against a
//! monotonically increasing generation counter, so any number of renderables
//! can independently answer "has the camera changed since *I* last looked".

use crate::foundation::math::{Aabb, Mat4, Mat4Ext, Vec3};

use super::frustum::{CullPlanes, Frustum};

/// Perspective camera owned by a scene layer (one per layer).
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    center: Vec3,
    up: Vec3,

    /// Vertical field of view in degrees
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,

    view: Mat4,
    projection: Mat4,
    view_dirty: bool,
    projection_dirty: bool,

    /// Bumped by every mutation; observers store the value they last saw.
    generation: u64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            center: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            view_dirty: true,
            projection_dirty: true,
            generation: 1,
        }
    }
}

impl Camera {
    /// Camera with explicit projection parameters, at the default pose.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            ..Self::default()
        }
    }

    /// Camera set up for a 2D host viewport: eye centered over the layer at
    /// `eye_z`, looking straight down the z axis at the layer plane, with
    /// the far plane at twice the eye distance.
    pub fn for_viewport(width: f32, height: f32, eye_z: f32) -> Self {
        Self {
            eye: Vec3::new(width / 2.0, height / 2.0, eye_z),
            center: Vec3::new(width / 2.0, height / 2.0, 0.0),
            fov: 60.0,
            aspect: width / height,
            near: 0.1,
            far: eye_z * 2.0,
            ..Self::default()
        }
    }

    fn mutated_view(&mut self) {
        self.view_dirty = true;
        self.generation += 1;
    }

    fn mutated_projection(&mut self) {
        self.projection_dirty = true;
        self.generation += 1;
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.eye
    }

    /// Look-at target.
    pub fn look_target(&self) -> Vec3 {
        self.center
    }

    /// Move the eye.
    pub fn set_position(&mut self, position: Vec3) {
        self.eye = position;
        self.mutated_view();
        log::trace!("camera position -> {:?}", position);
    }

    /// Move the eye in x/y only, keeping its distance from the layer.
    pub fn set_position_xy(&mut self, x: f32, y: f32) {
        self.eye.x = x;
        self.eye.y = y;
        self.mutated_view();
    }

    /// Aim the camera at a point.
    pub fn look_at(&mut self, target: Vec3) {
        self.center = target;
        self.mutated_view();
        log::trace!("camera target -> {:?}", target);
    }

    /// Aim at a 2D point on the layer plane, keeping the target depth.
    pub fn look_at_xy(&mut self, x: f32, y: f32) {
        self.center.x = x;
        self.center.y = y;
        self.mutated_view();
    }

    /// Set the camera's up vector.
    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
        self.mutated_view();
    }

    /// Set the vertical field of view in degrees.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.mutated_projection();
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.mutated_projection();
    }

    /// Set the near clip distance.
    pub fn set_near(&mut self, near: f32) {
        self.near = near;
        self.mutated_projection();
    }

    /// Set the far clip distance.
    pub fn set_far(&mut self, far: f32) {
        self.far = far;
        self.mutated_projection();
    }

    /// Set both clip distances.
    pub fn set_near_far(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.mutated_projection();
    }

    /// Set every projection parameter at once.
    pub fn set_projection(&mut self, fov: f32, aspect: f32, near: f32, far: f32) {
        self.fov = fov;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
        self.mutated_projection();
    }

    /// View matrix; recomputes and clears the view dirty flag on first read
    /// after a mutation.
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.view_dirty {
            self.view = Mat4::look_at(self.eye, self.center, self.up);
            self.view_dirty = false;
        }
        self.view
    }

    /// Projection matrix; recomputes and clears the projection dirty flag on
    /// first read after a mutation.
    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.projection_dirty {
            self.projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
            self.projection_dirty = false;
        }
        self.projection
    }

    /// Whether either derived matrix is pending recomputation.
    pub fn is_dirty(&self) -> bool {
        self.view_dirty || self.projection_dirty
    }

    /// Current mutation generation. Observers store this after integrating
    /// the camera state.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the camera mutated since an observer last saw `generation`.
    pub fn changed_since(&self, generation: u64) -> bool {
        self.generation != generation
    }

    /// Frustum-cull a world-space AABB.
    ///
    /// Derives the frustum from the current `projection * view`; callers
    /// that batch many queries against an unchanged camera should hoist the
    /// [`Frustum`] themselves.
    pub fn is_object_visible(&mut self, world_aabb: &Aabb, mode: CullPlanes) -> bool {
        let vp = self.projection_matrix() * self.view_matrix();
        Frustum::from_view_projection(&vp).is_aabb_visible(world_aabb, mode)
    }
}
