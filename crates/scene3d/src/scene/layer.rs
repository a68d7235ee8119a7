//! Scene layer: the host-facing owner of the 3D camera and light list
//!
//! A layer owns exactly one camera and up to [`MAX_LIGHTS`] lights, and
//! supplies the parent-relative position offset its child renderables fold
//! into their model matrices. Light mutation must happen outside the
//! per-object draw traversal (at frame start), so children never observe a
//! half-updated light set mid-frame.

use crate::foundation::math::{Vec2, Vec3};
use crate::render::camera::Camera;
use crate::render::lighting::{Light, MAX_LIGHTS};

/// A 2D host layer extended with a camera and lights.
#[derive(Debug, Clone)]
pub struct SceneLayer {
    camera: Camera,
    lights: Vec<Light>,
    lights_dirty: bool,
    /// When false, lights follow the layer as it moves.
    fixed_lights: bool,
    position: Vec2,
}

impl Default for SceneLayer {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            lights: Vec::new(),
            lights_dirty: false,
            fixed_lights: true,
            position: Vec2::zeros(),
        }
    }
}

impl SceneLayer {
    /// Layer with the given camera, no lights, fixed lighting.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    /// The layer's camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access (matrix reads are lazy and need `&mut`).
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Replace the layer's camera.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// The active lights, in insertion order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Whether any lights are installed.
    pub fn has_lights(&self) -> bool {
        !self.lights.is_empty()
    }

    /// Add a light. The layer holds at most [`MAX_LIGHTS`]; extras are
    /// rejected with a warning.
    pub fn add_light(&mut self, light: Light) {
        if self.lights.len() == MAX_LIGHTS {
            log::warn!("layer already holds {MAX_LIGHTS} lights; ignoring");
            return;
        }

        self.lights.push(light);
        self.lights_dirty = true;
    }

    /// Remove the light at `index`, if present.
    pub fn remove_light(&mut self, index: usize) {
        if index < self.lights.len() {
            self.lights.remove(index);
            self.lights_dirty = true;
        }
    }

    /// Remove every light.
    pub fn remove_all_lights(&mut self) {
        self.lights.clear();
        self.lights_dirty = true;
    }

    /// Mutate a light in place; marks the set dirty.
    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights_dirty = true;
        self.lights.get_mut(index)
    }

    /// Whether mirrored renderables must re-copy the light set.
    pub fn lights_dirty(&self) -> bool {
        self.lights_dirty
    }

    /// Clear the dirty flag after a mirrored renderable consumed the set.
    pub fn clean_dirty_lights(&mut self) {
        self.lights_dirty = false;
    }

    /// When fixed (the default), lights stay in world space as the layer
    /// moves; otherwise they follow the layer.
    pub fn set_fixed_lights(&mut self, fixed: bool) {
        self.fixed_lights = fixed;
    }

    /// Layer position; children fold this into their model translation.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the layer. With non-fixed lights the whole light set shifts by
    /// the movement delta and is marked dirty.
    pub fn set_position(&mut self, position: Vec2) {
        let delta = position - self.position;
        self.position = position;

        if !self.fixed_lights && delta != Vec2::zeros() {
            for light in &mut self.lights {
                light.position += Vec3::new(delta.x, delta.y, 0.0);
            }
            self.lights_dirty = true;
        }
    }
}
