//! Phong light sources and the fixed-size uniform bank
//!
//! A scene layer owns up to [`MAX_LIGHTS`] lights. Each renderable either
//! mirrors the layer's lights, carries its own custom list, or falls back to
//! the single built-in default light. The resolved lights live in a
//! fixed-size [`LightBank`] whose parallel arrays are uploaded to the shader
//! as five uniform-array writes per draw.

use crate::foundation::math::Vec3;
use crate::scene::SceneLayer;

use super::device::{ProgramHandle, RenderDevice};

/// Maximum number of concurrently active lights.
pub const MAX_LIGHTS: usize = 4;

/// Ambient color of the built-in default light.
pub const DEFAULT_LIGHT_AMBIENT: [f32; 3] = [0.0, 0.0, 0.0];
/// Diffuse color of the built-in default light.
pub const DEFAULT_LIGHT_DIFFUSE: [f32; 3] = [1.0, 1.0, 1.0];
/// Position of the built-in default light.
pub const DEFAULT_LIGHT_POSITION: [f32; 3] = [2400.0, 852.0, 1472.0];
/// Intensity of the built-in default light.
pub const DEFAULT_LIGHT_INTENSITY: f32 = 1.0;

/// A Phong light source.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Ambient color contribution
    pub ambient: Vec3,
    /// Diffuse color contribution
    pub diffuse: Vec3,
    /// Specular color contribution (material specular is applied at draw
    /// time; this is carried for hosts that want it)
    pub specular: Vec3,
    /// Scalar intensity multiplier
    pub intensity: f32,
    /// Position in world space
    pub position: Vec3,
    /// Whether the light contributes this frame
    pub enabled: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            ambient: Vec3::zeros(),
            diffuse: Vec3::zeros(),
            specular: Vec3::zeros(),
            intensity: 1.0,
            position: Vec3::zeros(),
            enabled: true,
        }
    }
}

impl Light {
    /// A white point-style light at `position`.
    pub fn white(position: Vec3) -> Self {
        Self {
            diffuse: Vec3::new(1.0, 1.0, 1.0),
            position,
            ..Self::default()
        }
    }
}

/// Where a renderable takes its lights from.
///
/// The selection is a tagged variant with one resolution path rather than a
/// chain of boolean flags, so the priority between the three modes cannot
/// drift.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LightSource {
    /// Always use the built-in default light.
    Default,
    /// Mirror the owning layer's lights; falls back to the default light
    /// (installed exactly once) while the layer has none.
    #[default]
    Mirrored,
    /// Use an explicit light list, ignoring the layer entirely.
    Custom(Vec<Light>),
}

/// Fixed-size parallel arrays mirroring the shader's light uniforms.
///
/// Unset slots stay zeroed/disabled. The arrays are only rewritten when the
/// resolved source changes; the uniform upload itself happens every draw.
#[derive(Debug, Clone, Default)]
pub struct LightBank {
    enabled: [i32; MAX_LIGHTS],
    ambient: [[f32; 3]; MAX_LIGHTS],
    diffuse: [[f32; 3]; MAX_LIGHTS],
    position: [[f32; 3]; MAX_LIGHTS],
    intensity: [f32; MAX_LIGHTS],
    default_installed: bool,
    loaded: bool,
}

impl LightBank {
    /// Zero every slot and disable every light.
    pub fn clear(&mut self) {
        *self = Self {
            default_installed: self.default_installed,
            loaded: self.loaded,
            ..Self::default()
        };
    }

    /// Forget any previously resolved state, forcing the next refresh to
    /// rebuild the arrays (used after GPU context loss).
    pub fn invalidate(&mut self) {
        self.clear();
        self.default_installed = false;
        self.loaded = false;
    }

    /// Whether the built-in default light currently occupies slot 0.
    pub fn default_installed(&self) -> bool {
        self.default_installed
    }

    /// Copy up to [`MAX_LIGHTS`] lights into the arrays. Light positions are
    /// scaled by the renderable's model scale so they stay proportionate to
    /// the scaled geometry.
    pub fn load(&mut self, lights: &[Light], scale: f32) {
        self.clear();

        for (i, light) in lights.iter().take(MAX_LIGHTS).enumerate() {
            self.ambient[i] = [light.ambient.x, light.ambient.y, light.ambient.z];
            self.diffuse[i] = [light.diffuse.x, light.diffuse.y, light.diffuse.z];
            self.intensity[i] = light.intensity;
            self.position[i] = [
                light.position.x * scale,
                light.position.y * scale,
                light.position.z * scale,
            ];
            if light.enabled {
                self.enabled[i] = 1;
            }
        }

        self.loaded = true;
    }

    fn install_default(&mut self) {
        self.clear();
        self.ambient[0] = DEFAULT_LIGHT_AMBIENT;
        self.diffuse[0] = DEFAULT_LIGHT_DIFFUSE;
        self.position[0] = DEFAULT_LIGHT_POSITION;
        self.intensity[0] = DEFAULT_LIGHT_INTENSITY;
        self.enabled[0] = 1;
        self.default_installed = true;
        self.loaded = true;
        log::debug!("installed default light");
    }

    /// Resolve `source` against the owning layer and rebuild the arrays if
    /// the resolved lights changed.
    ///
    /// For [`LightSource::Mirrored`]: a layer with no lights gets the
    /// default light installed exactly once; otherwise the arrays are
    /// re-copied while the layer's light set is marked dirty (the dirty
    /// flag is cleared after the copy) or when this bank has never loaded.
    /// The layer's flag is shared between observers, so a bank created
    /// after another consumed it still needs its first copy.
    pub fn refresh(&mut self, source: &LightSource, layer: &mut SceneLayer, scale: f32) {
        match source {
            LightSource::Custom(lights) => {
                self.default_installed = false;
                self.load(lights, scale);
            }
            LightSource::Default => {
                if !self.default_installed {
                    self.install_default();
                }
            }
            LightSource::Mirrored => {
                if !layer.has_lights() && !self.default_installed {
                    self.install_default();
                    layer.clean_dirty_lights();
                } else if layer.has_lights() && (layer.lights_dirty() || !self.loaded) {
                    self.default_installed = false;
                    self.load(layer.lights(), scale);
                    layer.clean_dirty_lights();
                }
            }
        }
    }

    /// Upload the five uniform arrays to the shader.
    pub fn upload(&self, device: &mut dyn RenderDevice, program: ProgramHandle) {
        device.set_uniform_i32_array(program, "u_light_enabled", &self.enabled);
        device.set_uniform_vec3_array(program, "u_light_ambient", &self.ambient);
        device.set_uniform_vec3_array(program, "u_light_diffuse", &self.diffuse);
        device.set_uniform_vec3_array(program, "u_light_position", &self.position);
        device.set_uniform_f32_array(program, "u_light_intensity", &self.intensity);
    }
}
