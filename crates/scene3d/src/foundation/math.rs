//! Math utilities and types
//!
//! Provides the fundamental math types for the 3D scene layer: vector and
//! matrix aliases over nalgebra, the model/view/projection matrix builders,
//! axis-aligned bounding boxes, and the dirty-tracked pose transform owned
//! by every renderable.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat4 with the matrix builders the render pipeline needs
pub trait Mat4Ext {
    /// Create a right-handed look-at view matrix (OpenGL conventions).
    fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4;

    /// Create an OpenGL perspective projection matrix (depth mapped to -1..1).
    ///
    /// `fov_y` is the vertical field of view in **degrees**, matching how the
    /// camera stores it.
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a model matrix from a position, yaw/pitch/roll (degrees) and a
    /// uniform scale.
    ///
    /// Composition is translation * rotation * scale, with the rotation built
    /// from a quaternion over **negated** angles in Y -> X -> Z order. The
    /// negation is the rotation convention the rest of the pipeline (and its
    /// assets) were authored against; do not "fix" it.
    fn model_from_pose(position: Vec3, yaw: f32, pitch: f32, roll: f32, scale: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(center), &up)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (utils::deg_to_rad(fov_y) * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = f / aspect;
        result[(1, 1)] = f;
        result[(2, 2)] = (far + near) / (near - far);
        result[(2, 3)] = (2.0 * far * near) / (near - far);
        result[(3, 2)] = -1.0;
        result
    }

    fn model_from_pose(position: Vec3, yaw: f32, pitch: f32, roll: f32, scale: f32) -> Mat4 {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(-yaw))
            * Quat::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(-pitch))
            * Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(-roll));

        Mat4::new_translation(&position) * rotation.to_homogeneous() * Mat4::new_scaling(scale)
    }
}

/// Axis-aligned bounding box in local or world space.
///
/// `min <= max` holds component-wise once the box has been computed from at
/// least one point; a default box is collapsed at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec3::zeros(),
            max: Vec3::zeros(),
        }
    }
}

impl Aabb {
    /// Creates an AABB from `min`/`max` corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Computes the envelope of a point set in one linear scan.
    ///
    /// Returns `None` for an empty set; a box over zero points has no
    /// meaningful corners.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut min = first;
        let mut max = first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Box center.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Width, height and depth as a vector.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The eight corners, in the fixed order the visibility tests iterate.
    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
        ]
    }

    /// Returns the axis-aligned envelope of this box transformed by `matrix`.
    ///
    /// All eight corners go through the matrix and a new min/max envelope is
    /// derived. For rotated boxes the result is loose on purpose; it is an
    /// envelope, not an oriented box.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        let corners = self
            .corners()
            .map(|c| matrix.transform_point(&Point3::from(c)).coords);

        // Eight points, never empty.
        Self::from_points(corners).unwrap_or_default()
    }
}

/// Pose transform owned by each renderable: position, yaw/pitch/roll in
/// degrees, and a uniform scale.
///
/// Every mutator raises the dirty flag; only the owning renderable clears it
/// after it has recomputed its derived matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,
    scale: f32,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            scale: 1.0,
            dirty: true,
        }
    }
}

impl Transform {
    /// Identity pose at the origin, marked dirty so the first frame computes
    /// matrices.
    pub fn identity() -> Self {
        Self::default()
    }

    /// 3D position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Roll in degrees.
    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Uniform scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the full 3D position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Set only the x/y position, keeping z.
    pub fn set_position_xy(&mut self, x: f32, y: f32) {
        self.position.x = x;
        self.position.y = y;
        self.dirty = true;
    }

    /// Set only the z position.
    pub fn set_position_z(&mut self, z: f32) {
        self.position.z = z;
        self.dirty = true;
    }

    /// Set yaw, pitch and roll together (degrees).
    pub fn set_yaw_pitch_roll(&mut self, yaw: f32, pitch: f32, roll: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
        self.dirty = true;
    }

    /// Set yaw in degrees.
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.dirty = true;
    }

    /// Set pitch in degrees.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        self.dirty = true;
    }

    /// Set roll in degrees.
    pub fn set_roll(&mut self, roll: f32) {
        self.roll = roll;
        self.dirty = true;
    }

    /// Set the uniform scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Whether any mutator ran since the last [`Self::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after derived matrices have been recomputed.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Model matrix for this pose, offset by the parent layer's position.
    pub fn model_matrix(&self, parent_offset: Vec2) -> Mat4 {
        let position = Vec3::new(
            self.position.x + parent_offset.x,
            self.position.y + parent_offset.y,
            self.position.z,
        );
        Mat4::model_from_pose(position, self.yaw, self.pitch, self.roll, self.scale)
    }
}
