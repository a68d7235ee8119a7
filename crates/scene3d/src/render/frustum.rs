//! View frustum extraction and visibility queries
//!
//! Six half-space planes derived from `projection * view` with the standard
//! row-combination identities. The frustum is stateless beyond the plane
//! coefficients; callers re-derive it whenever the camera may have changed.

use crate::foundation::math::{Aabb, Mat4, Vec3, Vec4};

/// The six frustum planes, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumPlane {
    /// Near clip plane
    Near = 0,
    /// Far clip plane
    Far,
    /// Bottom clip plane
    Bottom,
    /// Top clip plane
    Top,
    /// Left clip plane
    Left,
    /// Right clip plane
    Right,
}

/// Which planes an AABB visibility query tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullPlanes {
    /// Test all six planes (thorough).
    All,
    /// Test one designated plane only (cheap rough culling).
    One(FrustumPlane),
}

/// Six clip planes, each stored as `(nx, ny, nz, d)` with points inside
/// satisfying `dot(n, p) + d >= 0`.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract the planes from a combined `projection * view` matrix.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row = |r: usize| Vec4::new(vp[(r, 0)], vp[(r, 1)], vp[(r, 2)], vp[(r, 3)]);

        let r0 = row(0);
        let r1 = row(1);
        let r2 = row(2);
        let r3 = row(3);

        // Storage order matches FrustumPlane. GL clip space runs -w..w in
        // depth, so the near plane is r3 + r2.
        let mut planes = [
            r3 + r2, // near
            r3 - r2, // far
            r3 + r1, // bottom
            r3 - r1, // top
            r3 + r0, // left
            r3 - r0, // right
        ];

        for p in &mut planes {
            let len = Vec3::new(p.x, p.y, p.z).norm();
            if len > 1e-6 {
                *p /= len;
            }
        }

        Self { planes }
    }

    /// Signed distance from a point to one plane (positive is inside).
    fn distance(&self, plane: FrustumPlane, p: Vec3) -> f32 {
        let pl = self.planes[plane as usize];
        pl.x * p.x + pl.y * p.y + pl.z * p.z + pl.w
    }

    /// Whether a point lies inside all six planes.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.planes
            .iter()
            .all(|pl| pl.x * p.x + pl.y * p.y + pl.z * p.z + pl.w >= 0.0)
    }

    /// Whether a point lies inside one designated plane.
    pub fn point_inside_plane(&self, p: Vec3, plane: FrustumPlane) -> bool {
        self.distance(plane, p) >= 0.0
    }

    /// Per-corner AABB visibility: true if **any single corner** passes the
    /// query (all six planes in `All` mode, the one plane in `One` mode).
    ///
    /// This is deliberately permissive: a fully-inside box always tests
    /// visible, but a large box straddling the frustum with every corner
    /// outside can test invisible. That false-negative window is a known,
    /// accepted property of the pipeline; do not replace this with an exact
    /// box-plane intersection, which would change which objects render at
    /// the margins.
    pub fn is_aabb_visible(&self, aabb: &Aabb, mode: CullPlanes) -> bool {
        aabb.corners().iter().any(|&corner| match mode {
            CullPlanes::All => self.contains_point(corner),
            CullPlanes::One(plane) => self.point_inside_plane(corner, plane),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;

    fn view_projection(eye: Vec3, center: Vec3) -> Mat4 {
        let view = Mat4::look_at(eye, center, Vec3::new(0.0, 1.0, 0.0));
        let projection = Mat4::perspective(60.0, 16.0 / 9.0, 0.1, 1000.0);
        projection * view
    }

    #[test]
    fn box_in_front_of_camera_is_visible() {
        let vp = view_projection(Vec3::new(0.0, 0.0, 10.0), Vec3::zeros());
        let frustum = Frustum::from_view_projection(&vp);
        let unit_box = Aabb::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5));

        assert!(frustum.is_aabb_visible(&unit_box, CullPlanes::All));
    }

    #[test]
    fn box_behind_the_view_direction_is_not_visible() {
        // Same camera position, but looking far away from the box.
        let vp = view_projection(Vec3::new(0.0, 0.0, 10.0), Vec3::new(1000.0, 1000.0, 1000.0));
        let frustum = Frustum::from_view_projection(&vp);
        let unit_box = Aabb::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5));

        assert!(!frustum.is_aabb_visible(&unit_box, CullPlanes::All));
    }

    #[test]
    fn point_in_front_passes_all_planes() {
        let vp = view_projection(Vec3::new(0.0, 0.0, 10.0), Vec3::zeros());
        let frustum = Frustum::from_view_projection(&vp);

        assert!(frustum.contains_point(Vec3::zeros()));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 11.0)));
    }

    #[test]
    fn single_plane_query_only_tests_that_plane() {
        let vp = view_projection(Vec3::new(0.0, 0.0, 10.0), Vec3::zeros());
        let frustum = Frustum::from_view_projection(&vp);

        // A point far beyond the far plane still passes a near-plane-only
        // query; rough culling trades accuracy for one plane test.
        let beyond_far = Vec3::new(0.0, 0.0, -5000.0);
        assert!(frustum.point_inside_plane(beyond_far, FrustumPlane::Near));
        assert!(!frustum.point_inside_plane(beyond_far, FrustumPlane::Far));
    }

    #[test]
    fn any_corner_semantics_accept_a_partially_visible_box() {
        let vp = view_projection(Vec3::new(0.0, 0.0, 10.0), Vec3::zeros());
        let frustum = Frustum::from_view_projection(&vp);

        // One corner near the origin is inside; the rest extend far left.
        let straddling = Aabb::new(Vec3::new(-500.0, -0.5, -0.5), Vec3::new(0.0, 0.5, 0.5));
        assert!(frustum.is_aabb_visible(&straddling, CullPlanes::All));
    }
}
