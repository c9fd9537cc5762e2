//! Look-at camera and the world-to-camera rotation.
//!
//! # Basis
//!
//! ```text
//! b3 = normalize(eye - center)   // points from the scene toward the eye
//! b1 = normalize(up x b3)        // screen right
//! b2 = normalize(b3 x b1)        // screen up
//! ```
//!
//! Every vertex is re-expressed as `(v.b1, v.b2, v.b3)`. This is a pure
//! rotation about the origin: the eye only orients the basis and does not
//! translate the scene. A larger camera-space z is nearer to the eye.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CameraError;
use crate::math::vec3::Vec3;
use crate::mesh::{CenteredMesh, ViewMesh};

/// Camera placement: where it sits, what it looks at, which way is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    /// Looking down -z at the origin with +y up, so camera space equals
    /// world space.
    fn default() -> Self {
        Self {
            eye: Vec3::FORWARD,
            center: Vec3::ZERO,
            up: Vec3::UP,
        }
    }
}

impl Camera {
    pub fn new(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        Self { eye, center, up }
    }

    /// Builds the orthonormal camera basis.
    ///
    /// Fails when `eye == center` or when `up` is parallel to the view
    /// direction, since either leaves the basis undefined.
    pub fn basis(&self) -> Result<CameraBasis, CameraError> {
        let b3 = (self.eye - self.center)
            .try_normalize()
            .ok_or(CameraError::CoincidentEyeCenter)?;
        let b1 = self
            .up
            .cross(b3)
            .try_normalize()
            .ok_or(CameraError::UpParallelToView)?;
        let b2 = b3.cross(b1).normalize();
        Ok(CameraBasis { b1, b2, b3 })
    }

    /// Rotates every vertex of `mesh` into camera space and recomputes
    /// face and vertex normals there.
    ///
    /// Always starts from the mesh's original snapshot, so calling it
    /// repeatedly with different cameras never accumulates rotations.
    pub fn view<'a>(&self, mesh: &'a CenteredMesh) -> Result<ViewMesh<'a>, CameraError> {
        let basis = self.basis()?;
        debug!(b1 = ?basis.b1, b2 = ?basis.b2, b3 = ?basis.b3, "Camera basis");

        let vertices = mesh
            .original_vertices()
            .iter()
            .map(|&v| basis.to_camera(v))
            .collect();
        Ok(ViewMesh::from_positions(mesh, vertices))
    }
}

/// Orthonormal frame derived from a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub b1: Vec3,
    pub b2: Vec3,
    pub b3: Vec3,
}

impl CameraBasis {
    /// Expresses a world-space point in this basis.
    #[inline]
    pub fn to_camera(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.b1), v.dot(self.b2), v.dot(self.b3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Face, MeshBuilder};
    use approx::assert_relative_eq;

    fn triangle_mesh() -> CenteredMesh {
        let mut builder = MeshBuilder::new();
        builder.add_vertex(Vec3::new(-1.0, -1.0, 0.0));
        builder.add_vertex(Vec3::new(1.0, -1.0, 0.0));
        builder.add_vertex(Vec3::new(0.0, 1.0, 0.5));
        builder.add_face(Face::new(0, 1, 2));
        builder.build().unwrap().center_align()
    }

    #[test]
    fn default_camera_is_identity() {
        let basis = Camera::default().basis().unwrap();
        assert_eq!(basis.b1, Vec3::RIGHT);
        assert_eq!(basis.b2, Vec3::UP);
        assert_eq!(basis.b3, Vec3::FORWARD);
    }

    #[test]
    fn basis_is_orthonormal() {
        let camera = Camera::new(Vec3::new(3.0, 2.0, -4.0), Vec3::new(0.5, 0.0, 0.0), Vec3::UP);
        let CameraBasis { b1, b2, b3 } = camera.basis().unwrap();
        for v in [b1, b2, b3] {
            assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-5);
        }
        assert_relative_eq!(b1.dot(b2), 0.0, epsilon = 1e-5);
        assert_relative_eq!(b1.dot(b3), 0.0, epsilon = 1e-5);
        assert_relative_eq!(b2.dot(b3), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn coincident_eye_and_center_is_rejected() {
        let camera = Camera::new(Vec3::ONE, Vec3::ONE, Vec3::UP);
        assert_eq!(camera.basis(), Err(CameraError::CoincidentEyeCenter));
        assert!(matches!(
            camera.view(&triangle_mesh()),
            Err(CameraError::CoincidentEyeCenter)
        ));
    }

    #[test]
    fn up_parallel_to_view_is_rejected() {
        let camera = Camera::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::UP);
        assert_eq!(camera.basis(), Err(CameraError::UpParallelToView));
    }

    #[test]
    fn eye_on_positive_x_rotates_scene() {
        // Looking from +x, world -z is screen right: b1 = up x (+x) = -z.
        let camera = Camera::new(Vec3::RIGHT * 5.0, Vec3::ZERO, Vec3::UP);
        let basis = camera.basis().unwrap();
        let p = basis.to_camera(Vec3::new(0.0, 0.0, -2.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        let near = basis.to_camera(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(near.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn view_is_repeatable() {
        let mesh = triangle_mesh();
        let camera = Camera::new(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO, Vec3::UP);

        let first = camera.view(&mesh).unwrap().vertices().to_vec();
        let _other = Camera::new(Vec3::new(-2.0, 0.0, 1.0), Vec3::ZERO, Vec3::UP)
            .view(&mesh)
            .unwrap();
        let again = camera.view(&mesh).unwrap().vertices().to_vec();

        assert_eq!(first, again);
        assert_eq!(mesh.original_vertices()[2], Vec3::new(0.0, 1.0, 0.5));
    }

    #[test]
    fn rotation_preserves_lengths() {
        let mesh = triangle_mesh();
        let camera = Camera::new(Vec3::new(-3.0, 1.0, 2.0), Vec3::ZERO, Vec3::UP);
        let view = camera.view(&mesh).unwrap();
        for (original, rotated) in mesh.original_vertices().iter().zip(view.vertices()) {
            assert_relative_eq!(original.magnitude(), rotated.magnitude(), epsilon = 1e-5);
        }
    }
}
