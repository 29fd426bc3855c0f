//! World-to-eye transforms.
//!
//! Two interchangeable ways of building the same view matrix are provided
//! behind [`ViewTransform`]: [`LookAt`] defers to glam, [`BasisMatrix`]
//! assembles the rotation and translation by hand. For the same inputs
//! they agree to within float precision.

use glam::{
    Mat4,
    Vec3,
    Vec4,
};

/// Builds a view matrix from a camera position, look direction and up
/// vector.
pub trait ViewTransform {
    fn view_matrix(&self, position : Vec3, front : Vec3, up : Vec3) -> Mat4;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookAt;

impl ViewTransform for LookAt {
    fn view_matrix(&self, position : Vec3, front : Vec3, up : Vec3) -> Mat4 {
        look_at(position, position + front, up)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasisMatrix;

impl ViewTransform for BasisMatrix {
    fn view_matrix(&self, position : Vec3, front : Vec3, up : Vec3) -> Mat4 {
        basis_look_at(position, position + front, up)
    }
}

/// Runtime selection between the two builders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewForm {
    LookAt,
    BasisMatrix,
}

impl Default for ViewForm {
    fn default() -> Self {
        ViewForm::LookAt
    }
}

impl ViewForm {
    pub fn toggled(self) -> Self {
        match self {
            ViewForm::LookAt => ViewForm::BasisMatrix,
            ViewForm::BasisMatrix => ViewForm::LookAt,
        }
    }
}

impl ViewTransform for ViewForm {
    fn view_matrix(&self, position : Vec3, front : Vec3, up : Vec3) -> Mat4 {
        match self {
            ViewForm::LookAt => LookAt.view_matrix(position, front, up),
            ViewForm::BasisMatrix => BasisMatrix.view_matrix(position, front, up),
        }
    }
}

/// Right handed look-at, the camera looks down its local -Z.
pub fn look_at(eye : Vec3, target : Vec3, up : Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Same as [`look_at`], built from an explicit camera basis.
///
/// The rotation has the camera axes as its rows, which is the inverse of
/// the matrix with the axes as columns since the basis is orthonormal. The
/// translation is applied first so the camera sits at the origin before
/// the world is rotated into camera space.
pub fn basis_look_at(eye : Vec3, target : Vec3, world_up : Vec3) -> Mat4 {
    // points backwards, away from the target
    let z_axis = (eye - target).normalize();
    let x_axis = world_up.normalize().cross(z_axis).normalize();
    // already unit length
    let y_axis = z_axis.cross(x_axis);

    let rotation = Mat4::from_cols(
        x_axis.extend(0.0),
        y_axis.extend(0.0),
        z_axis.extend(0.0),
        Vec4::W,
    ).transpose();

    let translation = Mat4::from_translation(-eye);

    rotation * translation
}

/// OpenGL clip space perspective projection, `fov_y` in degrees.
pub fn perspective(fov_y : f32, aspect : f32, near : f32, far : f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_y.to_radians(), aspect, near, far)
}
