// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the column-major [`Mat4`] used for panel transforms and camera matrices.
//!
//! XR runtimes hand out matrices as flat, column-major `[f32; 16]` arrays. `Mat4`
//! shares that layout so pose data can be copied in without reordering.

use super::{Quaternion, Vec3, Vec4, EPSILON};
use std::ops::Mul;

/// A 4x4 column-major matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Builds a matrix from a flat column-major array, the layout used by XR pose data.
    #[inline]
    pub fn from_cols_array(m: &[f32; 16]) -> Self {
        Self::from_cols(
            Vec4::new(m[0], m[1], m[2], m[3]),
            Vec4::new(m[4], m[5], m[6], m[7]),
            Vec4::new(m[8], m[9], m[10], m[11]),
            Vec4::new(m[12], m[13], m[14], m[15]),
        )
    }

    /// Flattens the matrix back into a column-major array.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        let [c0, c1, c2, c3] = self.cols;
        [
            c0.x, c0.y, c0.z, c0.w, c1.x, c1.y, c1.z, c1.w, c2.x, c2.y, c2.z, c2.w, c3.x, c3.y,
            c3.z, c3.w,
        ]
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0].get(index),
            self.cols[1].get(index),
            self.cols[2].get(index),
            self.cols[3].get(index),
        )
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::from_vec3(v, 1.0))
    }

    /// Creates a rotation matrix from a unit quaternion.
    pub fn from_quat(q: Quaternion) -> Self {
        let (x2, y2, z2) = (q.x + q.x, q.y + q.y, q.z + q.z);
        let (xx, xy, xz) = (q.x * x2, q.x * y2, q.x * z2);
        let (yy, yz, zz) = (q.y * y2, q.y * z2, q.z * z2);
        let (wx, wy, wz) = (q.w * x2, q.w * y2, q.w * z2);

        Self::from_cols(
            Vec4::new(1.0 - (yy + zz), xy + wz, xz - wy, 0.0),
            Vec4::new(xy - wz, 1.0 - (xx + zz), yz + wx, 0.0),
            Vec4::new(xz + wy, yz - wx, 1.0 - (xx + yy), 0.0),
            Vec4::W,
        )
    }

    /// Creates a rigid transform that rotates by `rotation`, then translates by `translation`.
    #[inline]
    pub fn from_rotation_translation(rotation: Quaternion, translation: Vec3) -> Self {
        let mut m = Self::from_quat(rotation);
        m.cols[3] = Vec4::from_vec3(translation, 1.0);
        m
    }

    /// Creates a right-handed perspective projection with an OpenGL-style
    /// `[-1, 1]` depth range, the convention XR runtimes report projections in.
    pub fn perspective_rh_gl(
        fov_y_radians: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        debug_assert!(z_near > 0.0 && z_far > z_near);
        let f = 1.0 / (fov_y_radians * 0.5).tan();
        let range_inv = 1.0 / (z_near - z_far);

        Self::from_cols(
            Vec4::new(f / aspect_ratio, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, (z_near + z_far) * range_inv, -1.0),
            Vec4::new(0.0, 0.0, 2.0 * z_near * z_far * range_inv, 0.0),
        )
    }

    /// Returns the translation part of an affine matrix.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.cols[3].truncate()
    }

    /// Transforms a point (`w = 1`) by this matrix.
    #[inline]
    pub fn transform_point3(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(p, 1.0)).truncate()
    }

    /// Transforms a direction (`w = 0`) by this matrix, ignoring translation.
    #[inline]
    pub fn transform_vector3(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(v, 0.0)).truncate()
    }

    /// Inverts an affine matrix (rotation, scale and translation only).
    ///
    /// Returns `None` when the 3x3 part is singular.
    pub fn affine_inverse(&self) -> Option<Self> {
        let a = self.cols[0].truncate();
        let b = self.cols[1].truncate();
        let c = self.cols[2].truncate();
        let t = self.translation();

        // The rows of the inverse 3x3 are the pairwise cross products over the determinant.
        let r0 = b.cross(c);
        let r1 = c.cross(a);
        let r2 = a.cross(b);
        let det = a.dot(r0);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let (r0, r1, r2) = (r0 * inv_det, r1 * inv_det, r2 * inv_det);

        Some(Self::from_cols(
            Vec4::new(r0.x, r1.x, r2.x, 0.0),
            Vec4::new(r0.y, r1.y, r2.y, 0.0),
            Vec4::new(r0.z, r1.z, r2.z, 0.0),
            Vec4::new(-r0.dot(t), -r1.dot(t), -r2.dot(t), 1.0),
        ))
    }
}

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        Self {
            cols: rhs.cols.map(|col| self * col),
        }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-5);
        }
    }

    #[test]
    fn cols_array_round_trips_column_major() {
        let raw: [f32; 16] = std::array::from_fn(|i| i as f32);
        let m = Mat4::from_cols_array(&raw);
        assert_eq!(m.cols[3], Vec4::new(12.0, 13.0, 14.0, 15.0));
        assert_eq!(m.row(0), Vec4::new(0.0, 4.0, 8.0, 12.0));
        assert_eq!(m.to_cols_array(), raw);
    }

    #[test]
    fn affine_inverse_undoes_rigid_transform() {
        let q = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let m = Mat4::from_rotation_translation(q, Vec3::new(1.0, 2.0, 3.0));
        let inv = m.affine_inverse().expect("rigid transforms are invertible");
        assert_mat_eq(m * inv, Mat4::IDENTITY);
        assert_mat_eq(inv * m, Mat4::IDENTITY);
    }

    #[test]
    fn affine_inverse_rejects_singular_matrix() {
        let mut m = Mat4::IDENTITY;
        m.cols[0] = Vec4::ZERO;
        assert!(m.affine_inverse().is_none());
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_clip_bounds() {
        let proj = Mat4::perspective_rh_gl(FRAC_PI_2, 1.0, 0.1, 100.0);
        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
        assert!(near.w > 0.0);
    }

    #[test]
    fn transform_point_applies_translation_but_vector_does_not() {
        let m = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(m.transform_vector3(Vec3::X), Vec3::X);
    }
}
