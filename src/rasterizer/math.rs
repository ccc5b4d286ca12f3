//! Vector, matrix and quaternion math for the render pipeline
//!
//! Hand-rolled 4-component types: the whole pipeline runs on homogeneous
//! coordinates, so vectors carry w (1 for points, 0 for directions) and
//! matrices are row-major 4x4 multiplied against column vectors.

use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

/// Homogeneous 4-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const ONE: Vec4 = Vec4 { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };
    pub const UP: Vec4 = Vec4 { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const DOWN: Vec4 = Vec4 { x: 0.0, y: -1.0, z: 0.0, w: 0.0 };
    pub const LEFT: Vec4 = Vec4 { x: -1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const RIGHT: Vec4 = Vec4 { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const FORWARD: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
    pub const BACK: Vec4 = Vec4 { x: 0.0, y: 0.0, z: -1.0, w: 0.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A position (w = 1), affected by translation
    pub fn point(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// A direction (w = 0), immune to translation
    pub fn direction(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Component by index, `None` past 3
    pub fn get(self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            3 => Some(self.w),
            _ => None,
        }
    }

    /// Full 4-component dot product (w included)
    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// 3D cross product; w is ignored and the result is a direction
    pub fn cross(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: 0.0,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn len_squared(self) -> f32 {
        self.dot(self)
    }

    /// Unit-length copy; the zero vector normalizes to itself
    pub fn normalize(self) -> Vec4 {
        let l = self.len();
        if l == 0.0 {
            return Vec4::ZERO;
        }
        self / l
    }

    /// Linear interpolation between `a` and `b` at parameter `t`
    pub fn lerp(a: Vec4, b: Vec4, t: f32) -> Vec4 {
        a + (b - a) * t
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4::new(self.x + other.x, self.y + other.y, self.z + other.z, self.w + other.w)
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4::new(self.x - other.x, self.y - other.y, self.z - other.z, self.w - other.w)
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, s: f32) -> Vec4 {
        Vec4::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Mul for Vec4 {
    type Output = Vec4;
    fn mul(self, other: Vec4) -> Vec4 {
        Vec4::new(self.x * other.x, self.y * other.y, self.z * other.z, self.w * other.w)
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;
    fn div(self, s: f32) -> Vec4 {
        Vec4::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl Div for Vec4 {
    type Output = Vec4;
    fn div(self, other: Vec4) -> Vec4 {
        Vec4::new(self.x / other.x, self.y / other.y, self.z / other.z, self.w / other.w)
    }
}

impl Neg for Vec4 {
    type Output = Vec4;
    fn neg(self) -> Vec4 {
        Vec4::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl AddAssign for Vec4 {
    fn add_assign(&mut self, other: Vec4) {
        *self = *self + other;
    }
}

impl SubAssign for Vec4 {
    fn sub_assign(&mut self, other: Vec4) {
        *self = *self - other;
    }
}

impl MulAssign<f32> for Vec4 {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl DivAssign<f32> for Vec4 {
    fn div_assign(&mut self, s: f32) {
        *self = *self / s;
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vec4 index out of bounds: {}", index),
        }
    }
}

/// Row-major 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    elements: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Build from 16 row-major elements
    pub fn from_elements(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Translation by `v` (written into column 3)
    pub fn translation(v: Vec4) -> Self {
        let mut m = Mat4::IDENTITY;
        m.set(0, 3, v.x);
        m.set(1, 3, v.y);
        m.set(2, 3, v.z);
        m
    }

    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.elements[row * 4 + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.elements[row * 4 + col] = value;
    }

    pub fn transpose(&self) -> Mat4 {
        let mut result = Mat4::IDENTITY;
        for row in 0..4 {
            for col in 0..4 {
                result.set(col, row, self.at(row, col));
            }
        }
        result
    }

    /// Determinant of the 3x3 submatrix left after removing `row` and `col`
    pub fn minor(&self, row: usize, col: usize) -> f32 {
        let mut sub = [0.0f32; 9];
        let mut i = 0;
        for r in 0..4 {
            if r == row {
                continue;
            }
            for c in 0..4 {
                if c == col {
                    continue;
                }
                sub[i] = self.at(r, c);
                i += 1;
            }
        }
        sub[0] * (sub[4] * sub[8] - sub[5] * sub[7])
            - sub[1] * (sub[3] * sub[8] - sub[5] * sub[6])
            + sub[2] * (sub[3] * sub[7] - sub[4] * sub[6])
    }

    /// Signed minor
    pub fn cofactor(&self, row: usize, col: usize) -> f32 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col)
    }

    /// Cofactor expansion along the first row
    pub fn determinant(&self) -> f32 {
        (0..4).map(|col| self.at(0, col) * self.cofactor(0, col)).sum()
    }

    /// Classical adjugate inverse; `None` when the determinant is zero
    pub fn inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let mut result = Mat4::IDENTITY;
        for row in 0..4 {
            for col in 0..4 {
                // adjugate = transposed cofactor matrix
                result.set(row, col, self.cofactor(col, row) / det);
            }
        }
        Some(result)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut result = Mat4::IDENTITY;
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for i in 0..4 {
                    sum += self.at(row, i) * other.at(i, col);
                }
                result.set(row, col, sum);
            }
        }
        result
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        let mut out = [0.0f32; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in 0..4 {
                sum += self.at(row, i) * v[i];
            }
            *slot = sum;
        }
        Vec4::new(out[0], out[1], out[2], out[3])
    }
}

impl Mul<f32> for Mat4 {
    type Output = Mat4;
    fn mul(self, s: f32) -> Mat4 {
        let mut result = self;
        for e in result.elements.iter_mut() {
            *e *= s;
        }
        result
    }
}

impl Div<f32> for Mat4 {
    type Output = Mat4;
    fn div(self, s: f32) -> Mat4 {
        let mut result = self;
        for e in result.elements.iter_mut() {
            *e /= s;
        }
        result
    }
}

impl Add for Mat4 {
    type Output = Mat4;
    fn add(self, other: Mat4) -> Mat4 {
        let mut result = self;
        for (e, o) in result.elements.iter_mut().zip(other.elements.iter()) {
            *e += o;
        }
        result
    }
}

impl Sub for Mat4 {
    type Output = Mat4;
    fn sub(self, other: Mat4) -> Mat4 {
        let mut result = self;
        for (e, o) in result.elements.iter_mut().zip(other.elements.iter()) {
            *e -= o;
        }
        result
    }
}

/// Rotation quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around `axis` (axis must be unit length)
    pub fn from_axis_angle(axis: Vec4, angle: f32) -> Self {
        let half = angle / 2.0;
        let sin_half = half.sin();
        Self {
            x: axis.x * sin_half,
            y: axis.y * sin_half,
            z: axis.z * sin_half,
            w: half.cos(),
        }
    }

    /// Rotation from Euler angles in radians.
    ///
    /// In this convention pitch turns around y, yaw around z and roll
    /// around x.
    pub fn from_euler(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (sin_half_pitch, cos_half_pitch) = (pitch / 2.0).sin_cos();
        let (sin_half_yaw, cos_half_yaw) = (yaw / 2.0).sin_cos();
        let (sin_half_roll, cos_half_roll) = (roll / 2.0).sin_cos();
        Self {
            x: sin_half_roll * cos_half_pitch * cos_half_yaw
                - cos_half_roll * sin_half_pitch * sin_half_yaw,
            y: cos_half_roll * sin_half_pitch * cos_half_yaw
                + sin_half_roll * cos_half_pitch * sin_half_yaw,
            z: cos_half_roll * cos_half_pitch * sin_half_yaw
                - sin_half_roll * sin_half_pitch * cos_half_yaw,
            w: cos_half_roll * cos_half_pitch * cos_half_yaw
                + sin_half_roll * sin_half_pitch * sin_half_yaw,
        }
    }

    /// 4x4 matrix with the rotation in the upper 3x3
    pub fn to_rotation_matrix(self) -> Mat4 {
        let x2 = self.x * self.x;
        let y2 = self.y * self.y;
        let z2 = self.z * self.z;
        let xy = self.x * self.y;
        let xz = self.x * self.z;
        let yz = self.y * self.z;
        let wx = self.w * self.x;
        let wy = self.w * self.y;
        let wz = self.w * self.z;

        let mut m = Mat4::IDENTITY;
        m.set(0, 0, 1.0 - 2.0 * (y2 + z2));
        m.set(0, 1, 2.0 * (xy - wz));
        m.set(0, 2, 2.0 * (xz + wy));
        m.set(1, 0, 2.0 * (xy + wz));
        m.set(1, 1, 1.0 - 2.0 * (x2 + z2));
        m.set(1, 2, 2.0 * (yz - wx));
        m.set(2, 0, 2.0 * (xz - wy));
        m.set(2, 1, 2.0 * (yz + wx));
        m.set(2, 2, 1.0 - 2.0 * (x2 + y2));
        m
    }
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

/// Hamilton product: `a * b` applies b first in local space
impl Mul for Quat {
    type Output = Quat;
    fn mul(self, q: Quat) -> Quat {
        Quat::new(
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y + self.y * q.w + self.z * q.x - self.x * q.z,
            self.w * q.z + self.z * q.w + self.x * q.y - self.y * q.x,
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn vec_approx(a: Vec4, b: Vec4) -> bool {
        (a.x - b.x).abs() < EPSILON
            && (a.y - b.y).abs() < EPSILON
            && (a.z - b.z).abs() < EPSILON
            && (a.w - b.w).abs() < EPSILON
    }

    fn mat_approx(a: Mat4, b: Mat4) -> bool {
        (0..4).all(|r| (0..4).all(|c| (a.at(r, c) - b.at(r, c)).abs() < EPSILON))
    }

    #[test]
    fn test_dot_includes_w() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(5.0, 6.0, 7.0, 8.0);
        assert!((a.dot(b) - 70.0).abs() < EPSILON);
    }

    #[test]
    fn test_cross_ignores_w() {
        let c = Vec4::point(1.0, 0.0, 0.0).cross(Vec4::point(0.0, 1.0, 0.0));
        assert!(vec_approx(c, Vec4::new(0.0, 0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vec4::new(3.0, 4.0, 0.0, 0.0);
        assert!((v.normalize().len() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert!(vec_approx(Vec4::ZERO.normalize(), Vec4::ZERO));
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Vec4::lerp(Vec4::point(0.0, 0.0, 0.0), Vec4::point(2.0, 4.0, 6.0), 0.5);
        assert!(vec_approx(mid, Vec4::point(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_index_access() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert!((v[0] - 1.0).abs() < EPSILON);
        assert!((v[3] - 4.0).abs() < EPSILON);
        assert!(v.get(4).is_none());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let v = Vec4::ZERO;
        let _ = v[4];
    }

    #[test]
    fn test_elementwise_mul_div() {
        let a = Vec4::new(2.0, 4.0, 6.0, 8.0);
        let b = Vec4::new(2.0, 2.0, 2.0, 2.0);
        assert!(vec_approx(a * b, Vec4::new(4.0, 8.0, 12.0, 16.0)));
        assert!(vec_approx(a / b, Vec4::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_matrix_identity_multiply() {
        let v = Vec4::point(1.0, 2.0, 3.0);
        assert!(vec_approx(Mat4::IDENTITY * v, v));
        assert!(mat_approx(Mat4::IDENTITY * Mat4::IDENTITY, Mat4::IDENTITY));
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let t = Mat4::translation(Vec4::point(5.0, -3.0, 2.0));
        let p = t * Vec4::point(1.0, 1.0, 1.0);
        let d = t * Vec4::direction(1.0, 1.0, 1.0);
        assert!(vec_approx(p, Vec4::point(6.0, -2.0, 3.0)));
        assert!(vec_approx(d, Vec4::direction(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_transpose_swaps_rows_and_columns() {
        let t = Mat4::translation(Vec4::point(5.0, 6.0, 7.0)).transpose();
        assert!((t.at(3, 0) - 5.0).abs() < EPSILON);
        assert!((t.at(3, 2) - 7.0).abs() < EPSILON);
        assert!((t.at(0, 3)).abs() < EPSILON);
    }

    #[test]
    fn test_determinant_identity_is_one() {
        assert!((Mat4::IDENTITY.determinant() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = Mat4::from_elements([
            2.0, 0.0, 0.0, 1.0,
            0.0, 3.0, 0.0, -2.0,
            1.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        let inv = m.inverse().unwrap();
        assert!(mat_approx(m * inv, Mat4::IDENTITY));
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        let m = Mat4::from_elements([
            1.0, 2.0, 3.0, 4.0,
            2.0, 4.0, 6.0, 8.0,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0,
        ]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_quat_identity_laws() {
        let q = Quat::from_axis_angle(Vec4::UP, 1.2);
        assert_eq!(Quat::IDENTITY * q, q);
        assert_eq!(q * Quat::IDENTITY, q);
    }

    #[test]
    fn test_axis_angle_rotates_vector() {
        // quarter turn around z carries +x onto +y
        let q = Quat::from_axis_angle(Vec4::FORWARD, std::f32::consts::FRAC_PI_2);
        let rotated = q.to_rotation_matrix() * Vec4::direction(1.0, 0.0, 0.0);
        assert!(vec_approx(rotated, Vec4::direction(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_euler_pitch_matches_axis_angle_up() {
        let angle = 0.7;
        let e = Quat::from_euler(angle, 0.0, 0.0);
        let a = Quat::from_axis_angle(Vec4::UP, angle);
        assert!((e.x - a.x).abs() < EPSILON);
        assert!((e.y - a.y).abs() < EPSILON);
        assert!((e.z - a.z).abs() < EPSILON);
        assert!((e.w - a.w).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_matrix_preserves_length() {
        let q = Quat::from_euler(0.3, 0.8, -0.5);
        let v = Vec4::direction(1.0, 2.0, 3.0);
        let rotated = q.to_rotation_matrix() * v;
        assert!((rotated.len() - v.len()).abs() < EPSILON);
    }
}
