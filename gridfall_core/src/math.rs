//! Math types.
//!
//! This module intentionally stays small and deterministic.
//! It avoids SIMD/unsafe and focuses on stable semantics. Matrices are
//! column-major, right-handed, and built only from translate/rotate/
//! identity/look-at primitives so their rotational part stays orthonormal.

use serde::{Deserialize, Serialize};

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy. The zero vector is returned unchanged.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self.scale(1.0 / len)
        } else {
            self
        }
    }

    pub fn scale(self, amount: f32) -> Self {
        Self::new(self.x * amount, self.y * amount, self.z * amount)
    }

    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Homogeneous coordinate, used for transforming points and directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A position (w = 1): affected by translations.
    pub const fn point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    /// A direction (w = 0): unaffected by translations.
    pub const fn direction(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// 4x4 homogeneous transform, column-major.
///
/// Element `m[c * 4 + r]` is row `r` of column `c`, matching GL-style
/// uniform upload order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn identity() -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::identity();
        self
    }

    /// In-place `self = self * other`. Right-to-left composition: the
    /// transform closest to the object is multiplied last.
    pub fn multiply(&mut self, other: &Mat4) -> &mut Self {
        let a = self.m;
        let b = &other.m;
        let mut out = [0.0f32; 16];
        for c in 0..4 {
            for r in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[k * 4 + r] * b[c * 4 + k];
                }
                out[c * 4 + r] = sum;
            }
        }
        self.m = out;
        self
    }

    /// Concatenates a translation: `self = self * T(x, y, z)`.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        for r in 0..4 {
            self.m[12 + r] += self.m[r] * x + self.m[4 + r] * y + self.m[8 + r] * z;
        }
        self
    }

    /// Concatenates a rotation of `angle_deg` degrees about the axis
    /// `(ax, ay, az)` through the origin, right-hand rule. The axis does
    /// not need to be normalized.
    pub fn rotate(&mut self, angle_deg: f32, ax: f32, ay: f32, az: f32) -> &mut Self {
        let r = Self::rotation(angle_deg, ax, ay, az);
        self.multiply(&r)
    }

    /// A pure rotation matrix (see [`Mat4::rotate`]).
    pub fn rotation(angle_deg: f32, ax: f32, ay: f32, az: f32) -> Self {
        let axis = Vec3::new(ax, ay, az).normalize();
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let rad = angle_deg.to_radians();
        let c = rad.cos();
        let s = rad.sin();
        let nc = 1.0 - c;

        let mut out = Self::identity();
        out.m[0] = c + x * x * nc;
        out.m[1] = x * y * nc + z * s;
        out.m[2] = x * z * nc - y * s;
        out.m[4] = x * y * nc - z * s;
        out.m[5] = c + y * y * nc;
        out.m[6] = y * z * nc + x * s;
        out.m[8] = x * z * nc + y * s;
        out.m[9] = y * z * nc - x * s;
        out.m[10] = c + z * z * nc;
        out
    }

    /// Replaces `self` with a viewing transform that places the camera at
    /// `eye` looking toward `at` with the given approximate `up`.
    pub fn set_look_at(&mut self, eye: Vec3, at: Vec3, up: Vec3) -> &mut Self {
        let f = (at - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        self.m = [
            s.x, u.x, -f.x, 0.0, //
            s.y, u.y, -f.y, 0.0, //
            s.z, u.z, -f.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        self.translate(-eye.x, -eye.y, -eye.z)
    }

    /// Replaces `self` with a perspective projection. `fovy_deg` is the
    /// vertical field of view; depth maps to the GL [-1, 1] range.
    pub fn set_perspective(
        &mut self,
        fovy_deg: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let f = 1.0 / (fovy_deg.to_radians() / 2.0).tan();
        self.m = [0.0; 16];
        self.m[0] = f / aspect;
        self.m[5] = f;
        self.m[10] = -(far + near) / (far - near);
        self.m[11] = -1.0;
        self.m[14] = -2.0 * far * near / (far - near);
        self
    }

    /// Replaces `self` with an orthographic projection.
    pub fn set_ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        self.m = [0.0; 16];
        self.m[0] = 2.0 / (right - left);
        self.m[5] = 2.0 / (top - bottom);
        self.m[10] = -2.0 / (far - near);
        self.m[12] = -(right + left) / (right - left);
        self.m[13] = -(top + bottom) / (top - bottom);
        self.m[14] = -(far + near) / (far - near);
        self.m[15] = 1.0;
        self
    }

    /// `self * v`.
    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
            m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
        )
    }

    /// Rotates a direction vector, ignoring any translation in `self`.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        self.transform_vec4(Vec4::direction(v)).truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_vec3_close(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn translate_moves_points_not_directions() {
        let mut m = Mat4::identity();
        m.translate(1.0, 2.0, 3.0);

        let p = m.transform_vec4(Vec4::point(Vec3::ZERO));
        assert_eq!(p.truncate(), Vec3::new(1.0, 2.0, 3.0));

        let d = m.transform_vec4(Vec4::direction(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(d.truncate(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rotate_quarter_turn_about_y() {
        let r = Mat4::rotation(90.0, 0.0, 1.0, 0.0);
        let v = r.transform_direction(Vec3::new(1.0, 0.0, 0.0));
        assert_vec3_close(v, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn rotate_accepts_unnormalized_axis() {
        let a = Mat4::rotation(45.0, 0.0, 2.0, 0.0);
        let b = Mat4::rotation(45.0, 0.0, 1.0, 0.0);
        for (x, y) in a.m.iter().zip(b.m.iter()) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let mut tr = Mat4::identity();
        tr.translate(1.0, 0.0, 0.0);
        tr.rotate(90.0, 0.0, 1.0, 0.0);

        // The rotation is closer to the object: the point rotates about the
        // origin first, then the result is translated.
        let p = tr.transform_vec4(Vec4::point(Vec3::new(1.0, 0.0, 0.0)));
        assert_vec3_close(p.truncate(), Vec3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn look_at_maps_eye_to_origin() {
        let mut view = Mat4::identity();
        let eye = Vec3::new(25.0, 20.0, 22.0);
        view.set_look_at(eye, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);

        let p = view.transform_vec4(Vec4::point(eye));
        assert!(p.truncate().length() < 1e-4);
    }

    #[test]
    fn look_at_puts_target_on_negative_z() {
        let mut view = Mat4::identity();
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let at = Vec3::new(0.0, 0.0, 0.0);
        view.set_look_at(eye, at, Vec3::Y);

        let p = view.transform_vec4(Vec4::point(at)).truncate();
        assert_vec3_close(p, Vec3::new(0.0, 0.0, -10.0));
    }

    #[test]
    fn perspective_preserves_center_ray() {
        let mut proj = Mat4::identity();
        proj.set_perspective(30.0, 1.0, 1.0, 150.0);
        let p = proj.transform_vec4(Vec4::point(Vec3::new(0.0, 0.0, -10.0)));
        assert!((p.x / p.w).abs() < 1e-6);
        assert!((p.y / p.w).abs() < 1e-6);
    }

    #[test]
    fn ortho_maps_corners_to_clip_cube() {
        let mut proj = Mat4::identity();
        proj.set_ortho(-6.0, 6.0, -4.0, 4.0, 1.0, 150.0);
        let p = proj.transform_vec4(Vec4::point(Vec3::new(6.0, 4.0, -1.0)));
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
        assert!((p.z + 1.0).abs() < 1e-6);
    }
}
