//! Small 2D/3D vector types and the helpers the engine layer needs.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalized(self) -> Vec2 {
        let len_sq = self.length_squared();
        if len_sq == 0.0 {
            return self;
        }
        self * (1.0 / len_sq.sqrt())
    }

    /// Same as [`Vec2::normalized`], kept for call sites that read better
    /// with the explicit name.
    pub fn safe_normalize(self) -> Vec2 {
        self.normalized()
    }

    /// Perpendicular rotated a quarter turn clockwise (screen space): `(y, -x)`.
    pub fn left_perp(self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }

    /// Perpendicular rotated a quarter turn counter-clockwise: `(-y, x)`.
    pub fn right_perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Angle in radians from the positive x axis.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn rotate_by(self, angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalized(self) -> Vec3 {
        let len_sq = self.length_squared();
        if len_sq == 0.0 {
            return self;
        }
        let inv = 1.0 / len_sq.sqrt();
        Vec3::new(self.x * inv, self.y * inv, self.z * inv)
    }

    /// Drop the z component.
    pub fn flatten(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Random point in the unit cube, one draw per component.
    ///
    /// `next` must yield values in `[0, 1)`.
    pub fn random_with(mut next: impl FnMut() -> f32) -> Vec3 {
        let x = next();
        let y = next();
        let z = next();
        Vec3::new(x, y, z)
    }
}
