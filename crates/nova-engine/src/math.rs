//! 2D vector helpers.
//!
//! `Vector2` is plain `glam::Vec2`: component-wise and scalar-broadcast
//! arithmetic, `length`, `normalize`, `distance`, `dot` and `lerp` all come
//! from glam. `normalize` of the zero vector yields NaN components; callers
//! guard. The degree-based helpers the engine needs live on [`Vector2Ext`].

use glam::Vec2;

pub type Vector2 = Vec2;

/// Degree-based angle helpers on top of `glam::Vec2`.
pub trait Vector2Ext: Sized {
    /// Direction of the vector in whole degrees, normalized to `[0, 360)`.
    fn angle_degrees(self) -> f32;

    /// A copy of the vector rotated around the origin by `degrees`.
    fn rotated_degrees(self, degrees: f32) -> Self;

    /// Rotate in place by `degrees`. Returns `self` for chaining.
    fn rotate_degrees(&mut self, degrees: f32) -> &mut Self;

    /// Angle in degrees `[0, 360)` of the direction from `other` to `self`.
    fn angle_between_degrees(self, other: Self) -> f32;

    /// Vector from spherical angles (radians), projected onto the XY plane.
    fn from_angles(theta: f32, phi: f32) -> Self;
}

/// Round half up, matching how browsers round (`-0.5` goes to `0`).
#[inline]
fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

impl Vector2Ext for Vec2 {
    fn angle_degrees(self) -> f32 {
        let degrees = self.y.atan2(self.x).to_degrees();
        (360.0 + round_half_up(degrees)).rem_euclid(360.0)
    }

    fn rotated_degrees(self, degrees: f32) -> Self {
        let (sn, cs) = degrees.to_radians().sin_cos();
        Vec2::new(self.x * cs - self.y * sn, self.x * sn + self.y * cs)
    }

    fn rotate_degrees(&mut self, degrees: f32) -> &mut Self {
        *self = self.rotated_degrees(degrees);
        self
    }

    fn angle_between_degrees(self, other: Self) -> f32 {
        let d = self - other;
        let angle = d.y.atan2(d.x).to_degrees();
        if angle < 0.0 {
            360.0 + angle
        } else {
            angle
        }
    }

    fn from_angles(theta: f32, phi: f32) -> Self {
        Vec2::new(theta.cos() * phi.cos(), phi.sin())
    }
}
