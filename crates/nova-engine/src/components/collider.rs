use glam::Vec2;

/// Hit-testing shape attached to a game object, separate from its visual size.
///
/// Both variants are centered on the owner's position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Circle { radius: f32, offset: Vec2 },
    Rect { size: Vec2, offset: Vec2 },
}

impl Collider {
    pub fn circle(radius: f32) -> Self {
        Collider::Circle { radius, offset: Vec2::ZERO }
    }

    pub fn rect(size: Vec2) -> Self {
        Collider::Rect { size, offset: Vec2::ZERO }
    }

    pub fn with_offset(self, offset: Vec2) -> Self {
        match self {
            Collider::Circle { radius, .. } => Collider::Circle { radius, offset },
            Collider::Rect { size, .. } => Collider::Rect { size, offset },
        }
    }

    pub fn offset(&self) -> Vec2 {
        match *self {
            Collider::Circle { offset, .. } | Collider::Rect { offset, .. } => offset,
        }
    }

    /// Collider center for an owner standing at `position`.
    pub fn center(&self, position: Vec2) -> Vec2 {
        position + self.offset()
    }

    /// False for negative or non-finite dimensions. Such colliders never collide.
    pub fn is_well_formed(&self) -> bool {
        let offset_ok = self.offset().is_finite();
        match *self {
            Collider::Circle { radius, .. } => offset_ok && radius.is_finite() && radius >= 0.0,
            Collider::Rect { size, .. } => {
                offset_ok && size.is_finite() && size.x >= 0.0 && size.y >= 0.0
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Collider::Circle { .. } => "circle",
            Collider::Rect { .. } => "rect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_center() {
        let collider = Collider::rect(Vec2::splat(10.0)).with_offset(Vec2::new(2.0, -3.0));
        assert_eq!(collider.center(Vec2::new(10.0, 10.0)), Vec2::new(12.0, 7.0));
        assert_eq!(collider.kind(), "rect");
    }

    #[test]
    fn degenerate_colliders_are_not_well_formed() {
        assert!(Collider::circle(5.0).is_well_formed());
        assert!(!Collider::circle(-1.0).is_well_formed());
        assert!(!Collider::circle(f32::NAN).is_well_formed());
        assert!(!Collider::rect(Vec2::new(1.0, f32::INFINITY)).is_well_formed());
    }
}
