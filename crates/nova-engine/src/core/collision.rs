//! Collision detection: raw geometry tests plus the game-object level check.
//!
//! Every primitive answers `Option<Vec2>`: `None` for no contact, otherwise the
//! contact point. No collision response is computed.

use std::rc::Rc;

use glam::Vec2;

use crate::api::types::Collision;
use crate::components::collider::Collider;
use crate::components::game_object::{GameObject, GameObjectRef};
use crate::core::scaling::ScalingManager;
use crate::renderer::camera::Camera;

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let top_left = center - size / 2.0;
        Self::new(top_left.x, top_left.y, size.x, size.y)
    }

    fn right(&self) -> f32 {
        self.x + self.w
    }

    fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Inclusive on every edge.
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    rect.x <= point.x && point.x <= rect.right() && rect.y <= point.y && point.y <= rect.bottom()
}

/// Inclusive on the circumference.
pub fn point_in_circle(point: Vec2, circle: &Circle) -> bool {
    point.distance_squared(circle.center) <= circle.radius * circle.radius
}

/// AABB overlap, touching edges included. The contact point is the center
/// of the intersection rectangle.
pub fn rect_rect(a: &Rect, b: &Rect) -> Option<Vec2> {
    let overlaps = a.x <= b.right() && a.right() >= b.x && a.y <= b.bottom() && a.bottom() >= b.y;
    if !overlaps {
        return None;
    }
    let left = a.x.max(b.x);
    let right = a.right().min(b.right());
    let top = a.y.max(b.y);
    let bottom = a.bottom().min(b.bottom());
    Some(Vec2::new((left + right) / 2.0, (top + bottom) / 2.0))
}

/// Contact when the centers are at most `r1 + r2` apart. The point is the
/// midpoint of the two surface points facing each other.
pub fn circle_circle(a: &Circle, b: &Circle) -> Option<Vec2> {
    let delta = b.center - a.center;
    let distance = delta.length();
    if distance > a.radius + b.radius {
        return None;
    }
    if distance == 0.0 {
        // Concentric: every direction is as good as any other.
        return Some(a.center);
    }
    let normal = delta / distance;
    let on_a = a.center + normal * a.radius;
    let on_b = b.center - normal * b.radius;
    Some((on_a + on_b) / 2.0)
}

/// Contact when the rect point nearest to the circle center is strictly
/// inside the circle. The point is that nearest point.
pub fn rect_circle(circle: &Circle, rect: &Rect) -> Option<Vec2> {
    let nearest = Vec2::new(
        circle.center.x.clamp(rect.x, rect.right()),
        circle.center.y.clamp(rect.y, rect.bottom()),
    );
    let delta = circle.center - nearest;
    if delta.length_squared() < circle.radius * circle.radius {
        Some(circle.center - delta)
    } else {
        None
    }
}

/// Collider of `object` projected into screen space, camera offset applied.
enum ScreenShape {
    Rect(Rect),
    Circle(Circle),
}

fn screen_shape(object: &GameObject, scaling: &ScalingManager, camera: &Camera) -> Option<ScreenShape> {
    let collider = object.collider.as_ref()?;
    if !collider.is_well_formed() {
        log::warn!(
            "ignoring malformed {} collider on `{}`: {:?}",
            collider.kind(),
            object.name(),
            collider
        );
        return None;
    }
    let center = scaling.world_to_screen(collider.center(object.position), camera.offset_for(object));
    Some(match *collider {
        Collider::Rect { size, .. } => {
            ScreenShape::Rect(Rect::centered(center, scaling.box_size_virtual_to_screen(size)))
        }
        Collider::Circle { radius, .. } => {
            ScreenShape::Circle(Circle::new(center, scaling.circle_radius_virtual_to_screen(radius)))
        }
    })
}

/// Test two game objects against each other as they appear on screen.
///
/// Returns a [`Collision`] naming `a` (the other object, from `b`'s point of
/// view) and the contact point in world space. An object never collides with
/// itself, and objects without a collider never collide.
pub fn check_collision_between_game_objects(
    a: &GameObjectRef,
    b: &GameObjectRef,
    scaling: &ScalingManager,
    camera: &Camera,
) -> Option<Collision> {
    let (shape_a, shape_b) = {
        if Rc::ptr_eq(a, b) {
            return None;
        }
        let obj_a = a.borrow();
        let obj_b = b.borrow();
        if obj_a.name() == obj_b.name() {
            return None;
        }
        if obj_a.collider.is_none() || obj_b.collider.is_none() {
            return None;
        }
        (
            screen_shape(&obj_a, scaling, camera)?,
            screen_shape(&obj_b, scaling, camera)?,
        )
    };

    let point = match (&shape_a, &shape_b) {
        (ScreenShape::Rect(ra), ScreenShape::Rect(rb)) => rect_rect(ra, rb),
        (ScreenShape::Circle(ca), ScreenShape::Circle(cb)) => circle_circle(ca, cb),
        (ScreenShape::Rect(r), ScreenShape::Circle(c)) | (ScreenShape::Circle(c), ScreenShape::Rect(r)) => {
            rect_circle(c, r)
        }
    }?;

    Some(Collision {
        game_object: Rc::clone(a),
        point: scaling.screen_to_world(point, camera.position),
    })
}

/// Whether the screen-space `point` falls inside `object`'s collider.
/// Objects without a collider contain nothing.
pub fn point_inside_game_object(point: Vec2, object: &GameObject, scaling: &ScalingManager, camera: &Camera) -> bool {
    match screen_shape(object, scaling, camera) {
        Some(ScreenShape::Rect(rect)) => point_in_rect(point, &rect),
        Some(ScreenShape::Circle(circle)) => point_in_circle(point, &circle),
        None => false,
    }
}
