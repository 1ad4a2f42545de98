//! Shape overlap tests
//!
//! Circles and axis-aligned rectangles only. Every test reports the surface
//! normal (pointing from the second shape toward the first) and the
//! penetration depth so the physics clock can push a blocked body back out.

use glam::Vec2;

use super::body::{Body, Shape};

/// Result of an overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Contact point on the second shape's surface (if hit)
    pub point: Vec2,
    /// Surface normal, pointing from the second shape toward the first
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against an axis-aligned rectangle
///
/// Touching edges do not count as overlap.
pub fn circle_rect_collision(
    center: Vec2,
    radius: f32,
    rect_center: Vec2,
    half_extents: Vec2,
) -> CollisionResult {
    let min = rect_center - half_extents;
    let max = rect_center + half_extents;
    let closest = center.clamp(min, max);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= radius * radius {
            return CollisionResult::miss();
        }
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: closest,
            normal: offset / dist,
            penetration: radius - dist,
        };
    }

    // Center is inside the rectangle: push out through the nearest face
    let to_min = center - min;
    let to_max = max - center;
    let faces = [
        (to_min.x, Vec2::NEG_X),
        (to_max.x, Vec2::X),
        (to_min.y, Vec2::NEG_Y),
        (to_max.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, Vec2::Y));

    CollisionResult {
        hit: true,
        point: center + normal * depth,
        normal,
        penetration: depth + radius,
    }
}

/// Check two circles. The playfield only ever pairs the round actor with
/// rectangles; this and [`rect_rect_collision`] keep [`body_collision`] total
/// over [`Shape`].
pub fn circle_circle_collision(a: Vec2, ra: f32, b: Vec2, rb: f32) -> CollisionResult {
    let offset = a - b;
    let reach = ra + rb;
    let dist_sq = offset.length_squared();
    if dist_sq >= reach * reach {
        return CollisionResult::miss();
    }
    let dist = dist_sq.sqrt();
    let normal = if dist > 0.0 { offset / dist } else { Vec2::Y };
    CollisionResult {
        hit: true,
        point: b + normal * rb,
        normal,
        penetration: reach - dist,
    }
}

/// Check two axis-aligned rectangles (see [`circle_circle_collision`])
pub fn rect_rect_collision(a: Vec2, ha: Vec2, b: Vec2, hb: Vec2) -> CollisionResult {
    let offset = a - b;
    let overlap = (ha + hb) - offset.abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }
    let (normal, penetration) = if overlap.x < overlap.y {
        (Vec2::new(offset.x.signum(), 0.0), overlap.x)
    } else {
        (Vec2::new(0.0, offset.y.signum()), overlap.y)
    };
    CollisionResult {
        hit: true,
        point: a - normal * (penetration * 0.5),
        normal,
        penetration,
    }
}

/// Check two bodies by shape; the normal points from `b` toward `a`
pub fn body_collision(a: &Body, b: &Body) -> CollisionResult {
    match (a.shape, b.shape) {
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
            circle_rect_collision(a.pos, radius, b.pos, half_extents)
        }
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
            let mut result = circle_rect_collision(b.pos, radius, a.pos, half_extents);
            result.normal = -result.normal;
            result
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle_collision(a.pos, ra, b.pos, rb)
        }
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            rect_rect_collision(a.pos, ha, b.pos, hb)
        }
    }
}

/// Remove the velocity component pointing into a surface
#[inline]
pub fn cancel_into_surface(velocity: Vec2, normal: Vec2) -> Vec2 {
    let into = velocity.dot(normal);
    if into < 0.0 {
        velocity - into * normal
    } else {
        velocity
    }
}
