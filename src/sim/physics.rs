//! Physics clock
//!
//! Integrates dynamic bodies under constant gravity, reports begin-overlap
//! contacts and pushes dynamic bodies out of whatever blocks them.

use glam::Vec2;

use super::body::{Body, BodyId};
use super::collision::{body_collision, cancel_into_surface};
use super::contact::Contact;

/// Penetration left in place after push-out so a resting body keeps its
/// contact instead of re-firing it every step
pub const LINEAR_SLOP: f32 = 0.05;

/// Semi-implicit Euler step. Non-dynamic bodies are untouched.
pub fn integrate(body: &mut Body, gravity: f32, dt: f32) {
    if !body.dynamic {
        return;
    }
    body.vel.y -= gravity * dt;
    body.pos += body.vel * dt;
}

/// Push `body` out of every body that blocks it and drop the velocity
/// component into each surface
pub fn resolve_blocking<'a>(body: &mut Body, others: impl IntoIterator<Item = &'a Body>) {
    for other in others {
        if other.id == body.id || !body.is_blocked_by(other) {
            continue;
        }
        let result = body_collision(body, other);
        if !result.hit {
            continue;
        }
        let correction = (result.penetration - LINEAR_SLOP).max(0.0);
        body.pos += result.normal * correction;
        body.vel = cancel_into_surface(body.vel, result.normal);
    }
}

/// Tracks which body pairs currently overlap so each overlap is reported once
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    /// Overlapping pairs as of the last detection, lowest id first
    touching: Vec<(BodyId, BodyId)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test all pairs and return contacts that began since the last call,
    /// ordered by body id. Pairs involving removed bodies are forgotten.
    pub fn detect(&mut self, bodies: &[&Body]) -> Vec<Contact> {
        let mut now = Vec::new();
        let mut began = Vec::new();

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                // Two fixed bodies never report
                if !(a.dynamic || b.dynamic) || !a.reports_contact_with(b) {
                    continue;
                }
                if !body_collision(a, b).hit {
                    continue;
                }
                let contact = Contact {
                    a: a.id,
                    a_category: a.category,
                    b: b.id,
                    b_category: b.category,
                };
                let key = contact.order_key();
                if !self.touching.contains(&key) {
                    log::trace!("contact began: {:?} / {:?}", a.category, b.category);
                    began.push(contact);
                }
                now.push(key);
            }
        }

        self.touching = now;
        began.sort_by_key(|c| c.order_key());
        began
    }

    /// Whether the two bodies were overlapping at the last detection
    pub fn is_touching(&self, a: BodyId, b: BodyId) -> bool {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.touching.contains(&key)
    }
}

/// Stop a body dead and take it out of integration
pub fn halt(body: &mut Body) {
    body.vel = Vec2::ZERO;
    body.dynamic = false;
}
