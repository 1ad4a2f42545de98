//! Simulated bodies and their collision categories

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Run-unique body identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Closed set of body categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Actor,
    Obstacle,
    Ground,
    ScoreGap,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Actor,
        Category::Obstacle,
        Category::Ground,
        Category::ScoreGap,
    ];
}

/// A set of categories, used for collision and contact filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySet {
    actor: bool,
    obstacle: bool,
    ground: bool,
    score_gap: bool,
}

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet {
        actor: false,
        obstacle: false,
        ground: false,
        score_gap: false,
    };

    pub fn of(categories: &[Category]) -> Self {
        let mut set = Self::EMPTY;
        for &c in categories {
            set.insert(c);
        }
        set
    }

    pub fn insert(&mut self, category: Category) {
        *self.slot(category) = true;
    }

    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Actor => self.actor,
            Category::Obstacle => self.obstacle,
            Category::Ground => self.ground,
            Category::ScoreGap => self.score_gap,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    fn slot(&mut self, category: Category) -> &mut bool {
        match category {
            Category::Actor => &mut self.actor,
            Category::Obstacle => &mut self.obstacle,
            Category::Ground => &mut self.ground,
            Category::ScoreGap => &mut self.score_gap,
        }
    }
}

/// Collision shape, centered on the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned rectangle
    Rect { half_extents: Vec2 },
}

/// Axis-aligned bounds (for renderers and broad checks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// A simulated physical entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    /// Only integrated while `dynamic` is set
    pub vel: Vec2,
    pub shape: Shape,
    pub category: Category,
    /// Subject to gravity and velocity integration
    pub dynamic: bool,
    /// Categories this body is physically blocked by
    pub collision_mask: CategorySet,
    /// Categories this body reports overlap events for
    pub contact_mask: CategorySet,
}

impl Body {
    /// The player-controlled circle. Starts frozen.
    pub fn actor(id: BodyId, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            shape: Shape::Circle { radius },
            category: Category::Actor,
            dynamic: false,
            collision_mask: CategorySet::of(&[Category::Obstacle, Category::Ground]),
            contact_mask: CategorySet::of(&[
                Category::Obstacle,
                Category::Ground,
                Category::ScoreGap,
            ]),
        }
    }

    /// A fixed rectangle with no masks of its own
    pub fn fixed_rect(id: BodyId, category: Category, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            shape: Shape::Rect {
                half_extents: size * 0.5,
            },
            category,
            dynamic: false,
            collision_mask: CategorySet::EMPTY,
            contact_mask: CategorySet::EMPTY,
        }
    }

    pub fn bounds(&self) -> Aabb {
        match self.shape {
            Shape::Circle { radius } => Aabb::from_center(self.pos, Vec2::splat(radius)),
            Shape::Rect { half_extents } => Aabb::from_center(self.pos, half_extents),
        }
    }

    /// Whether an overlap between these two bodies is reported as a contact
    pub fn reports_contact_with(&self, other: &Body) -> bool {
        self.contact_mask.contains(other.category) || other.contact_mask.contains(self.category)
    }

    /// Whether this body is pushed out of `other` on overlap
    pub fn is_blocked_by(&self, other: &Body) -> bool {
        self.dynamic && self.collision_mask.contains(other.category)
    }
}
