//! Contact classification
//!
//! Maps an unordered pair of body categories to what the run should do about
//! it. The table is explicit so every pair has a reviewed outcome.

use serde::{Deserialize, Serialize};

use super::body::{BodyId, Category};

/// What a new contact means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    /// Ends the run
    Lethal,
    /// Awards a point and consumes the sensor
    Scoring,
    /// No effect
    Ignored,
}

/// A begin-overlap event between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: BodyId,
    pub a_category: Category,
    pub b: BodyId,
    pub b_category: Category,
}

impl Contact {
    pub fn outcome(&self) -> ContactOutcome {
        classify(self.a_category, self.b_category)
    }

    /// The body of the given category, if either side has it
    pub fn body_of(&self, category: Category) -> Option<BodyId> {
        if self.a_category == category {
            Some(self.a)
        } else if self.b_category == category {
            Some(self.b)
        } else {
            None
        }
    }

    /// Stable ordering key (lowest body id first)
    pub fn order_key(&self) -> (BodyId, BodyId) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// Classify a category pair; order does not matter
pub fn classify(a: Category, b: Category) -> ContactOutcome {
    use Category::*;
    match (a, b) {
        (Actor, Obstacle) | (Obstacle, Actor) => ContactOutcome::Lethal,
        (Actor, Ground) | (Ground, Actor) => ContactOutcome::Lethal,
        (Actor, ScoreGap) | (ScoreGap, Actor) => ContactOutcome::Scoring,
        _ => ContactOutcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table() {
        use Category::*;
        assert_eq!(classify(Actor, Obstacle), ContactOutcome::Lethal);
        assert_eq!(classify(Actor, Ground), ContactOutcome::Lethal);
        assert_eq!(classify(Actor, ScoreGap), ContactOutcome::Scoring);
        assert_eq!(classify(Obstacle, ScoreGap), ContactOutcome::Ignored);
        assert_eq!(classify(Obstacle, Ground), ContactOutcome::Ignored);
        assert_eq!(classify(Actor, Actor), ContactOutcome::Ignored);
    }

    #[test]
    fn test_pair_order_irrelevant() {
        for a in Category::ALL {
            for b in Category::ALL {
                assert_eq!(classify(a, b), classify(b, a), "{a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn test_body_of_finds_sensor_on_either_side() {
        let c = Contact {
            a: BodyId(7),
            a_category: Category::ScoreGap,
            b: BodyId(1),
            b_category: Category::Actor,
        };
        assert_eq!(c.body_of(Category::ScoreGap), Some(BodyId(7)));
        assert_eq!(c.body_of(Category::Actor), Some(BodyId(1)));
        assert_eq!(c.body_of(Category::Ground), None);
        assert_eq!(c.order_key(), (BodyId(1), BodyId(7)));
        assert_eq!(c.outcome(), ContactOutcome::Scoring);
    }
}
