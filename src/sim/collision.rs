//! Collision detection between the craft and obstacles
//!
//! Everything is an axis-aligned box. Obstacle rotation is cosmetic and never
//! affects the hitbox.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Pull every side in by `margin`
    pub fn shrink(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Forgiving hitbox used for player collisions
    pub fn hitbox(&self, margin: f32) -> Aabb {
        self.bounds().shrink(margin)
    }
}

/// Index of the first obstacle (in collection order) touching the player
pub fn first_hit(player: &Player, obstacles: &[Obstacle], margin: f32) -> Option<usize> {
    let player_box = player.bounds();
    obstacles
        .iter()
        .position(|obstacle| player_box.overlaps(&obstacle.hitbox(margin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    fn player_at(x: f32, y: f32) -> Player {
        Player {
            pos: Vec2::new(x, y),
            size: Vec2::splat(40.0),
            shield_active: true,
            shield_charge: 100.0,
        }
    }

    fn obstacle_at(id: u32, x: f32, y: f32, size: f32) -> Obstacle {
        Obstacle {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::splat(size),
            speed: 4.0,
            kind: ObstacleKind::Asteroid,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_pos_size(Vec2::splat(5.0), Vec2::splat(10.0));
        let c = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        // Touching edges is not a hit
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_margin_forgives_grazes() {
        let player = player_at(60.0, 200.0);
        // Obstacle overlaps the raw player box by 4 units horizontally
        let grazing = obstacle_at(1, 96.0, 200.0, 30.0);
        assert!(player.bounds().overlaps(&grazing.bounds()));
        assert_eq!(first_hit(&player, &[grazing], 5.0), None);

        // 6 units in is past the margin
        let solid = obstacle_at(2, 94.0, 200.0, 30.0);
        assert_eq!(first_hit(&player, &[solid], 5.0), Some(0));
    }

    #[test]
    fn test_first_hit_uses_collection_order() {
        let player = player_at(60.0, 200.0);
        let obstacles = [
            obstacle_at(1, 400.0, 0.0, 30.0),
            obstacle_at(2, 70.0, 210.0, 30.0),
            obstacle_at(3, 65.0, 205.0, 30.0),
        ];
        assert_eq!(first_hit(&player, &obstacles, 5.0), Some(1));
    }

    #[test]
    fn test_no_hit_when_field_empty() {
        assert_eq!(first_hit(&player_at(0.0, 0.0), &[], 5.0), None);
    }
}
