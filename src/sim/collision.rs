//! Axis-aligned collision predicates
//!
//! Everything in this game is a box. Overlap is the strict half-extent test
//! `|dx| < half_w && |dy| < half_h`, so touching edges do not collide.

use glam::Vec2;

use crate::consts::*;

/// Strict AABB overlap between a point-like probe and a box of the given
/// half extents centered at `center`.
pub fn overlaps(probe: Vec2, center: Vec2, half_w: f32, half_h: f32) -> bool {
    (probe.x - center.x).abs() < half_w && (probe.y - center.y).abs() < half_h
}

/// Bullet vs enemy, using the enemy's half extents
pub fn bullet_hits_enemy(bullet: Vec2, enemy: Vec2) -> bool {
    overlaps(bullet, enemy, ENEMY_WIDTH / 2.0, ENEMY_HEIGHT / 2.0)
}

/// Player vs power-up, using the fixed pickup box
pub fn player_collects(player: Vec2, power_up: Vec2) -> bool {
    overlaps(
        power_up,
        player,
        POWERUP_PICKUP_RANGE,
        POWERUP_PICKUP_RANGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_inside_half_extents() {
        let enemy = Vec2::new(100.0, 100.0);
        assert!(bullet_hits_enemy(Vec2::new(110.0, 105.0), enemy));
        assert!(bullet_hits_enemy(enemy, enemy));
    }

    #[test]
    fn edge_contact_is_a_miss() {
        let enemy = Vec2::new(100.0, 100.0);
        // Exactly half the width away: strict inequality, no hit
        assert!(!bullet_hits_enemy(Vec2::new(100.0 + ENEMY_WIDTH / 2.0, 100.0), enemy));
        assert!(!bullet_hits_enemy(Vec2::new(100.0, 100.0 + ENEMY_HEIGHT / 2.0), enemy));
    }

    #[test]
    fn clear_miss() {
        let enemy = Vec2::new(100.0, 100.0);
        assert!(!bullet_hits_enemy(Vec2::new(200.0, 100.0), enemy));
        assert!(!bullet_hits_enemy(Vec2::new(100.0, 300.0), enemy));
    }

    #[test]
    fn pickup_box_is_twenty_units() {
        let player = Vec2::new(400.0, 550.0);
        assert!(player_collects(player, Vec2::new(419.0, 550.0)));
        assert!(!player_collects(player, Vec2::new(421.0, 550.0)));
        assert!(player_collects(player, Vec2::new(400.0, 531.0)));
        assert!(!player_collects(player, Vec2::new(400.0, 570.0)));
    }
}
