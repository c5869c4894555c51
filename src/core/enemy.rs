//! Monsters: billboard sprites that chase the camera.
use std::cmp::Ordering;
use std::f32::consts::{PI, TAU};

use crate::core::maze::TileMap;
use crate::core::player::Player;

/// Folds an angle into `(-PI, PI]`.
#[inline]
pub fn normalize_angle(mut a: f32) -> f32 {
    while a > PI {
        a -= TAU;
    }
    while a <= -PI {
        a += TAU;
    }
    a
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub tex_id: usize,
    /// Distance to the camera, refreshed every frame before sorting.
    pub player_dist: f32,
}

impl Sprite {
    pub fn new(x: f32, y: f32, tex_id: usize) -> Self {
        Self { x, y, tex_id, player_dist: 0.0 }
    }

    #[inline]
    pub fn distance_to(&self, player: &Player) -> f32 {
        (self.x - player.pos.x).hypot(self.y - player.pos.y)
    }

    pub fn update_distance(&mut self, player: &Player) {
        self.player_dist = self.distance_to(player);
    }

    /// Angle between the camera heading and the direction to this sprite.
    pub fn bearing_from(&self, player: &Player) -> f32 {
        let dir = (self.y - player.pos.y).atan2(self.x - player.pos.x);
        normalize_angle(dir - player.a)
    }

    /// Farther sprites order first.
    #[inline]
    pub fn far_first(a: &Sprite, b: &Sprite) -> Ordering {
        b.player_dist.total_cmp(&a.player_dist)
    }

    /// Steps `speed` cells toward the camera, resolving walls per axis.
    pub fn update_position(&mut self, player: &Player, map: &TileMap, speed: f32) {
        let dx = player.pos.x - self.x;
        let dy = player.pos.y - self.y;
        let len = dx.hypot(dy);
        if len <= f32::EPSILON {
            return;
        }
        let nx = self.x + dx / len * speed;
        let ny = self.y + dy / len * speed;
        if map.is_walkable_at(nx, self.y) {
            self.x = nx;
        }
        if map.is_walkable_at(self.x, ny) {
            self.y = ny;
        }
    }
}

/// Refreshes every cached distance and sorts the set far-to-near.
pub fn sort_far_first(sprites: &mut [Sprite], player: &Player) {
    for s in sprites.iter_mut() {
        s.update_distance(player);
    }
    sprites.sort_by(Sprite::far_first);
}

/// Forward-cone hitscan: the nearest sprite within `range` whose bearing is
/// inside `cone * fov` of the heading. Walls are not consulted.
pub fn hit_test(sprites: &[Sprite], player: &Player, range: f32, cone: f32) -> Option<usize> {
    let half_width = player.fov * cone;
    sprites
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.distance_to(player), s.bearing_from(player)))
        .filter(|&(_, dist, bearing)| dist < range && bearing.abs() <= half_width)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _, _)| i)
}

pub fn default_monsters() -> Vec<Sprite> {
    vec![
        Sprite::new(4.0, 14.0, 0),
        Sprite::new(6.0, 14.5, 1),
        Sprite::new(8.0, 13.5, 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_3;

    fn camera(x: f32, y: f32, a: f32) -> Player {
        Player::new(x, y, a, FRAC_PI_3)
    }

    #[test]
    fn normalize_stays_in_half_open_range() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.5 - 4.0 * TAU) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn sorted_farthest_first() {
        let cam = camera(2.0, 14.0, 0.0);
        let mut sprites = vec![
            Sprite::new(3.0, 14.0, 0),
            Sprite::new(9.0, 14.0, 1),
            Sprite::new(5.0, 13.0, 2),
            Sprite::new(2.0, 12.0, 0),
        ];
        sort_far_first(&mut sprites, &cam);
        assert_eq!(sprites[0].tex_id, 1);
        for pair in sprites.windows(2) {
            assert!(pair[0].player_dist >= pair[1].player_dist);
        }
        assert!((sprites[3].player_dist - 1.0).abs() < 1e-6);
    }

    #[test]
    fn chases_the_camera() {
        let map = TileMap::default();
        let cam = camera(2.0, 14.0, 0.0);
        let mut s = Sprite::new(6.0, 14.0, 0);
        s.update_position(&cam, &map, 0.5);
        assert!((s.x - 5.5).abs() < 1e-6);
        assert!((s.y - 14.0).abs() < 1e-6);
    }

    #[test]
    fn chase_slides_along_walls() {
        let map = TileMap::default();
        // camera straight below through the wall row at y = 12
        let cam = camera(3.5, 14.5, 0.0);
        let mut s = Sprite::new(3.4, 11.95, 0);
        s.update_position(&cam, &map, 0.2);
        assert!(s.x > 3.4);
        assert_eq!(s.y, 11.95);
    }

    #[test]
    fn sitting_on_the_camera_does_not_move() {
        let map = TileMap::default();
        let cam = camera(4.0, 14.0, 0.0);
        let mut s = Sprite::new(4.0, 14.0, 0);
        s.update_position(&cam, &map, 0.1);
        assert_eq!((s.x, s.y), (4.0, 14.0));
    }

    #[test]
    fn hitscan_picks_nearest_sprite_in_the_cone() {
        let cam = camera(2.0, 14.0, 0.0);
        let sprites = vec![
            Sprite::new(7.0, 14.0, 0),
            Sprite::new(4.0, 14.02, 1),
            Sprite::new(4.0, 12.0, 2),
        ];
        assert_eq!(hit_test(&sprites, &cam, 8.0, 0.05), Some(1));
    }

    #[test]
    fn hitscan_misses_outside_range_or_cone() {
        let cam = camera(2.0, 14.0, 0.0);
        let far = [Sprite::new(12.0, 14.0, 0)];
        assert_eq!(hit_test(&far, &cam, 8.0, 0.05), None);
        let wide = [Sprite::new(4.0, 13.0, 0)];
        assert_eq!(hit_test(&wide, &cam, 8.0, 0.05), None);
    }

    #[test]
    fn hitscan_ignores_walls() {
        // monster behind the wall column at x = 8, still inside range
        let cam = camera(6.5, 7.5, 0.0);
        let sprites = [Sprite::new(9.5, 7.5, 0)];
        assert!(!TileMap::default().is_walkable(8, 7));
        assert_eq!(hit_test(&sprites, &cam, 8.0, 0.05), Some(0));
    }
}
