//! Grid ray casting (DDA).
use crate::core::maze::{DOOR_THRESHOLD, EMPTY, TileMap};

/// First wall a ray runs into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersect {
    pub map_x: usize,
    pub map_y: usize,
    /// 0 when the ray crossed a vertical grid line (x boundary), 1 for a
    /// horizontal one.
    pub side: u8,
    /// Length along the ray, not yet fisheye corrected.
    pub distance: f32,
    pub hit_x: f32,
    pub hit_y: f32,
    pub impact: u8,
}

/// Walks the grid cell by cell from `(ox, oy)` along `a` until it enters a
/// wall. Door thresholds are transparent. Returns `None` if the ray leaves
/// the map or travels past `max_distance` first.
pub fn cast_ray(map: &TileMap, ox: f32, oy: f32, a: f32, max_distance: f32) -> Option<Intersect> {
    let (dir_x, dir_y) = (a.cos(), a.sin());
    let mut map_x = ox.floor() as i64;
    let mut map_y = oy.floor() as i64;

    let delta_x = if dir_x == 0.0 { f32::INFINITY } else { (1.0 / dir_x).abs() };
    let delta_y = if dir_y == 0.0 { f32::INFINITY } else { (1.0 / dir_y).abs() };

    let (step_x, mut side_x) = if dir_x < 0.0 {
        (-1, (ox - map_x as f32) * delta_x)
    } else {
        (1, (map_x as f32 + 1.0 - ox) * delta_x)
    };
    let (step_y, mut side_y) = if dir_y < 0.0 {
        (-1, (oy - map_y as f32) * delta_y)
    } else {
        (1, (map_y as f32 + 1.0 - oy) * delta_y)
    };

    loop {
        let side = if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            0
        } else {
            side_y += delta_y;
            map_y += step_y;
            1
        };
        if !map.in_bounds(map_x, map_y) {
            return None;
        }

        let distance = if side == 0 {
            (map_x as f32 - ox + (1 - step_x) as f32 / 2.0) / dir_x
        } else {
            (map_y as f32 - oy + (1 - step_y) as f32 / 2.0) / dir_y
        };
        if distance > max_distance {
            return None;
        }

        let (cx, cy) = (map_x as usize, map_y as usize);
        let impact = map.get(cx, cy);
        if impact == EMPTY || impact == DOOR_THRESHOLD {
            continue;
        }
        return Some(Intersect {
            map_x: cx,
            map_y: cy,
            side,
            distance,
            hit_x: ox + distance * dir_x,
            hit_y: oy + distance * dir_y,
            impact,
        });
    }
}

/// Horizontal texture coordinate of a wall hit for tiles `size` pixels wide.
///
/// The hit point is taken relative to the nearest grid line, so both
/// fractions lie in `[-0.5, 0.5)` and the one that is not ~0 tells which
/// face was struck.
pub fn wall_x_texcoord(hit_x: f32, hit_y: f32, size: usize) -> usize {
    let x = hit_x - (hit_x + 0.5).floor();
    let y = hit_y - (hit_y + 0.5).floor();
    let frac = if y.abs() > x.abs() { y } else { x };
    let mut tex = (frac * size as f32) as i64;
    if tex < 0 {
        tex += size as i64;
    }
    (tex.max(0) as usize).min(size.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    /// Reference answer: tiny fixed steps along the ray.
    fn march(map: &TileMap, ox: f32, oy: f32, a: f32, max: f32) -> Option<(usize, usize)> {
        let mut t = 0.0f32;
        while t < max {
            let (x, y) = (ox + t * a.cos(), oy + t * a.sin());
            let (i, j) = (x.floor() as i64, y.floor() as i64);
            if !map.in_bounds(i, j) {
                return None;
            }
            let c = map.get(i as usize, j as usize);
            if c != EMPTY && c != DOOR_THRESHOLD {
                return Some((i as usize, j as usize));
            }
            t += 0.001;
        }
        None
    }

    #[test]
    fn hits_east_wall_of_bottom_corridor() {
        let map = TileMap::default();
        let hit = cast_ray(&map, 2.0, 14.0, 0.0, 20.0).unwrap();
        assert_eq!((hit.map_x, hit.map_y, hit.side), (15, 14, 0));
        assert!((hit.distance - 13.0).abs() < 1e-4);
        assert!((hit.hit_x - 15.0).abs() < 1e-4);
    }

    #[test]
    fn ray_passes_through_door_thresholds() {
        let map = TileMap::default();
        // (11, 3) is a threshold; looking down from (11.5, 2.5) would start in
        // the door itself, so look up at the door from below instead
        let hit = cast_ray(&map, 11.5, 5.5, -FRAC_PI_2, 20.0).unwrap();
        assert_eq!((hit.map_x, hit.map_y), (11, 2));
        assert_eq!(hit.impact, 3);
        assert_eq!(hit.side, 1);
        assert!((hit.distance - 2.5).abs() < 1e-4);
    }

    #[test]
    fn respects_max_distance() {
        let map = TileMap::default();
        assert!(cast_ray(&map, 2.0, 14.0, 0.0, 12.0).is_none());
    }

    #[test]
    fn leaving_the_map_is_a_miss() {
        let map = TileMap::parse("    ", 2, 2).unwrap();
        assert!(cast_ray(&map, 0.5, 0.5, 0.3, 20.0).is_none());
    }

    #[test]
    fn texcoord_wraps_negative_fractions() {
        // hit on a vertical face at y = 3.25 -> +0.25 of a tile
        assert_eq!(wall_x_texcoord(5.0, 3.25, 64), 16);
        // y = 3.75 is -0.25 relative to the line at 4 -> wraps to 48
        assert_eq!(wall_x_texcoord(5.0, 3.75, 64), 48);
        assert_eq!(wall_x_texcoord(2.5, 7.0, 64), 32);
    }

    proptest! {
        #[test]
        fn dda_agrees_with_marcher_on_axis_rays(
            cell in 0usize..256,
            fx in 0.05f32..0.95,
            fy in 0.05f32..0.95,
            dir in 0usize..4,
        ) {
            let map = TileMap::default();
            let (i, j) = (cell % map.w, cell / map.w);
            prop_assume!(map.is_walkable(i, j));
            let (ox, oy) = (i as f32 + fx, j as f32 + fy);
            let a = [0.0, FRAC_PI_2, PI, -FRAC_PI_2][dir];

            let hit = cast_ray(&map, ox, oy, a, 20.0).map(|h| (h.map_x, h.map_y));
            prop_assert_eq!(hit, march(&map, ox, oy, a, 20.0));
        }
    }
}
