use std::f32::consts::TAU;

use raylib::prelude::*;

use crate::core::maze::TileMap;

pub struct Player {
    pub pos: Vector2,
    pub a: f32,   // heading (radians)
    pub fov: f32, // field of view (radians)
    pub turn: i8, // -1 left, 0, 1 right
    pub walk: i8, // -1 back, 0, 1 forward
    pub turn_speed: f32,
    pub walk_speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32, fov: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            a: angle,
            fov,
            turn: 0,
            walk: 0,
            turn_speed: 0.1,
            walk_speed: 0.1,
        }
    }

    /// Cell the camera stands in.
    #[inline]
    pub fn cell(&self) -> (usize, usize) {
        (self.pos.x.max(0.0) as usize, self.pos.y.max(0.0) as usize)
    }

    /// One tick of movement. Each axis of the step is committed on its own,
    /// so running diagonally into a wall slides along it.
    pub fn update_position(&mut self, map: &TileMap) {
        self.a = (self.a + f32::from(self.turn) * self.turn_speed).rem_euclid(TAU);
        let step = f32::from(self.walk) * self.walk_speed;
        let nx = self.pos.x + self.a.cos() * step;
        let ny = self.pos.y + self.a.sin() * step;

        if map.is_walkable_at(nx, self.pos.y) {
            self.pos.x = nx;
        }
        if map.is_walkable_at(self.pos.x, ny) {
            self.pos.y = ny;
        }
    }
}
