//! Scene state and the per-tick simulation step.
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::core::enemy::{Sprite, default_monsters, hit_test, sort_far_first};
use crate::core::maze::{DEFAULT_H, DEFAULT_W, TileMap};
use crate::core::player::Player;
use crate::core::process_events::Intents;
use crate::error::SceneError;
use crate::render::render3d::Scene;
use crate::settings::Settings;
use crate::textures::TextureAtlas;

/// Gameplay constants that are not about drawing.
#[derive(Clone, Copy, Debug)]
pub struct Tuning {
    pub monster_speed: f32,
    pub hit_distance: f32,
    pub hit_cone: f32,
    pub shot: Duration,
}

impl Tuning {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            monster_speed: settings.monster_speed,
            hit_distance: settings.hit_distance,
            hit_cone: settings.hit_cone,
            shot: settings.shot(),
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub struct GameState {
    pub map: TileMap,
    pub player: Player,
    pub monsters: Vec<Sprite>,
    pub tex_walls: TextureAtlas,
    pub tex_monst: TextureAtlas,
    pub tex_gun: Option<TextureAtlas>,
    pub tuning: Tuning,
    shooting_until: Option<Instant>,
}

impl GameState {
    /// Assembles a scene and checks that every texture id it refers to exists.
    pub fn new(
        map: TileMap,
        player: Player,
        monsters: Vec<Sprite>,
        tex_walls: TextureAtlas,
        tex_monst: TextureAtlas,
        tex_gun: Option<TextureAtlas>,
        tuning: Tuning,
    ) -> Result<Self, SceneError> {
        if let Some(code) = map.wall_codes().find(|&c| c as usize >= tex_walls.count) {
            return Err(SceneError::UnknownWallTexture {
                code,
                count: tex_walls.count,
            });
        }
        if let Some(s) = monsters.iter().find(|s| s.tex_id >= tex_monst.count) {
            return Err(SceneError::TextureId {
                what: "monster",
                id: s.tex_id,
                count: tex_monst.count,
            });
        }
        if !map.is_walkable_at(player.pos.x, player.pos.y) {
            return Err(SceneError::SpawnBlocked {
                x: player.pos.x,
                y: player.pos.y,
            });
        }
        let mut state = Self {
            map,
            player,
            monsters,
            tex_walls,
            tex_monst,
            tex_gun,
            tuning,
            shooting_until: None,
        };
        sort_far_first(&mut state.monsters, &state.player);
        Ok(state)
    }

    /// Loads atlases and the map named in `settings` and places the camera.
    pub fn from_settings(settings: &Settings) -> Result<Self, SceneError> {
        let tex_walls = TextureAtlas::load(&settings.walls)?;
        info!("Wall atlas {:?}: {} tiles of {}px", settings.walls, tex_walls.count, tex_walls.size);
        let tex_monst = TextureAtlas::load(&settings.monsters)?;
        info!("Monster atlas {:?}: {} tiles of {}px", settings.monsters, tex_monst.count, tex_monst.size);
        let tex_gun = match &settings.gun {
            Some(path) => {
                let gun = TextureAtlas::load(path)?;
                info!("Gun atlas {:?}: {} frames", path, gun.count);
                Some(gun)
            }
            None => None,
        };

        for (what, id) in [("floor", settings.floor_texture), ("ceiling", settings.ceiling_texture)] {
            if id >= tex_walls.count {
                return Err(SceneError::TextureId {
                    what,
                    id,
                    count: tex_walls.count,
                });
            }
        }

        let map = match &settings.map {
            Some(path) => TileMap::load(path, DEFAULT_W, DEFAULT_H)?,
            None => TileMap::default(),
        };
        info!("Map {}x{}", map.w, map.h);

        let mut player = Player::new(settings.start_x, settings.start_y, settings.start_heading, settings.fov);
        player.turn_speed = settings.turn_speed;
        player.walk_speed = settings.walk_speed;

        Self::new(
            map,
            player,
            default_monsters(),
            tex_walls,
            tex_monst,
            tex_gun,
            Tuning::from_settings(settings),
        )
    }

    /// Applies this tick's input: movement intents, door use and firing.
    pub fn apply(&mut self, intents: &Intents, now: Instant) {
        self.player.turn = intents.turn;
        self.player.walk = intents.walk;
        if intents.use_door {
            self.use_door();
        }
        if intents.fire {
            self.fire(now);
        }
    }

    /// Opens the door next to the camera, if there is one.
    pub fn use_door(&mut self) -> bool {
        let (i, j) = self.player.cell();
        let (di, dj) = self.map.check_door(i, j);
        if (di, dj) == (0, 0) {
            return false;
        }
        let (x, y) = ((i as i64 + di as i64) as usize, (j as i64 + dj as i64) as usize);
        let opened = self.map.open_door(x, y);
        if opened {
            info!("Opened door at ({x}, {y})");
        }
        opened
    }

    /// Starts the muzzle-flash timer and removes the monster hit, if any.
    pub fn fire(&mut self, now: Instant) -> Option<Sprite> {
        self.shooting_until = Some(now + self.tuning.shot);
        let i = hit_test(&self.monsters, &self.player, self.tuning.hit_distance, self.tuning.hit_cone)?;
        let killed = self.monsters.remove(i);
        info!("Killed monster at ({:.2}, {:.2}), {} left", killed.x, killed.y, self.monsters.len());
        Some(killed)
    }

    /// Firing frame stays up until the wall-clock timer runs out.
    pub fn is_firing(&self, now: Instant) -> bool {
        self.shooting_until.is_some_and(|until| now < until)
    }

    /// Advances camera and monsters by one tick, then re-sorts the monsters
    /// far-to-near for drawing.
    pub fn tick(&mut self) {
        self.player.update_position(&self.map);
        for m in self.monsters.iter_mut() {
            m.update_position(&self.player, &self.map, self.tuning.monster_speed);
        }
        sort_far_first(&mut self.monsters, &self.player);
        debug!(
            x = self.player.pos.x,
            y = self.player.pos.y,
            a = self.player.a,
            monsters = self.monsters.len(),
            "tick"
        );
    }

    pub fn scene(&self, now: Instant) -> Scene<'_> {
        Scene {
            map: &self.map,
            player: &self.player,
            sprites: &self.monsters,
            walls: &self.tex_walls,
            monsters: &self.tex_monst,
            gun: self.tex_gun.as_ref(),
            firing: self.is_firing(now),
        }
    }
}
