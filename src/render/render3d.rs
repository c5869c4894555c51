//! 3D renderer: perspective floor/ceiling, textured wall columns, then the
//! overlays drawn on top.
use crate::color::{self, darken};
use crate::core::enemy::Sprite;
use crate::core::maze::TileMap;
use crate::core::player::Player;
use crate::framebuffer::Framebuffer;
use crate::render::casters::{cast_ray, wall_x_texcoord};
use crate::render::{hud, minimap, sprites};
use crate::textures::TextureAtlas;

/// Depth recorded for columns whose ray never hit a wall.
pub const FAR: f32 = 1e3;
/// Smallest distance ever used as a divisor.
pub const MIN_DISTANCE: f32 = 1e-3;

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub floor_texture: usize,
    pub ceiling_texture: usize,
    pub max_cast_distance: f32,
    pub max_sprite_distance: f32,
    pub max_column_height: usize,
    pub max_sprite_size: usize,
    /// Sprite texels with alpha at or below this are cut out.
    pub alpha_cutoff: u8,
    /// HUD pixels of this color are not drawn.
    pub colorkey: u32,
    pub background: u32,
    pub minimap: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            floor_texture: 2,
            ceiling_texture: 4,
            max_cast_distance: 20.0,
            max_sprite_distance: 15.0,
            max_column_height: 2000,
            max_sprite_size: 1000,
            alpha_cutoff: 128,
            colorkey: color::WHITE,
            background: color::WHITE,
            minimap: true,
        }
    }
}

/// Everything one frame is rendered from. Sprites are expected in
/// far-to-near order.
pub struct Scene<'a> {
    pub map: &'a TileMap,
    pub player: &'a Player,
    pub sprites: &'a [Sprite],
    pub walls: &'a TextureAtlas,
    pub monsters: &'a TextureAtlas,
    pub gun: Option<&'a TextureAtlas>,
    pub firing: bool,
}

/// What the frame decided beyond its pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The camera stands next to a closed door; the driver should show the
    /// "open" prompt.
    pub door_prompt: bool,
}

#[inline]
pub fn column_angle(player: &Player, x: usize, width: usize) -> f32 {
    player.a - player.fov / 2.0 + player.fov * x as f32 / width as f32
}

pub struct Renderer {
    pub settings: RenderSettings,
    zbuffer: Vec<f32>,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings, zbuffer: Vec::new() }
    }

    /// Perpendicular wall distance per column from the last frame.
    pub fn depth_buffer(&self) -> &[f32] {
        &self.zbuffer
    }

    pub fn render(&mut self, fb: &mut Framebuffer, scene: &Scene) -> FrameReport {
        fb.set_background_color(self.settings.background);
        fb.clear();
        self.zbuffer.clear();
        self.zbuffer.resize(fb.width, FAR);

        paint_floor_and_ceiling(fb, scene, &self.settings);
        self.render_walls(fb, scene);
        sprites::draw_sprites(fb, scene.player, scene.monsters, &self.zbuffer, scene.sprites, &self.settings);
        if self.settings.minimap {
            minimap::draw_minimap(fb, scene, &self.zbuffer, &self.settings);
        }
        if let Some(gun) = scene.gun {
            hud::draw_gun(fb, gun, scene.firing, self.settings.colorkey);
        }

        FrameReport {
            door_prompt: door_prompt(scene.map, scene.player),
        }
    }

    fn render_walls(&mut self, fb: &mut Framebuffer, scene: &Scene) {
        let player = scene.player;
        let h = fb.height;
        for x in 0..fb.width {
            let ray_a = column_angle(player, x, fb.width);
            let Some(hit) = cast_ray(scene.map, player.pos.x, player.pos.y, ray_a, self.settings.max_cast_distance)
            else {
                continue;
            };

            let d = (hit.distance * (ray_a - player.a).cos()).max(MIN_DISTANCE);
            self.zbuffer[x] = d;

            let column_height = ((h as f32 / d).round() as usize).min(self.settings.max_column_height);
            let tex_x = wall_x_texcoord(hit.hit_x, hit.hit_y, scene.walls.size);
            let column = scene.walls.scaled_column(hit.impact as usize, tex_x, column_height);

            let top = (h / 2) as i64 - (column_height / 2) as i64;
            for (j, &c) in column.iter().enumerate() {
                let y = top + j as i64;
                if y >= 0 && (y as usize) < h {
                    fb.set_pixel(x, y as usize, c);
                }
            }
        }
    }
}

/// Casts every screen row below the horizon onto the floor plane and mirrors
/// it onto the ceiling. Both are darkened so they read apart from walls.
fn paint_floor_and_ceiling(fb: &mut Framebuffer, scene: &Scene, settings: &RenderSettings) {
    let (w, h) = (fb.width, fb.height);
    let player = scene.player;
    let tex = scene.walls;
    let size = tex.size as i64;

    // ray directions stretched so their forward component is 1
    let rays: Vec<(f32, f32)> = (0..w)
        .map(|x| {
            let a = column_angle(player, x, w);
            let k = (a - player.a).cos().max(MIN_DISTANCE);
            (a.cos() / k, a.sin() / k)
        })
        .collect();

    let horizon = h as f32 / 2.0;
    for y in h / 2..h {
        let p = (y as f32 + 0.5 - horizon).max(MIN_DISTANCE);
        let row_distance = horizon / p;
        let ceiling_y = h - 1 - y;
        for (x, &(rx, ry)) in rays.iter().enumerate() {
            let fx = player.pos.x + row_distance * rx;
            let fy = player.pos.y + row_distance * ry;
            let tx = ((fx * size as f32).floor() as i64).rem_euclid(size) as usize;
            let ty = ((fy * size as f32).floor() as i64).rem_euclid(size) as usize;
            fb.set_pixel(x, y, darken(tex.pixel_at(tx, ty, settings.floor_texture)));
            fb.set_pixel(x, ceiling_y, darken(tex.pixel_at(tx, ty, settings.ceiling_texture)));
        }
    }
}

/// Whether the camera's cell has a closed door next to it.
pub fn door_prompt(map: &TileMap, player: &Player) -> bool {
    let (i, j) = player.cell();
    map.in_bounds(i as i64, j as i64) && map.check_door(i, j) != (0, 0)
}
