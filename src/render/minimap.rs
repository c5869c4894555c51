//! Top-down overlay in the bottom-right corner.
use crate::color;
use crate::core::maze::TileMap;
use crate::framebuffer::Framebuffer;
use crate::render::render3d::{FAR, RenderSettings, Scene, column_angle};

const CONE_RAYS: usize = 24;
const CONE_COLOR: u32 = color::pack_color(160, 160, 160, 255);

/// Screen placement of the minimap: origin plus the size of one map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimapLayout {
    pub start_x: usize,
    pub start_y: usize,
    pub cell_w: usize,
    pub cell_h: usize,
}

impl MinimapLayout {
    /// A quarter of the screen in each direction, flush with the bottom-right
    /// corner. `None` when the screen is too small for one pixel per cell.
    pub fn new(fb: &Framebuffer, map: &TileMap) -> Option<Self> {
        let cell_w = fb.width / (map.w * 4);
        let cell_h = fb.height / (map.h * 4);
        if cell_w == 0 || cell_h == 0 {
            return None;
        }
        Some(Self {
            start_x: fb.width - map.w * cell_w,
            start_y: fb.height - map.h * cell_h,
            cell_w,
            cell_h,
        })
    }

    /// Screen pixel for a continuous map position, if it lands on screen.
    fn project(&self, fb: &Framebuffer, x: f32, y: f32) -> Option<(usize, usize)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let px = self.start_x + (x * self.cell_w as f32) as usize;
        let py = self.start_y + (y * self.cell_h as f32) as usize;
        (px < fb.width && py < fb.height).then_some((px, py))
    }
}

pub fn draw_minimap(fb: &mut Framebuffer, scene: &Scene, zbuffer: &[f32], settings: &RenderSettings) {
    let map = scene.map;
    let Some(layout) = MinimapLayout::new(fb, map) else {
        return;
    };

    // cells take the colour of their texture's top-left texel
    let floor = scene.walls.pixel_at(0, 0, settings.floor_texture);
    for j in 0..map.h {
        for i in 0..map.w {
            let color = if map.is_walkable(i, j) {
                floor
            } else {
                scene.walls.pixel_at(0, 0, map.get(i, j) as usize)
            };
            fb.draw_rectangle(
                layout.start_x + i * layout.cell_w,
                layout.start_y + j * layout.cell_h,
                layout.cell_w,
                layout.cell_h,
                color,
            );
        }
    }

    draw_view_cone(fb, &layout, scene, zbuffer, settings);

    let player = scene.player;
    if let Some((px, py)) = layout.project(fb, player.pos.x, player.pos.y) {
        fb.draw_rectangle(px, py, layout.cell_w / 2, layout.cell_h / 2, color::GREEN);
    }
    for sprite in scene.sprites {
        if let Some((sx, sy)) = layout.project(fb, sprite.x, sprite.y) {
            fb.draw_rectangle(sx, sy, layout.cell_w / 2, layout.cell_h / 2, color::RED);
        }
    }
}

/// Traces a fan of the frame's rays out to the walls they hit.
fn draw_view_cone(
    fb: &mut Framebuffer,
    layout: &MinimapLayout,
    scene: &Scene,
    zbuffer: &[f32],
    settings: &RenderSettings,
) {
    let player = scene.player;
    let width = zbuffer.len();
    if width == 0 {
        return;
    }
    for k in 0..CONE_RAYS {
        let x = k * width / CONE_RAYS;
        let a = column_angle(player, x, width);
        let reach = if zbuffer[x] >= FAR {
            settings.max_cast_distance
        } else {
            // back from perpendicular depth to distance along the ray
            zbuffer[x] / (a - player.a).cos().max(f32::EPSILON)
        };
        let mut t = 0.0;
        while t < reach {
            let (cx, cy) = (player.pos.x + t * a.cos(), player.pos.y + t * a.sin());
            match layout.project(fb, cx, cy) {
                Some((px, py)) => fb.set_pixel(px, py, CONE_COLOR),
                None => break,
            }
            t += 0.05;
        }
    }
}
