//! Billboard sprites, occluded by the per-column wall depth.
//!
//! Sprites are painted in the order given; callers sort them far-to-near so
//! closer ones overpaint farther ones. Only walls are depth tested.
use crate::color::alpha;
use crate::core::enemy::Sprite;
use crate::core::player::Player;
use crate::framebuffer::Framebuffer;
use crate::render::render3d::{MIN_DISTANCE, RenderSettings};
use crate::textures::TextureAtlas;

pub fn draw_sprite_world(
    framebuffer: &mut Framebuffer,
    player: &Player,
    texman: &TextureAtlas,
    zbuffer: &[f32],
    sprite: &Sprite,
    settings: &RenderSettings,
) {
    let sw = framebuffer.width as i64;
    let sh = framebuffer.height as i64;
    let angle_diff = sprite.bearing_from(player);
    let dist = sprite.distance_to(player);
    if dist > settings.max_sprite_distance {
        return;
    }

    let size = ((sh as f32 / dist.max(MIN_DISTANCE)) as usize).min(settings.max_sprite_size);
    if size == 0 {
        return;
    }
    let h_offset = (angle_diff * sw as f32 / player.fov) as i64 + sw / 2 - size as i64 / 2;
    let v_offset = sh / 2 - size as i64 / 2;

    for i in 0..size {
        let sx = h_offset + i as i64;
        if sx < 0 || sx >= sw {
            continue;
        }
        if zbuffer[sx as usize] < dist {
            continue; // a wall is closer on this column
        }
        let tx = i * texman.size / size;
        for j in 0..size {
            let sy = v_offset + j as i64;
            if sy < 0 || sy >= sh {
                continue;
            }
            let color = texman.pixel_at(tx, j * texman.size / size, sprite.tex_id);
            if alpha(color) > settings.alpha_cutoff {
                framebuffer.set_pixel(sx as usize, sy as usize, color);
            }
        }
    }
}

pub fn draw_sprites(
    framebuffer: &mut Framebuffer,
    player: &Player,
    texman: &TextureAtlas,
    zbuffer: &[f32],
    sprites: &[Sprite],
    settings: &RenderSettings,
) {
    for sprite in sprites {
        draw_sprite_world(framebuffer, player, texman, zbuffer, sprite, settings);
    }
}
