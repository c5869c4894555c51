use crate::framebuffer::Framebuffer;
use crate::textures::TextureAtlas;

/// Idle frame is tile 0, the firing frame tile 1 when the atlas has one.
#[inline]
pub fn gun_frame(gun: &TextureAtlas, firing: bool) -> usize {
    if firing && gun.count > 1 { 1 } else { 0 }
}

/// Blits the weapon centered on the bottom edge. Pixels equal to
/// `colorkey` are skipped.
pub fn draw_gun(fb: &mut Framebuffer, gun: &TextureAtlas, firing: bool, colorkey: u32) {
    let frame = gun_frame(gun, firing);
    let size = gun.size;
    let gun_x = fb.width.saturating_sub(size) / 2;
    let gun_y = fb.height.saturating_sub(size);

    for y in 0..size {
        let py = gun_y + y;
        if py >= fb.height {
            break;
        }
        for x in 0..size {
            let px = gun_x + x;
            if px >= fb.width {
                break;
            }
            let color = gun.pixel_at(x, y, frame);
            if color != colorkey {
                fb.set_pixel(px, py, color);
            }
        }
    }
}
