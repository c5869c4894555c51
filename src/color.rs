//! Packed 32-bit RGBA colors.
//!
//! Channel layout is `0xAABBGGRR`, so the little-endian bytes of a packed
//! value are `r, g, b, a`, the same order raylib expects for an
//! `R8G8B8A8` texture upload.

pub const WHITE: u32 = pack_color(255, 255, 255, 255);
pub const BLACK: u32 = pack_color(0, 0, 0, 255);
pub const GREEN: u32 = pack_color(0, 255, 0, 255);
pub const RED: u32 = pack_color(255, 0, 0, 255);
pub const YELLOW: u32 = pack_color(255, 255, 0, 255);

#[inline]
pub const fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | r as u32
}

#[inline]
pub const fn unpack_color(color: u32) -> (u8, u8, u8, u8) {
    (
        (color & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        ((color >> 16) & 0xFF) as u8,
        ((color >> 24) & 0xFF) as u8,
    )
}

#[inline]
pub const fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}

/// Halves every color channel and keeps the pixel opaque.
#[inline]
pub const fn darken(color: u32) -> u32 {
    ((color >> 1) & 0x007F_7F7F) | 0xFF00_0000
}
