use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use raylib::core::texture::RaylibTexture2D; // trait for .update_texture()
use raylib::prelude::*;

use tracing::warn;

use crate::color::{self, unpack_color};

/// CPU pixel buffer, row-major, one packed color per pixel.
pub struct Framebuffer {
    pub color_buffer: Vec<u32>,
    pub width: usize,
    pub height: usize,
    pub background_color: u32,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let bg = color::WHITE;
        Self {
            color_buffer: vec![bg; width * height],
            width,
            height,
            background_color: bg,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_background_color(&mut self, c: u32) {
        self.background_color = c;
    }

    /// Writes one pixel. Coordinates outside the buffer are a caller bug.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} framebuffer",
            self.width,
            self.height
        );
        self.color_buffer[x + y * self.width] = color;
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height);
        self.color_buffer[x + y * self.width]
    }

    /// Fills a rectangle, clipping whatever falls past the right or bottom edge.
    pub fn draw_rectangle(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for cy in y..y_end {
            let row = cy * self.width;
            for cx in x..x_end {
                self.color_buffer[row + cx] = color;
            }
        }
    }

    /// Serializes the buffer as a binary PPM (P6); alpha is dropped.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut rgb = Vec::with_capacity(self.color_buffer.len() * 3);
        for &c in &self.color_buffer {
            let (r, g, b, _) = unpack_color(c);
            rgb.extend_from_slice(&[r, g, b]);
        }
        out.write_all(&rgb)?;
        out.flush()
    }

    pub fn save_ppm(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_ppm(BufWriter::new(file))
    }

    /// Pixels as tightly packed `r, g, b, a` bytes, row-major.
    pub fn rgba_bytes(&self) -> Vec<u8> {
        self.color_buffer.iter().flat_map(|c| c.to_le_bytes()).collect()
    }

    /// Uploads the pixels into a persistent `R8G8B8A8` texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        if let Err(e) = tex.update_texture(&self.rgba_bytes()) {
            warn!("Screen texture upload failed: {e:?}");
        }
    }
}
