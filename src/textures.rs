use std::path::Path;

use raylib::consts::PixelFormat;
use raylib::prelude::*;

use crate::color::pack_color;
use crate::error::LoadError;

/// A horizontal strip of `count` square tiles, `size` pixels on a side,
/// kept on the CPU so it can be sampled per pixel.
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    pub size: usize,
    pub count: usize,
    img_w: usize,
    img: Vec<u32>,
}

impl TextureAtlas {
    /// Decodes an image file with raylib and slices it into tiles.
    ///
    /// The image must already be 8-bit RGBA; raylib would happily convert
    /// anything else on the fly, which would hide a broken asset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = path.to_str().ok_or_else(|| LoadError::Decode {
            path: path.to_path_buf(),
            reason: "path is not valid UTF-8".into(),
        })?;
        let img = Image::load_image(name).map_err(|e| LoadError::Decode {
            path: path.to_path_buf(),
            reason: format!("{e:?}"),
        })?;
        let format = img.format();
        if !matches!(format, PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8) {
            return Err(LoadError::ChannelDepth {
                path: path.to_path_buf(),
                format: format!("{format:?}"),
            });
        }
        let w = img.width().max(0) as usize;
        let h = img.height().max(0) as usize;
        let pixels = img
            .get_image_data()
            .iter()
            .map(|c| pack_color(c.r, c.g, c.b, c.a))
            .collect();
        Self::from_pixels(w, h, pixels)
    }

    /// Builds an atlas from tightly packed `r, g, b, a` bytes.
    pub fn from_rgba(width: usize, height: usize, bytes: &[u8]) -> Result<Self, LoadError> {
        let expected = width * height * 4;
        if bytes.len() != expected {
            return Err(LoadError::BadBuffer {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| pack_color(p[0], p[1], p[2], p[3]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, LoadError> {
        if width == 0 || height == 0 || width % height != 0 {
            return Err(LoadError::NotTileable { width, height });
        }
        if pixels.len() != width * height {
            return Err(LoadError::BadBuffer {
                expected: width * height * 4,
                actual: pixels.len() * 4,
            });
        }
        Ok(Self {
            size: height,
            count: width / height,
            img_w: width,
            img: pixels,
        })
    }

    /// Color at column `col`, row `row` of tile `idx`.
    #[inline]
    pub fn pixel_at(&self, col: usize, row: usize, idx: usize) -> u32 {
        assert!(
            col < self.size && row < self.size && idx < self.count,
            "texel ({col}, {row}) of tile {idx} outside {}x{} atlas of {} tiles",
            self.size,
            self.size,
            self.count
        );
        self.img[col + idx * self.size + row * self.img_w]
    }

    /// Nearest-neighbour stretch of one tile column to `out_height` samples.
    pub fn scaled_column(&self, idx: usize, col: usize, out_height: usize) -> Vec<u32> {
        assert!(col < self.size && idx < self.count);
        (0..out_height)
            .map(|y| self.pixel_at(col, (y * self.size) / out_height, idx))
            .collect()
    }
}
