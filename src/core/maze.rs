//! Tile map: parsing, walkability and doors.
use std::fs;
use std::path::Path;

use crate::error::MapError;

pub const EMPTY: u8 = 0;
pub const DOOR: u8 = 3;
pub const DOOR_THRESHOLD: u8 = 9;

pub const DEFAULT_W: usize = 16;
pub const DEFAULT_H: usize = 16;

/// Built-in level. Digits are wall textures, `3` is a closed door and `9`
/// marks the walkable cell in front of a door.
pub const DEFAULT_LAYOUT: &str = concat!(
    "1111111111111111",
    "1              1",
    "1     1111131111",
    "1     1    9   1",
    "1     1        1",
    "1 9   1        1",
    "113111111      1",
    "1   1   1      1",
    "1   1   1      1",
    "1   11311      1",
    "1     9 1      1",
    "1       1      1",
    "111111111      1",
    "1              1",
    "1              1",
    "1111111111111111",
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    pub w: usize,
    pub h: usize,
    cells: Vec<u8>,
}

impl TileMap {
    /// Parses a row-major character grid. Line breaks are ignored; every
    /// other character counts as one cell.
    pub fn parse(layout: &str, w: usize, h: usize) -> Result<Self, MapError> {
        let chars: Vec<char> = layout.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        if chars.len() != w * h {
            return Err(MapError::Size {
                expected: w * h,
                actual: chars.len(),
            });
        }
        let cells = chars
            .into_iter()
            .enumerate()
            .map(|(index, ch)| match ch {
                ' ' => Ok(EMPTY),
                '0'..='9' => Ok(ch as u8 - b'0'),
                _ => Err(MapError::InvalidCell { index, ch }),
            })
            .collect::<Result<Vec<u8>, _>>()?;
        Ok(Self { w, h, cells })
    }

    pub fn load(path: impl AsRef<Path>, w: usize, h: usize) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, w, h)
    }

    #[inline]
    pub fn in_bounds(&self, i: i64, j: i64) -> bool {
        i >= 0 && j >= 0 && (i as usize) < self.w && (j as usize) < self.h
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        assert!(i < self.w && j < self.h, "cell ({i}, {j}) outside {}x{} map", self.w, self.h);
        self.cells[i + j * self.w]
    }

    #[inline]
    pub fn is_walkable(&self, i: usize, j: usize) -> bool {
        matches!(self.get(i, j), EMPTY | DOOR_THRESHOLD)
    }

    /// Walkability of the cell under a continuous position; anything off
    /// the map is solid.
    #[inline]
    pub fn is_walkable_at(&self, x: f32, y: f32) -> bool {
        let (i, j) = (x.floor() as i64, y.floor() as i64);
        self.in_bounds(i, j) && self.is_walkable(i as usize, j as usize)
    }

    /// Offset to the first closed door next to `(i, j)`, probing +x, -x,
    /// +y, -y in that order; `(0, 0)` when there is none.
    pub fn check_door(&self, i: usize, j: usize) -> (i32, i32) {
        const PROBES: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        for (di, dj) in PROBES {
            let (ni, nj) = (i as i64 + di as i64, j as i64 + dj as i64);
            if self.in_bounds(ni, nj) && self.get(ni as usize, nj as usize) == DOOR {
                return (di, dj);
            }
        }
        (0, 0)
    }

    /// Turns a closed door into floor. Anything else is left alone.
    pub fn open_door(&mut self, i: usize, j: usize) -> bool {
        if self.get(i, j) != DOOR {
            return false;
        }
        self.cells[i + j * self.w] = EMPTY;
        true
    }

    /// Wall codes present in the map, for validating against an atlas.
    pub fn wall_codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().copied().filter(|&c| !matches!(c, EMPTY | DOOR_THRESHOLD))
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self {
            w: DEFAULT_W,
            h: DEFAULT_H,
            cells: DEFAULT_LAYOUT
                .bytes()
                .map(|b| if b == b' ' { EMPTY } else { b - b'0' })
                .collect(),
        }
    }
}
