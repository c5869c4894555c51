use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an image resource into a [`TextureAtlas`](crate::textures::TextureAtlas).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot decode image {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("image {path:?} must be 32-bit RGBA, got {format}")]
    ChannelDepth { path: PathBuf, format: String },
    #[error("a {width}x{height} image is not a strip of square tiles")]
    NotTileable { width: usize, height: usize },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BadBuffer { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map layout has {actual} cells, expected {expected}")]
    Size { expected: usize, actual: usize },
    #[error("invalid map character {ch:?} at cell {index}")]
    InvalidCell { index: usize, ch: char },
    #[error("cannot read map file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that keeps a scene from being assembled. Fatal before the
/// frame loop starts.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("map uses wall code {code} but the wall atlas has {count} tiles")]
    UnknownWallTexture { code: u8, count: usize },
    #[error("{what} texture id {id} is out of range (atlas has {count} tiles)")]
    TextureId {
        what: &'static str,
        id: usize,
        count: usize,
    },
    #[error("camera start ({x}, {y}) is not on a walkable cell")]
    SpawnBlocked { x: f32, y: f32 },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse settings file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("setting `{key}` {reason}")]
    Invalid { key: &'static str, reason: &'static str },
}
