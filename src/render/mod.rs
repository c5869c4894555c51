//! Software renderer.
//!
//! Re-exports:
//! - `casters`: DDA ray casting and wall texture coordinates
//! - `render3d`: Frame pipeline, floor/ceiling cast and wall columns
//! - `sprites`: Billboard drawing against the depth buffer
//! - `minimap`: Top-down overlay
//! - `hud`: Weapon overlay

pub mod casters;
pub mod hud;
pub mod minimap;
pub mod render3d;
pub mod sprites;
