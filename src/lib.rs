//! Software raycaster: a tile map rendered column by column into a CPU
//! framebuffer, with textured floors, billboard monsters and a HUD.
pub mod color;
pub mod core;
pub mod error;
pub mod framebuffer;
pub mod game;
pub mod render;
pub mod settings;
pub mod textures;
