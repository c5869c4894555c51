//! Core game types and logic (map, camera, monsters, input).
//!
//! Re-exports:
//! - `maze`: Tile map, doors and the built-in level
//! - `player`: Camera pose, movement intents and collision
//! - `enemy`: Billboard monsters, ordering and hitscan
//! - `process_events`: Keyboard/mouse state to intents

pub mod enemy;
pub mod maze;
pub mod player;
pub mod process_events;
