//! Kantodex - FireRed/LeafGreen Pokedex backed by PokeAPI
//!
//! The library holds the lookup core (evolution chains, type chart, moves,
//! locations, guides) and the tui-dispatch store; `main.rs` wires the terminal.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod evolution;
pub mod guide;
pub mod history;
pub mod locations;
pub mod lookup;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod moves;
pub mod profile;
pub mod reducer;
pub mod sprite;
pub mod state;
pub mod stats;
pub mod suggest;
pub mod text;
pub mod typechart;

/// Highest national dex number considered part of the Kanto roster.
pub const GENERATION_CUTOFF: u32 = 151;

/// Game version used to filter encounter data.
pub const GAME_VERSION: &str = "firered";

/// Version group used to filter learnable moves.
pub const VERSION_GROUP: &str = "firered-leafgreen";
