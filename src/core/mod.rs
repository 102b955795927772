//! Core game engine (no_std compatible)
//!
//! Board, fleet placement, the firing state machine and the scripted opponent.
//! Only `alloc`, `rand` and `log` are required, so the engine can be embedded
//! behind any transport.

pub mod agent;
pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod placement;
pub mod ship;

// Re-export commonly used types
pub use agent::{HuntTargetAgent, RandomAgent, TargetingStrategy};
pub use board::Board;
pub use common::{Cell, Coord, GameError, PlacementError, Player};
pub use config::*;
pub use game::{FireResult, GameSession, GameView, Phase, PlacementResult, ShotReport};
pub use placement::{random_fleet, validate, validate_and_place};
pub use ship::{Ship, ShipSpec, ShipType};
