//! Polycube Matching Game Library
//!
//! Generates rounds of random 3D polycubes that contain exactly one pair of
//! identical shapes (up to rotation), and drives the game played on them.

pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod rng;
pub mod round;
pub mod shape;
pub mod survey;

pub use config::{GameConfig, MirrorPolicy, RoundConfig};
pub use error::{Error, Result};
pub use game::{Game, State};
pub use geometry::{canonicalize, same_shape, Block, Blocks, Rotation, ROTATIONS};
pub use rng::{session_rng, RandomSource, SessionRng};
pub use round::{build_round, Round, Shape};
pub use shape::{generate, generate_valid, SelfIntersection};
