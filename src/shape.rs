//! Random polycube generation.
//!
//! A shape is grown by a segmented walk: each segment runs a few steps along
//! one axis, then the walk turns 90 degrees. Blocks are spaced two units
//! apart so that a rendered cube of edge 2 centred on each block touches its
//! neighbours.

use thiserror::Error;
use tracing::trace;

use crate::geometry::{Block, Blocks};
use crate::rng::RandomSource;

/// Distance between consecutive blocks of a walk.
pub const BLOCK_SPACING: i32 = 2;

/// Number of walk segments used by the game.
pub const SEGMENT_COUNT: usize = 4;

/// A walk that ran back into one of its own blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("walk revisited block {0:?}")]
pub struct SelfIntersection(pub Block);

/// Principal axis of a walk segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    pub const fn unit(self) -> Block {
        match self {
            Axis::X => (1, 0, 0),
            Axis::Y => (0, 1, 0),
            Axis::Z => (0, 0, 1),
        }
    }

    /// Picks one of the two perpendicular axes.
    pub const fn turn(self, bit: bool) -> Self {
        match (self, bit) {
            (Axis::Z, true) => Axis::Y,
            (Axis::Z, false) => Axis::X,
            (Axis::Y, true) => Axis::Z,
            (Axis::Y, false) => Axis::X,
            (Axis::X, true) => Axis::Z,
            (Axis::X, false) => Axis::Y,
        }
    }
}

/// Grows one random shape from `segments` walk segments.
///
/// Segment `i` is `2 + (i & 1) + bit` blocks long. Per segment the source is
/// asked for exactly three bits, in order: the length bit, the turn bit and
/// the side flip bit. The walk starts at the origin heading along +Y.
///
/// Returns `Err` if the walk would place a block on an occupied position.
/// That is an expected outcome; callers draw again.
pub fn generate<R: RandomSource + ?Sized>(
    rng: &mut R,
    segments: usize,
) -> Result<Blocks, SelfIntersection> {
    let mut position: Block = (0, 0, 0);
    let mut axis = Axis::Y;
    let mut side = 1;

    let mut blocks = Blocks::with_capacity(segments * 4);
    for segment in 0..segments {
        let (ux, uy, uz) = axis.unit();
        let scale = BLOCK_SPACING * side;
        let step = (scale * ux, scale * uy, scale * uz);
        let length = 2 + (segment & 1) + usize::from(rng.random_bit());

        for _ in 0..length {
            if blocks.contains(&position) {
                return Err(SelfIntersection(position));
            }
            blocks.push(position);
            position = (
                position.0 + step.0,
                position.1 + step.1,
                position.2 + step.2,
            );
        }

        axis = axis.turn(rng.random_bit());
        if rng.random_bit() {
            side = -side;
        }
    }

    Ok(blocks)
}

/// Draws walks until one is accepted.
///
/// Returns the shape and the number of rejected walks before it.
pub fn generate_valid<R: RandomSource + ?Sized>(rng: &mut R, segments: usize) -> (Blocks, usize) {
    let mut rejected = 0;
    loop {
        match generate(rng, segments) {
            Ok(blocks) => return (blocks, rejected),
            Err(intersection) => {
                trace!(%intersection, "rejected walk");
                rejected += 1;
            }
        }
    }
}
