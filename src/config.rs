//! Game and round configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::shape::SEGMENT_COUNT;

/// Number of shapes shown per round.
pub const SHAPE_COUNT: usize = 6;

/// Supported shape counts.
///
/// At least two slots are needed for a pair. The upper bound is the number
/// of slots the viewer can pick with the keys 1-9.
pub const SHAPE_COUNT_RANGE: RangeInclusive<usize> = 2..=9;

/// Supported walk segment counts.
///
/// Three segments already produce 32 distinct shapes, enough to fill the
/// largest round even when mirror images are avoided.
pub const SEGMENT_COUNT_RANGE: RangeInclusive<usize> = 3..=8;

/// Whether a shape and its mirror image may appear in the same round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorPolicy {
    /// Mirror images count as different shapes.
    #[default]
    Distinct,
    /// A candidate whose mirror image matches an accepted shape is rejected.
    Avoid,
}

/// Parameters for building one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub shape_count: usize,
    pub segment_count: usize,
    pub mirror_policy: MirrorPolicy,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            shape_count: SHAPE_COUNT,
            segment_count: SEGMENT_COUNT,
            mirror_policy: MirrorPolicy::Distinct,
        }
    }
}

impl RoundConfig {
    /// Creates a validated round configuration.
    pub fn new(shape_count: usize, segment_count: usize, mirror_policy: MirrorPolicy) -> Result<Self> {
        let config = Self {
            shape_count,
            segment_count,
            mirror_policy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that a round with these parameters can always be completed.
    pub fn validate(&self) -> Result<()> {
        if !SHAPE_COUNT_RANGE.contains(&self.shape_count) {
            return Err(Error::ShapeCount {
                count: self.shape_count,
                min: *SHAPE_COUNT_RANGE.start(),
                max: *SHAPE_COUNT_RANGE.end(),
            });
        }
        if !SEGMENT_COUNT_RANGE.contains(&self.segment_count) {
            return Err(Error::SegmentCount {
                count: self.segment_count,
                min: *SEGMENT_COUNT_RANGE.start(),
                max: *SEGMENT_COUNT_RANGE.end(),
            });
        }
        Ok(())
    }
}

/// Timing and round parameters for a play session. Durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub round: RoundConfig,
    /// Total play time before the result screen.
    pub total_play_time: f32,
    /// How long a correct match is shown before the next round.
    pub success_time: f32,
    /// How long a wrong match is shown before selections are cleared.
    pub fail_time: f32,
    /// Fade-out of the result screen; restarting is blocked until it ends.
    pub fade_out_time: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            total_play_time: 120.0,
            success_time: 2.0,
            fail_time: 1.0,
            fade_out_time: 2.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        self.round.validate()?;
        for (name, value) in [
            ("total play time", self.total_play_time),
            ("success time", self.success_time),
            ("fail time", self.fail_time),
            ("fade-out time", self.fade_out_time),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Duration { name, value });
            }
        }
        Ok(())
    }
}
