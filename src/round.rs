//! Round construction.
//!
//! A round is a fixed number of shapes in which exactly one pair of slots
//! holds the same shape. The pair is equal by construction (the second slot
//! copies the first slot's geometry); every other slot is drawn until it
//! matches nothing accepted before it.

use tracing::debug;

use crate::config::{MirrorPolicy, RoundConfig};
use crate::geometry::{
    canonicalize, mirror, rotate, same_shape, Block, Blocks, Rotation, ROTATIONS,
};
use crate::rng::RandomSource;
use crate::shape::generate;

/// One shape of a round with its presentation state.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    blocks: Blocks,
    rotation_index: usize,
    /// Whether the player currently has this shape selected.
    pub selected: bool,
    /// Seconds since the shape appeared, drives cosmetic animation.
    pub phase: f32,
}

impl Shape {
    fn new(blocks: Blocks, rotation_index: usize) -> Self {
        Self {
            blocks,
            rotation_index,
            selected: false,
            phase: 0.0,
        }
    }

    /// Geometry in the shape's local frame.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Index of the display rotation in `ROTATIONS`.
    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    pub fn rotation(&self) -> &Rotation {
        &ROTATIONS[self.rotation_index]
    }

    /// Canonical form of the geometry as it is displayed.
    pub fn displayed(&self) -> Blocks {
        canonicalize(&rotate(&self.blocks, self.rotation()))
    }
}

/// Retry counters collected while building a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    /// Walks rejected for running into themselves.
    pub self_intersections: usize,
    /// Accepted walks rejected for matching a shape already in the round.
    pub duplicates: usize,
    /// Display rotations rejected for showing the pair pre-aligned.
    pub aligned_rotations: usize,
}

/// A set of shapes with exactly one matching pair.
#[derive(Debug, Clone)]
pub struct Round {
    shapes: Vec<Shape>,
    first: usize,
    second: usize,
    stats: RoundStats,
}

impl Round {
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Slot indices of the matching pair, `first < second`.
    pub fn pair(&self) -> (usize, usize) {
        (self.first, self.second)
    }

    pub fn is_pair(&self, slot: usize) -> bool {
        slot == self.first || slot == self.second
    }

    pub fn stats(&self) -> RoundStats {
        self.stats
    }
}

/// Builds a round of `config.shape_count` shapes.
///
/// The configuration is expected to be validated; with the supported shape
/// and segment counts every retry loop terminates.
pub fn build_round<R: RandomSource + ?Sized>(rng: &mut R, config: &RoundConfig) -> Round {
    debug_assert!(config.validate().is_ok(), "unvalidated round config {config:?}");
    let count = config.shape_count;
    let first = rng.random_below(count - 1);
    let second = first + 1 + rng.random_below(count - 1 - first);

    let mut stats = RoundStats::default();
    let mut shapes: Vec<Shape> = Vec::with_capacity(count);
    for slot in 0..count {
        let blocks = if slot == second {
            shapes[first].blocks.clone()
        } else {
            draw_distinct(rng, config, &shapes, &mut stats)
        };

        let rotation_index = if slot == second {
            let shown_first = shapes[first].displayed();
            loop {
                let index = rng.random_below(ROTATIONS.len());
                if canonicalize(&rotate(&blocks, &ROTATIONS[index])) != shown_first {
                    break index;
                }
                stats.aligned_rotations += 1;
            }
        } else {
            rng.random_below(ROTATIONS.len())
        };

        shapes.push(Shape::new(blocks, rotation_index));
    }

    debug_assert!(same_shape(&shapes[first].blocks, &shapes[second].blocks));
    debug!(
        first,
        second,
        self_intersections = stats.self_intersections,
        duplicates = stats.duplicates,
        aligned_rotations = stats.aligned_rotations,
        "built round"
    );

    Round {
        shapes,
        first,
        second,
        stats,
    }
}

/// Draws walks until one differs from every accepted shape.
fn draw_distinct<R: RandomSource + ?Sized>(
    rng: &mut R,
    config: &RoundConfig,
    accepted: &[Shape],
    stats: &mut RoundStats,
) -> Blocks {
    loop {
        let blocks = match generate(rng, config.segment_count) {
            Ok(blocks) => blocks,
            Err(_) => {
                stats.self_intersections += 1;
                continue;
            }
        };

        let clashes = accepted.iter().any(|shape| {
            same_shape(&blocks, &shape.blocks)
                || (config.mirror_policy == MirrorPolicy::Avoid
                    && same_shape(&mirror(&blocks), &shape.blocks))
        });
        if !clashes {
            return blocks;
        }
        stats.duplicates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::session_rng;
    use crate::rng::testing::Scripted;

    /// Draws recorded from a round with one rejected walk, one duplicate and
    /// one pre-aligned rotation for the second pair slot.
    const SCRIPT: &[usize] = &[
        4, 0, 1, 0, 0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 5, 1, 1, 0, 1, 0, 0, 0, 1, 1, 0, 1, 1, 22, 1,
        1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 15, 0, 1, 1, 1, 1,
        0, 1, 0, 1, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 1, 0, 0, 0, 1, 1, 1, 1, 1, 0,
        1, 19, 19, 18,
    ];

    fn matching_pairs(round: &Round) -> Vec<(usize, usize)> {
        let shapes = round.shapes();
        let mut pairs = Vec::new();
        for i in 0..shapes.len() {
            for j in i + 1..shapes.len() {
                if same_shape(shapes[i].blocks(), shapes[j].blocks()) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    #[test]
    fn test_scripted_round_snapshot() {
        let mut rng = Scripted::new(SCRIPT);
        let round = build_round(&mut rng, &RoundConfig::default());
        assert_eq!(rng.consumed(), SCRIPT.len());

        assert_eq!(round.pair(), (4, 5));
        assert_eq!(
            round.stats(),
            RoundStats {
                self_intersections: 1,
                duplicates: 1,
                aligned_rotations: 1,
            }
        );

        let rotations: Vec<usize> = round.shapes().iter().map(Shape::rotation_index).collect();
        assert_eq!(rotations, vec![5, 22, 15, 0, 19, 18]);

        let canonical: Vec<Blocks> = round
            .shapes()
            .iter()
            .map(|shape| canonicalize(shape.blocks()))
            .collect();
        let pair_shape = vec![
            (0, 4, 6),
            (0, 4, 8),
            (0, 4, 10),
            (0, 4, 12),
            (2, 4, 6),
            (4, 4, 6),
            (6, 0, 0),
            (6, 2, 0),
            (6, 4, 0),
            (6, 4, 2),
            (6, 4, 4),
            (6, 4, 6),
        ];
        assert_eq!(
            canonical,
            vec![
                vec![
                    (0, 0, 0),
                    (0, 2, 0),
                    (0, 4, 0),
                    (0, 6, 0),
                    (2, 6, 0),
                    (4, 6, 0),
                    (6, 6, 0),
                    (8, 6, 0),
                    (8, 6, 2),
                    (8, 6, 4),
                    (8, 6, 6),
                    (10, 6, 6),
                    (12, 6, 6),
                    (14, 6, 6),
                ],
                vec![
                    (0, 0, 0),
                    (0, 2, 0),
                    (0, 4, 0),
                    (0, 6, 0),
                    (0, 6, 2),
                    (0, 6, 4),
                    (0, 6, 6),
                    (0, 6, 8),
                    (2, 6, 8),
                    (4, 6, 4),
                    (4, 6, 6),
                    (4, 6, 8),
                ],
                vec![
                    (0, 0, 8),
                    (0, 2, 8),
                    (0, 4, 8),
                    (2, 4, 8),
                    (4, 0, 0),
                    (4, 2, 0),
                    (4, 4, 0),
                    (4, 4, 2),
                    (4, 4, 4),
                    (4, 4, 6),
                    (4, 4, 8),
                ],
                vec![
                    (0, 0, 0),
                    (0, 2, 0),
                    (0, 2, 8),
                    (0, 4, 0),
                    (0, 4, 8),
                    (0, 6, 0),
                    (0, 6, 2),
                    (0, 6, 4),
                    (0, 6, 6),
                    (0, 6, 8),
                    (2, 0, 0),
                    (4, 0, 0),
                    (6, 0, 0),
                ],
                pair_shape.clone(),
                pair_shape,
            ]
        );
    }

    #[test]
    fn test_exactly_one_matching_pair() {
        let (mut rng, _) = session_rng(Some(11));
        for _ in 0..40 {
            let round = build_round(&mut rng, &RoundConfig::default());
            assert_eq!(round.len(), 6);
            assert_eq!(matching_pairs(&round), vec![round.pair()]);
        }
    }

    #[test]
    fn test_pair_is_never_shown_pre_aligned() {
        let (mut rng, _) = session_rng(Some(12));
        for _ in 0..40 {
            let round = build_round(&mut rng, &RoundConfig::default());
            let (first, second) = round.pair();
            assert!(first < second);
            assert_ne!(round.shapes()[first].displayed(), round.shapes()[second].displayed());
        }
    }

    #[test]
    fn test_seeded_rounds_repeat() {
        let (mut a, seed) = session_rng(Some(99));
        let (mut b, _) = session_rng(Some(seed));
        for _ in 0..5 {
            let round_a = build_round(&mut a, &RoundConfig::default());
            let round_b = build_round(&mut b, &RoundConfig::default());
            assert_eq!(round_a.pair(), round_b.pair());
            assert_eq!(round_a.shapes(), round_b.shapes());
        }
    }

    #[test]
    fn test_avoid_mirrors() {
        let config = RoundConfig {
            mirror_policy: MirrorPolicy::Avoid,
            ..RoundConfig::default()
        };
        let (mut rng, _) = session_rng(Some(13));
        for _ in 0..20 {
            let round = build_round(&mut rng, &config);
            let shapes = round.shapes();
            for i in 0..shapes.len() {
                for j in i + 1..shapes.len() {
                    if (i, j) == round.pair() {
                        continue;
                    }
                    assert!(!same_shape(&mirror(shapes[i].blocks()), shapes[j].blocks()));
                }
            }
        }
    }

    #[test]
    fn test_two_slot_round_on_short_walks() {
        let config = RoundConfig::new(2, 3, MirrorPolicy::Distinct).unwrap();
        let (mut rng, _) = session_rng(Some(5));
        let round = build_round(&mut rng, &config);
        assert_eq!(round.pair(), (0, 1));
        assert!(round.is_pair(0) && round.is_pair(1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unvalidated round config")]
    fn test_rejects_unvalidated_config() {
        let config = RoundConfig {
            shape_count: 1,
            ..RoundConfig::default()
        };
        let (mut rng, _) = session_rng(Some(7));
        build_round(&mut rng, &config);
    }

    #[test]
    fn test_largest_round_terminates() {
        let config = RoundConfig::new(9, 3, MirrorPolicy::Avoid).unwrap();
        let (mut rng, _) = session_rng(Some(6));
        let round = build_round(&mut rng, &config);
        assert_eq!(matching_pairs(&round), vec![round.pair()]);
    }
}
