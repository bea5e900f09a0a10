//! Statistics over the shape generator.
//!
//! Samples many walks and reports how often they are rejected, how long the
//! accepted ones are, and how many distinct shapes (under rotation) show up.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::geometry::{mirror, shape_key, Blocks};
use crate::rng::RandomSource;
use crate::shape::generate;

/// Aggregated results of a generator survey.
#[derive(Debug, Clone, Default)]
pub struct Survey {
    pub samples: usize,
    pub rejected: usize,
    /// Accepted walks by block count.
    pub lengths: FxHashMap<usize, usize>,
    /// How often each distinct shape was produced, keyed by shape key.
    pub shapes: FxHashMap<Blocks, usize>,
}

impl Survey {
    pub fn accepted(&self) -> usize {
        self.samples - self.rejected
    }

    pub fn distinct_shapes(&self) -> usize {
        self.shapes.len()
    }

    /// Number of distinct shapes whose mirror image was also produced.
    ///
    /// Achiral shapes, which are their own mirror image, are not counted.
    pub fn chiral_pairs(&self) -> usize {
        let mut seen: FxHashSet<&Blocks> = FxHashSet::default();
        let mut pairs = 0;
        for key in self.shapes.keys() {
            let mirrored = shape_key(&mirror(key));
            if mirrored == *key {
                continue;
            }
            if let Some((other, _)) = self.shapes.get_key_value(&mirrored) {
                if !seen.contains(other) {
                    pairs += 1;
                    seen.insert(key);
                }
            }
        }
        pairs
    }

    pub fn rejection_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.rejected as f64 / self.samples as f64
        }
    }
}

/// Runs the generator `samples` times.
pub fn run<R: RandomSource + ?Sized>(rng: &mut R, segments: usize, samples: usize) -> Survey {
    let mut survey = Survey {
        samples,
        ..Survey::default()
    };

    for _ in 0..samples {
        match generate(rng, segments) {
            Ok(blocks) => {
                *survey.lengths.entry(blocks.len()).or_default() += 1;
                *survey.shapes.entry(shape_key(&blocks)).or_default() += 1;
            }
            Err(_) => survey.rejected += 1,
        }
    }

    survey
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samples:         {}", self.samples)?;
        writeln!(
            f,
            "Rejected walks:  {} ({:.2}%)",
            self.rejected,
            self.rejection_rate() * 100.0
        )?;
        writeln!(f, "Distinct shapes: {}", self.distinct_shapes())?;
        writeln!(f, "Chiral pairs:    {}", self.chiral_pairs())?;
        writeln!(f, "Blocks per shape:")?;

        let mut lengths: Vec<(&usize, &usize)> = self.lengths.iter().collect();
        lengths.sort_unstable();
        for (length, count) in lengths {
            writeln!(f, "  {length:>2}: {count}")?;
        }
        Ok(())
    }
}
