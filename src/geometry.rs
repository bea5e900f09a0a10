//! 3D rotation, canonicalization and shape equality.
//!
//! A cube has 24 possible orientations in 3D space (the rotation group of a cube).
//! These are the 6 ways to choose which face points up, times 4 rotations around
//! the vertical axis. Mirror images are not part of the group, so two chiral
//! shapes never compare equal here.

/// A 3D coordinate identifying one unit cube of a shape.
pub type Block = (i32, i32, i32);

/// An ordered collection of blocks forming one polycube.
pub type Blocks = Vec<Block>;

/// A proper rotation of the cube as a 3x3 integer matrix (row-major).
///
/// Every entry is -1, 0 or 1 with exactly one nonzero entry per row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation(pub [[i32; 3]; 3]);

impl Rotation {
    pub const IDENTITY: Self = Self([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    /// Maps a block through this rotation.
    #[inline]
    pub fn apply(&self, (x, y, z): Block) -> Block {
        let m = &self.0;
        (
            m[0][0] * x + m[0][1] * y + m[0][2] * z,
            m[1][0] * x + m[1][1] * y + m[1][2] * z,
            m[2][0] * x + m[2][1] * y + m[2][2] * z,
        )
    }

    /// Returns `self * other`, i.e. `other` applied first.
    pub fn compose(&self, other: &Self) -> Self {
        let mut out = [[0; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[row][k] * other.0[k][col]).sum();
            }
        }
        Self(out)
    }

    pub fn transpose(&self) -> Self {
        let m = &self.0;
        Self([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn determinant(&self) -> i32 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }
}

/// All 24 proper rotations of a cube.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
///
/// Index 0 is the identity. Display rotations are stored as indices into this
/// table, so the ordering is part of the deterministic round output.
pub const ROTATIONS: [Rotation; 24] = [
    // +Z face up (identity orientation), rotate around Z axis
    Rotation([[1, 0, 0], [0, 1, 0], [0, 0, 1]]),
    Rotation([[0, -1, 0], [1, 0, 0], [0, 0, 1]]),
    Rotation([[-1, 0, 0], [0, -1, 0], [0, 0, 1]]),
    Rotation([[0, 1, 0], [-1, 0, 0], [0, 0, 1]]),
    // +Y face up
    Rotation([[1, 0, 0], [0, 0, -1], [0, 1, 0]]),
    Rotation([[0, 0, 1], [1, 0, 0], [0, 1, 0]]),
    Rotation([[-1, 0, 0], [0, 0, 1], [0, 1, 0]]),
    Rotation([[0, 0, -1], [-1, 0, 0], [0, 1, 0]]),
    // -Z face up
    Rotation([[1, 0, 0], [0, -1, 0], [0, 0, -1]]),
    Rotation([[0, 1, 0], [1, 0, 0], [0, 0, -1]]),
    Rotation([[-1, 0, 0], [0, 1, 0], [0, 0, -1]]),
    Rotation([[0, -1, 0], [-1, 0, 0], [0, 0, -1]]),
    // -Y face up
    Rotation([[1, 0, 0], [0, 0, 1], [0, -1, 0]]),
    Rotation([[0, 0, -1], [1, 0, 0], [0, -1, 0]]),
    Rotation([[-1, 0, 0], [0, 0, -1], [0, -1, 0]]),
    Rotation([[0, 0, 1], [-1, 0, 0], [0, -1, 0]]),
    // +X face up
    Rotation([[0, 0, 1], [0, 1, 0], [-1, 0, 0]]),
    Rotation([[0, -1, 0], [0, 0, 1], [-1, 0, 0]]),
    Rotation([[0, 0, -1], [0, -1, 0], [-1, 0, 0]]),
    Rotation([[0, 1, 0], [0, 0, -1], [-1, 0, 0]]),
    // -X face up
    Rotation([[0, 0, -1], [0, 1, 0], [1, 0, 0]]),
    Rotation([[0, -1, 0], [0, 0, -1], [1, 0, 0]]),
    Rotation([[0, 0, 1], [0, -1, 0], [1, 0, 0]]),
    Rotation([[0, 1, 0], [0, 0, 1], [1, 0, 0]]),
];

/// Applies a rotation to every block.
pub fn rotate(blocks: &[Block], rotation: &Rotation) -> Blocks {
    blocks.iter().map(|&block| rotation.apply(block)).collect()
}

/// Reflects blocks through the yz plane (x -> -x).
pub fn mirror(blocks: &[Block]) -> Blocks {
    blocks.iter().map(|&(x, y, z)| (-x, y, z)).collect()
}

/// Translates blocks so the minimum x, y, z values are all zero, then sorts them.
///
/// Two collections that differ only by translation and block order produce
/// the same canonical form.
pub fn canonicalize(blocks: &[Block]) -> Blocks {
    let Some(min_x) = blocks.iter().map(|(x, _, _)| *x).min() else {
        return Vec::new();
    };
    let min_y = blocks.iter().map(|(_, y, _)| *y).min().unwrap_or(0);
    let min_z = blocks.iter().map(|(_, _, z)| *z).min().unwrap_or(0);

    let mut canonical: Blocks = blocks
        .iter()
        .map(|&(x, y, z)| (x - min_x, y - min_y, z - min_z))
        .collect();
    // tuples order lexicographically by (x, y, z)
    canonical.sort_unstable();
    canonical
}

/// Returns true if `rhs` can be rotated and translated onto `lhs`.
///
/// Reflections are not considered: a shape and its mirror image are
/// different shapes unless the shape is achiral.
pub fn same_shape(lhs: &[Block], rhs: &[Block]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let base = canonicalize(lhs);
    ROTATIONS
        .iter()
        .any(|rotation| canonicalize(&rotate(rhs, rotation)) == base)
}

/// Generates all unique canonical orientations of a shape.
///
/// Symmetric shapes have fewer than 24 unique orientations.
pub fn all_orientations(blocks: &[Block]) -> Vec<Blocks> {
    let mut orientations: Vec<Blocks> = ROTATIONS
        .iter()
        .map(|rotation| canonicalize(&rotate(blocks, rotation)))
        .collect();

    // remove duplicate orientations (symmetric shapes produce duplicates)
    orientations.sort();
    orientations.dedup();
    orientations
}

/// The smallest canonical orientation of a shape.
///
/// Equal keys mean equal shapes under rotation, which makes the key usable
/// in hash sets where `same_shape` would need pairwise comparison.
pub fn shape_key(blocks: &[Block]) -> Blocks {
    ROTATIONS
        .iter()
        .map(|rotation| canonicalize(&rotate(blocks, rotation)))
        .min()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Soma 3d corner variant A.
    const CORNER_A: &[Block] = &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 0, 1)];
    /// Soma 3d corner variant C, the mirror image of variant A.
    const CORNER_C: &[Block] = &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 1, 1)];

    #[test]
    fn test_rotation_table_has_24_distinct_entries() {
        let mut seen: Vec<Rotation> = ROTATIONS.to_vec();
        seen.sort_by_key(|rotation| rotation.0);
        seen.dedup();
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_rotations_are_proper() {
        for (index, rotation) in ROTATIONS.iter().enumerate() {
            assert_eq!(
                rotation.compose(&rotation.transpose()),
                Rotation::IDENTITY,
                "Rotation {index} is not orthogonal"
            );
            assert_eq!(rotation.determinant(), 1, "Rotation {index} is a reflection");
        }
    }

    #[test]
    fn test_rotation_table_is_closed_under_composition() {
        for a in &ROTATIONS {
            for b in &ROTATIONS {
                let product = a.compose(b);
                assert!(ROTATIONS.contains(&product), "{a:?} * {b:?} left the group");
            }
        }
    }

    #[test]
    fn test_identity_is_first() {
        assert_eq!(ROTATIONS[0], Rotation::IDENTITY);
        assert_eq!(ROTATIONS[0].apply((3, -4, 5)), (3, -4, 5));
    }

    #[test]
    fn test_canonicalize_moves_minimum_to_origin_and_sorts() {
        let blocks = vec![(5, 2, 9), (3, 4, 7), (3, 2, 7)];
        assert_eq!(
            canonicalize(&blocks),
            vec![(0, 0, 0), (0, 2, 0), (2, 0, 2)]
        );
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(canonicalize(&[]).is_empty());
    }

    #[test]
    fn test_translated_line_is_same_shape() {
        let line = vec![(0, 0, 0), (1, 0, 0), (2, 0, 0)];
        let moved: Blocks = line.iter().map(|&(x, y, z)| (x + 5, y + 5, z + 5)).collect();
        assert!(same_shape(&line, &moved));
    }

    #[test]
    fn test_line_is_not_l_shape() {
        let line = vec![(0, 0, 0), (1, 0, 0), (2, 0, 0)];
        let corner = vec![(0, 0, 0), (1, 0, 0), (1, 1, 0)];
        assert!(!same_shape(&line, &corner));
        assert!(!same_shape(&corner, &line));
    }

    #[test]
    fn test_different_sizes_never_match() {
        let line = vec![(0, 0, 0), (1, 0, 0), (2, 0, 0)];
        assert!(!same_shape(&line, &line[..2]));
    }

    #[test]
    fn test_chiral_pair_is_not_same_shape() {
        assert!(!same_shape(CORNER_A, CORNER_C));
        assert!(same_shape(&mirror(CORNER_A), CORNER_C));
    }

    #[test]
    fn test_every_rotation_matches() {
        for rotation in &ROTATIONS {
            let rotated = rotate(CORNER_A, rotation);
            assert!(same_shape(CORNER_A, &rotated));
            assert!(same_shape(&rotated, CORNER_A));
        }
    }

    #[test]
    fn test_orientation_counts() {
        // a straight line only has 3 distinct orientations
        assert_eq!(all_orientations(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)]).len(), 3);
        // the chiral corner keeps one two-fold symmetry axis
        assert_eq!(all_orientations(CORNER_A).len(), 12);
    }

    #[test]
    fn test_shape_key_is_rotation_invariant() {
        let key = shape_key(CORNER_A);
        for rotation in &ROTATIONS {
            assert_eq!(shape_key(&rotate(CORNER_A, rotation)), key);
        }
        assert_ne!(shape_key(CORNER_C), key);
    }
}
