//! Text rendering of shapes and rounds.
//!
//! Shapes are drawn as z-slices side by side, one character per lattice
//! cell: `#` for a block and `.` for empty space.

use crate::geometry::{canonicalize, Block, Blocks};
use crate::round::Round;
use crate::shape::BLOCK_SPACING;

/// Canonicalizes blocks and divides out the walk spacing, so neighbouring
/// blocks land on neighbouring cells.
pub fn to_lattice(blocks: &[Block]) -> Blocks {
    canonicalize(blocks)
        .into_iter()
        .map(|(x, y, z)| (x / BLOCK_SPACING, y / BLOCK_SPACING, z / BLOCK_SPACING))
        .collect()
}

/// Formats a shape as z-slices side by side, rows from top (max y) down.
///
/// The result has no trailing newline.
pub fn format_blocks(blocks: &[Block]) -> String {
    let cells = to_lattice(blocks);
    if cells.is_empty() {
        return String::new();
    }

    let size_x = cells.iter().map(|(x, _, _)| *x).max().unwrap_or(0) + 1;
    let size_y = cells.iter().map(|(_, y, _)| *y).max().unwrap_or(0) + 1;
    let size_z = cells.iter().map(|(_, _, z)| *z).max().unwrap_or(0) + 1;

    // wide enough for the "z=N" header of the last slice
    let width = (size_x as usize).max(format!("z={}", size_z - 1).len());

    let mut lines = Vec::with_capacity(size_y as usize + 1);
    let header: Vec<String> = (0..size_z)
        .map(|z| format!("{:<width$}", format!("z={z}")))
        .collect();
    lines.push(header.join("  ").trim_end().to_string());

    for y in (0..size_y).rev() {
        let slices: Vec<String> = (0..size_z)
            .map(|z| {
                let row: String = (0..size_x)
                    .map(|x| if cells.contains(&(x, y, z)) { '#' } else { '.' })
                    .collect();
                format!("{row:<width$}")
            })
            .collect();
        lines.push(slices.join("  ").trim_end().to_string());
    }

    lines.join("\n")
}

/// Formats every shape of a round in its displayed orientation.
///
/// Slots of the matching pair are marked with `*` when `reveal` is set.
pub fn format_round(round: &Round, reveal: bool) -> String {
    let mut output = String::new();
    for (slot, shape) in round.shapes().iter().enumerate() {
        let marker = if reveal && round.is_pair(slot) { " *" } else { "" };
        output.push_str(&format!(
            "Shape {} ({} blocks, rotation {}){}:\n",
            slot + 1,
            shape.blocks().len(),
            shape.rotation_index(),
            marker
        ));
        output.push_str(&format_blocks(&shape.displayed()));
        output.push_str("\n\n");
    }
    output
}
