use std::fmt::{Display, Formatter};
use std::ops::Deref;

use log::trace;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

/// One of the eight data mask patterns. Unmasked matrices carry pattern 0
/// until a mask is applied.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskPattern(pattern))
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for MaskPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over (row, col) that tells whether a data module is flipped.
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            _ => mask_functions::meadow,
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Tries every pattern and keeps the one with the lowest penalty. Ties go to
/// the lowest pattern index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let mut best = (MaskPattern(0), u32::MAX);
    for mask in MaskPattern::all() {
        let mut candidate = qr.clone();
        candidate.apply_mask(mask);
        let pen = compute_total_penalty(&candidate);
        trace!("Mask {} penalty {pen}", *mask);
        if pen < best.1 {
            best = (mask, pen);
        }
    }
    qr.apply_mask(best.0);
    best.0
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let grid = qr.to_colors();
    let w = qr.width();
    let adj_pen = compute_adjacent_penalty(&grid, w);
    let blk_pen = compute_block_penalty(&grid, w);
    let fp_pen = compute_finder_pattern_penalty(&grid, w);
    let bal_pen = compute_balance_penalty(&grid);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// Lines of the grid, rows first then columns
fn lines(grid: &[Color], w: usize) -> impl Iterator<Item = Vec<Color>> + '_ {
    let rows = (0..w).map(move |r| grid[r * w..(r + 1) * w].to_vec());
    let cols = (0..w).map(move |c| (0..w).map(|r| grid[r * w + c]).collect());
    rows.chain(cols)
}

// 3 points for each run of 5 same color modules, plus 1 for every module
// beyond 5
fn compute_adjacent_penalty(grid: &[Color], w: usize) -> u32 {
    let mut pen = 0;
    for line in lines(grid, w) {
        let mut run = 1;
        for i in 1..=w {
            if i < w && line[i] == line[i - 1] {
                run += 1;
                continue;
            }
            if run >= 5 {
                pen += run - 2;
            }
            run = 1;
        }
    }
    pen
}

// 3 points for each 2x2 block of one color, blocks may overlap
fn compute_block_penalty(grid: &[Color], w: usize) -> u32 {
    let mut pen = 0;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = grid[r * w + c];
            if clr == grid[r * w + c + 1]
                && clr == grid[(r + 1) * w + c]
                && clr == grid[(r + 1) * w + c + 1]
            {
                pen += 3;
            }
        }
    }
    pen
}

// 40 points for each dark-light-dark-dark-dark-light-dark run with 4 light
// modules before or after it. Modules outside the symbol count as light.
fn compute_finder_pattern_penalty(grid: &[Color], w: usize) -> u32 {
    use Color::{Dark as D, Light as L};
    static PATTERN: [Color; 7] = [D, L, D, D, D, L, D];

    let mut pen = 0;
    for line in lines(grid, w) {
        let is_light = |i: isize| i < 0 || i >= w as isize || line[i as usize] == L;
        for j in 0..w.saturating_sub(6) {
            if line[j..j + 7] != PATTERN {
                continue;
            }
            let j = j as isize;
            if (j - 4..j).all(is_light) || (j + 7..j + 11).all(is_light) {
                pen += 40;
            }
        }
    }
    pen
}

// 10 points for every full 5% the dark share deviates from 50%
fn compute_balance_penalty(grid: &[Color]) -> u32 {
    let total = grid.len();
    let dark = grid.iter().filter(|&&c| c == Color::Dark).count();
    let dev = (dark * 20).abs_diff(total * 10) / total;
    dev as u32 * 10
}
