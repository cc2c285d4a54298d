use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks the symbol in the data placement order: two module wide columns from
/// the right edge, alternating upward and downward, skipping the vertical
/// timing column. Yields every coordinate outside column 6 as (row, col); the
/// caller skips the ones already taken by function patterns.
#[derive(Debug, Clone)]
pub struct EncRegionIter {
    // Right column of the current column pair
    right: i16,
    // Rows walked in the current column pair
    vert: i16,
    // 0 for the right module of the pair, 1 for the left one
    side: i16,
    width: i16,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { right: w - 1, vert: 0, side: 0, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        if self.right < 1 {
            return None;
        }

        let upward = (self.right + 1) & 2 == 0;
        let r = if upward { self.width - 1 - self.vert } else { self.vert };
        let c = self.right - self.side;

        self.side += 1;
        if self.side == 2 {
            self.side = 0;
            self.vert += 1;
            if self.vert == self.width {
                self.vert = 0;
                self.right -= 2;
                if self.right == 6 {
                    self.right = 5;
                }
            }
        }

        Some((r, c))
    }
}
