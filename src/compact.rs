//! Lanes-only board snapshot used for bulk storage and as counter seed.

use crate::board::BitBoard;

/// Bitmask with the lowest `n` bits set.
#[inline]
pub const fn low_bits(n: u8) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1 << n) - 1
    }
}

/// Immutable copy of a board's four occupancy lanes.
///
/// The row lane has every bit at or above `n` set, so "all rows taken" is
/// `rows == u64::MAX` and the complement of the row lane never offers a row
/// outside the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompactBoard {
    columns: u64,
    rows: u64,
    rising: u64,
    falling: u64,
}

impl CompactBoard {
    /// Snapshot of an empty `n`x`n` board.
    pub fn empty(n: u8) -> Self {
        Self::capture(&BitBoard::new(n))
    }

    /// Snapshots the lanes of `board`.
    pub fn capture(board: &BitBoard) -> Self {
        let compact = Self {
            columns: board.columns(),
            rows: board.rows() | !low_bits(board.size()),
            rising: board.rising(),
            falling: board.falling(),
        };
        debug_assert_eq!(
            compact.queens(),
            Some(u32::from(board.placed())),
            "snapshot lanes disagree with the board"
        );
        compact
    }

    #[inline]
    pub fn columns(&self) -> u64 {
        self.columns
    }

    /// Row lane, padded with ones above the board.
    #[inline]
    pub fn rows(&self) -> u64 {
        self.rows
    }

    #[inline]
    pub fn rising(&self) -> u64 {
        self.rising
    }

    #[inline]
    pub fn falling(&self) -> u64 {
        self.falling
    }

    /// Number of queens encoded, or `None` if the diagonal lanes disagree
    /// with the column lane.
    pub fn queens(&self) -> Option<u32> {
        let count = self.columns.count_ones();
        (self.rising.count_ones() == count && self.falling.count_ones() == count).then_some(count)
    }

    /// True if the outer `ring_width` columns and rows on both edges of an
    /// `n`x`n` board are all occupied.
    pub fn covers_ring(&self, n: u8, ring_width: u8) -> bool {
        let ring = low_bits(ring_width) | (low_bits(ring_width) << (n - ring_width));
        self.columns & ring == ring && self.rows & ring == ring
    }
}

impl From<&BitBoard> for CompactBoard {
    fn from(board: &BitBoard) -> Self {
        Self::capture(board)
    }
}
