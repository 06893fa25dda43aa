//! Recursive bitmask completion counter.
//!
//! Walks the free columns left to right. The lanes are kept aligned with the
//! current column:
//! - columns: bit 0 is the current column (shifted right per column)
//! - rows: bit `y` is row `y`, padded with ones above the board
//! - falling diagonals: bit `y` blocks row `y` (shifted right per column)
//! - rising diagonals: bit `n - 1 + y` blocks row `y` (shifted left per column)
//!
//! The rising lane keeps an offset of `n - 1` so that diagonals of queens to
//! the right of the current column, which block rows below zero for now, stay
//! in the lane until they reach the board.

use crate::board::MAX_N;
use crate::compact::CompactBoard;

/// Counts the ways to complete `board` to a full `n`-queens placement.
///
/// Pure: safe to call concurrently on independent boards.
pub fn count_completions(board: &CompactBoard, n: u8) -> u64 {
    debug_assert!((1..=MAX_N).contains(&n), "board size {n} out of range");
    count(
        board.columns(),
        board.rows(),
        board.rising(),
        board.falling(),
        u32::from(n) - 1,
    )
}

fn count(mut columns: u64, rows: u64, mut rising: u64, mut falling: u64, offset: u32) -> u64 {
    // every row holds a queen
    if rows == u64::MAX {
        return 1;
    }

    // skip columns covered by the preplacement
    while columns & 1 != 0 {
        columns >>= 1;
        rising <<= 1;
        falling >>= 1;
    }
    columns >>= 1;

    let mut total = 0;
    let mut slots = !(rows | (rising >> offset) | falling);
    while slots != 0 {
        let slot = slots & slots.wrapping_neg();
        total += count(
            columns,
            rows | slot,
            (rising | (slot << offset)) << 1,
            (falling | slot) >> 1,
            offset,
        );
        slots ^= slot;
    }
    total
}
