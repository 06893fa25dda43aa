//! Bitmask board with transactional queen placement.
//!
//! A board tracks four occupancy lanes, one bit per line:
//! - columns: bit `x`
//! - rows: bit `y`
//! - rising diagonals: bit `n - 1 - x + y`
//! - falling diagonals: bit `x + y`
//!
//! Placements return a token that must be handed back to [`BitBoard::undo`]
//! in reverse order of acquisition. A depth-first search that follows this
//! stack discipline can reuse one board for its whole tree.

use std::fmt;

use anyhow::{ensure, Result};

use crate::symmetry::Transform;

/// Largest supported board: both diagonal lanes need `2n - 1` bits.
pub const MAX_N: u8 = 32;

/// Smallest board the ring preplacement works on: two ring lines on each edge
/// plus at least one interior line.
pub const MIN_PREPLACE_N: u8 = 5;

/// A board (column, row) coordinate.
pub type Cell = (u8, u8);

/// Board size accepted by the preplacement generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardSize(u8);

impl BoardSize {
    /// Validates `n` against `MIN_PREPLACE_N..=MAX_N`.
    pub fn new(n: u8) -> Result<Self> {
        ensure!(
            (MIN_PREPLACE_N..=MAX_N).contains(&n),
            "board size {n} is out of limits {MIN_PREPLACE_N}..{MAX_N}"
        );
        Ok(Self(n))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = anyhow::Error;

    fn try_from(n: u8) -> Result<Self> {
        Self::new(n)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of [`BitBoard::place`].
///
/// Only `Placed` owns a change to the board; undoing the other variants is a
/// no-op.
#[must_use = "placements must be undone in reverse order"]
#[derive(Debug, PartialEq, Eq)]
pub enum Placement {
    /// A queen was added at the cell.
    Placed(Cell),
    /// The same queen was already on the board.
    Existing(Cell),
    /// The cell is attacked; the board is unchanged.
    Rejected(Cell),
}

impl Placement {
    /// True unless the placement was rejected.
    #[inline]
    pub fn succeeded(&self) -> bool {
        !matches!(self, Placement::Rejected(_))
    }
}

/// Two placements made together by [`BitBoard::place_pair`].
#[must_use = "placements must be undone in reverse order"]
#[derive(Debug)]
pub struct PairPlacement {
    first: Placement,
    second: Placement,
}

/// Mutable N-queens board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitBoard {
    n: u8,
    placed: u8,
    columns: u64,
    rows: u64,
    rising: u64,
    falling: u64,
    /// Occupied row per column.
    column_rows: Vec<Option<u8>>,
}

impl BitBoard {
    /// Creates an empty `n`x`n` board.
    pub fn new(n: u8) -> Self {
        debug_assert!((1..=MAX_N).contains(&n), "board size {n} out of range");
        Self {
            n,
            placed: 0,
            columns: 0,
            rows: 0,
            rising: 0,
            falling: 0,
            column_rows: vec![None; usize::from(n)],
        }
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.n
    }

    /// Number of queens on the board.
    #[inline]
    pub fn placed(&self) -> u8 {
        self.placed
    }

    #[inline]
    pub fn columns(&self) -> u64 {
        self.columns
    }

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

    /// Row of the queen in `column`, if any.
    #[inline]
    pub fn row_in(&self, column: u8) -> Option<u8> {
        self.column_rows[usize::from(column)]
    }

    /// True if a queen sits exactly at `(column, row)`.
    #[inline]
    pub fn has_queen(&self, column: u8, row: u8) -> bool {
        self.row_in(column) == Some(row)
    }

    /// Column of the queen in `row`, if any.
    pub fn column_in(&self, row: u8) -> Option<u8> {
        (0..self.n).find(|&column| self.has_queen(column, row))
    }

    /// The four lane bits of a cell.
    #[inline]
    fn lane_bits(&self, column: u8, row: u8) -> [u64; 4] {
        [
            1 << column,
            1 << row,
            1 << (self.n - 1 - column + row),
            1 << (column + row),
        ]
    }

    /// Attempts to put a queen at `(column, row)`.
    pub fn place(&mut self, column: u8, row: u8) -> Placement {
        debug_assert!(
            column < self.n && row < self.n,
            "({column},{row}) is off a {n}x{n} board",
            n = self.n
        );

        if self.has_queen(column, row) {
            return Placement::Existing((column, row));
        }

        let [column_bit, row_bit, rising_bit, falling_bit] = self.lane_bits(column, row);
        if (self.columns & column_bit)
            | (self.rows & row_bit)
            | (self.rising & rising_bit)
            | (self.falling & falling_bit)
            != 0
        {
            return Placement::Rejected((column, row));
        }

        self.columns |= column_bit;
        self.rows |= row_bit;
        self.rising |= rising_bit;
        self.falling |= falling_bit;
        self.column_rows[usize::from(column)] = Some(row);
        self.placed += 1;
        self.debug_check();

        Placement::Placed((column, row))
    }

    /// Reverts a placement returned by [`place`](Self::place).
    pub fn undo(&mut self, placement: Placement) {
        let Placement::Placed((column, row)) = placement else {
            return;
        };
        debug_assert!(self.has_queen(column, row), "undo out of order at ({column},{row})");

        let [column_bit, row_bit, rising_bit, falling_bit] = self.lane_bits(column, row);
        self.columns ^= column_bit;
        self.rows ^= row_bit;
        self.rising ^= rising_bit;
        self.falling ^= falling_bit;
        self.column_rows[usize::from(column)] = None;
        self.placed -= 1;
        self.debug_check();
    }

    /// Places both cells, or neither if either one is attacked.
    pub fn place_pair(&mut self, cells: [Cell; 2]) -> Option<PairPlacement> {
        let [(c0, r0), (c1, r1)] = cells;
        let first = self.place(c0, r0);
        if !first.succeeded() {
            return None;
        }
        let second = self.place(c1, r1);
        if !second.succeeded() {
            self.undo(first);
            return None;
        }
        Some(PairPlacement { first, second })
    }

    /// Reverts a pair placement, second cell first.
    pub fn undo_pair(&mut self, pair: PairPlacement) {
        self.undo(pair.second);
        self.undo(pair.first);
    }

    /// Reads the outer `ring_width` lines of each edge, walking clockwise.
    ///
    /// The result has `4 * ring_width` entries:
    /// - west: columns `0..` from the outside in, the row of their queen
    /// - north: rows `n-1..` from the outside in, the column of their queen
    /// - east: columns `n-1..` from the outside in, `n - 1 - row`
    /// - south: rows `0..` from the outside in, `n - 1 - column`
    ///
    /// Every edge is read relative to its own clockwise direction, so a
    /// quarter turn of the board rotates the result by `ring_width` entries.
    pub fn coronal_ring(&self, ring_width: u8) -> Vec<Option<u8>> {
        let width = ring_width.min(self.n);
        let last = self.n - 1;
        let mut ring = Vec::with_capacity(4 * usize::from(width));

        ring.extend((0..width).map(|x| self.row_in(x)));
        ring.extend((0..width).map(|k| self.column_in(last - k)));
        ring.extend((0..width).map(|k| self.row_in(last - k).map(|y| last - y)));
        ring.extend((0..width).map(|y| self.column_in(y).map(|x| last - x)));

        ring
    }

    /// Returns the image of this board under `transform`.
    pub fn transformed(&self, transform: Transform) -> BitBoard {
        let mut image = BitBoard::new(self.n);
        for (column, row) in self.queens() {
            let (x, y) = transform.apply_cell((column, row), self.n);
            let placement = image.place(x, y);
            debug_assert!(
                matches!(placement, Placement::Placed(_)),
                "{transform} produced a conflict at ({x},{y})"
            );
        }
        image
    }

    /// Number of symmetries of the square that map this board onto itself.
    pub fn stabilizer_order(&self) -> u32 {
        Transform::ALL
            .iter()
            .filter(|&&t| t.is_identity() || self.transformed(t) == *self)
            .count() as u32
    }

    /// Iterates over the queens as (column, row), by column.
    pub fn queens(&self) -> impl Iterator<Item = Cell> + '_ {
        self.column_rows
            .iter()
            .enumerate()
            .filter_map(|(column, row)| row.map(|row| (column as u8, row)))
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.columns.count_ones() == u32::from(self.placed)
                && self.rows.count_ones() == u32::from(self.placed)
                && self.rising.count_ones() == u32::from(self.placed)
                && self.falling.count_ones() == u32::from(self.placed),
            "lane popcounts diverged from {} placed queens",
            self.placed
        );
    }
}

impl fmt::Display for BitBoard {
    /// Renders the board with the top row first, `Q` for queens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.n).rev() {
            for column in 0..self.n {
                let symbol = if self.has_queen(column, row) { 'Q' } else { '.' };
                write!(f, "{symbol}")?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a board from rows indexed by column.
    fn board_from_rows(rows: &[u8]) -> BitBoard {
        let mut board = BitBoard::new(rows.len() as u8);
        for (column, &row) in rows.iter().enumerate() {
            let placement = board.place(column as u8, row);
            assert!(matches!(placement, Placement::Placed(_)));
        }
        board
    }

    #[test]
    fn test_board_size_limits() {
        assert!(BoardSize::new(3).is_err());
        assert!(BoardSize::new(4).is_err());
        assert!(BoardSize::new(33).is_err());
        assert_eq!(BoardSize::new(5).unwrap().get(), 5);
        assert_eq!(BoardSize::try_from(32).unwrap().get(), 32);
    }

    #[test]
    fn test_place_sets_all_lanes() {
        let mut board = BitBoard::new(8);
        let placement = board.place(2, 5);
        assert_eq!(placement, Placement::Placed((2, 5)));
        assert_eq!(board.columns(), 1 << 2);
        assert_eq!(board.rows(), 1 << 5);
        assert_eq!(board.rising(), 1 << (8 - 1 - 2 + 5));
        assert_eq!(board.falling(), 1 << 7);
        assert_eq!(board.placed(), 1);
        assert_eq!(board.row_in(2), Some(5));
        board.undo(placement);
        assert_eq!(board, BitBoard::new(8));
    }

    #[test]
    fn test_conflicting_placement_is_rejected() {
        let mut board = BitBoard::new(6);
        let first = board.place(1, 1);
        let snapshot = board.clone();

        for (column, row) in [(1, 4), (4, 1), (3, 3), (0, 2)] {
            let placement = board.place(column, row);
            assert!(!placement.succeeded(), "({column},{row}) should be attacked");
            assert_eq!(board, snapshot);
            board.undo(placement);
        }
        board.undo(first);
    }

    #[test]
    fn test_repeated_placement_is_not_owned() {
        let mut board = BitBoard::new(5);
        let first = board.place(0, 3);
        let again = board.place(0, 3);
        assert_eq!(again, Placement::Existing((0, 3)));
        assert_eq!(board.placed(), 1);

        board.undo(again);
        assert!(board.has_queen(0, 3), "undoing a repeat must keep the queen");
        board.undo(first);
        assert_eq!(board.placed(), 0);
    }

    #[test]
    fn test_lifo_undo_restores_board() {
        // deterministic pseudo-random cells, many of them conflicting
        let n = 11u8;
        let mut state = 0x2545_f491_u32;
        let mut board = BitBoard::new(n);
        let first = board.place(5, 5);
        let before = board.clone();

        let mut stack = Vec::new();
        for _ in 0..64 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let column = ((state >> 16) % u32::from(n)) as u8;
            let row = ((state >> 8) % u32::from(n)) as u8;
            stack.push(board.place(column, row));
        }
        assert!(stack.iter().any(|p| !p.succeeded()));
        assert!(stack.iter().any(|p| matches!(p, Placement::Placed(_))));

        while let Some(placement) = stack.pop() {
            board.undo(placement);
        }
        assert_eq!(board, before);
        board.undo(first);
        assert_eq!(board, BitBoard::new(n));
    }

    #[test]
    fn test_place_pair_is_all_or_nothing() {
        let mut board = BitBoard::new(7);
        let blocker = board.place(3, 3);
        let snapshot = board.clone();

        // second cell shares the blocker's row
        assert!(board.place_pair([(0, 1), (6, 3)]).is_none());
        assert_eq!(board, snapshot);

        let pair = board.place_pair([(0, 1), (1, 4)]).expect("pair fits");
        assert_eq!(board.placed(), 3);
        board.undo_pair(pair);
        assert_eq!(board, snapshot);
        board.undo(blocker);
    }

    #[test]
    fn test_coronal_ring_reads_clockwise() {
        // 6x6 solution, rows by column
        let board = board_from_rows(&[1, 3, 5, 0, 2, 4]);
        let ring = board.coronal_ring(2);
        assert_eq!(
            ring,
            vec![
                Some(1), // column 0
                Some(3), // column 1
                Some(2), // row 5 holds column 2
                Some(5), // row 4 holds column 5
                Some(1), // column 5 holds row 4
                Some(3), // column 4 holds row 2
                Some(2), // row 0 holds column 3
                Some(5), // row 1 holds column 0
            ]
        );
    }

    #[test]
    fn test_coronal_ring_marks_empty_lines() {
        let mut board = BitBoard::new(5);
        let placement = board.place(0, 2);
        assert_eq!(
            board.coronal_ring(1),
            vec![Some(2), None, None, None]
        );
        board.undo(placement);
    }

    #[test]
    fn test_quarter_turn_rotates_ring() {
        let board = board_from_rows(&[1, 3, 5, 0, 2, 4]);
        let ring = board.coronal_ring(2);
        let rotated = board.transformed(Transform::QUARTER_TURN).coronal_ring(2);
        // the west edge moves north
        assert_eq!(rotated[2..], ring[..6]);
        assert_eq!(rotated[..2], ring[6..]);
    }

    #[test]
    fn test_stabilizer_order() {
        // this 6x6 solution is symmetric under the half turn only
        let point = board_from_rows(&[1, 3, 5, 0, 2, 4]);
        assert_eq!(point.stabilizer_order(), 2);

        // this 5x5 solution is symmetric under the quarter turn
        let rotation = board_from_rows(&[1, 4, 2, 0, 3]);
        assert_eq!(rotation.stabilizer_order(), 4);

        let mut lone = BitBoard::new(5);
        let placement = lone.place(0, 1);
        assert_eq!(lone.stabilizer_order(), 1);
        lone.undo(placement);
    }

    #[test]
    fn test_display() {
        let board = board_from_rows(&[0, 2, 4, 1, 3]);
        insta::assert_snapshot!(board.to_string(), @r"
        ..Q..
        ....Q
        .Q...
        ...Q.
        Q....
        ");
    }
}
