//! Parallel completion counting and symmetry-weighted aggregation.

use rayon::prelude::*;

use crate::board::BoardSize;
use crate::compact::CompactBoard;
use crate::counter::count_completions;
use crate::preplace::{preplace, Preplacements};
use crate::symmetry::SymmetryClass;

/// Completion counts per symmetry class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    raw: [u128; 3],
}

impl Tally {
    /// Completions summed over the class's canonical boards.
    pub fn raw(&self, class: SymmetryClass) -> u128 {
        self.raw[class.index()]
    }

    /// Solutions contributed by the class: every canonical board stands for
    /// `weight` boards of its orbit.
    pub fn weighted(&self, class: SymmetryClass) -> u128 {
        self.raw(class) * u128::from(class.weight())
    }

    /// Total number of solutions.
    pub fn total(&self) -> u128 {
        SymmetryClass::ALL
            .into_iter()
            .map(|class| self.weighted(class))
            .sum()
    }
}

/// Sums the completions of `boards` on the current rayon pool, calling
/// `on_board` after each board.
pub fn count_boards<F>(boards: &[CompactBoard], n: u8, on_board: &F) -> u128
where
    F: Fn() + Sync,
{
    boards
        .par_iter()
        .map(|board| {
            let completions = count_completions(board, n);
            on_board();
            u128::from(completions)
        })
        .sum()
}

/// Counts the completions of every preplacement, class by class.
pub fn count_preplacements<F>(preplacements: &Preplacements, size: BoardSize, on_board: F) -> Tally
where
    F: Fn() + Sync,
{
    let mut tally = Tally::default();
    for (class, boards) in preplacements.iter() {
        tally.raw[class.index()] = count_boards(boards, size.get(), &on_board);
    }
    tally
}

/// Counts all solutions for `size`.
pub fn solve(size: BoardSize) -> Tally {
    count_preplacements(&preplace(size), size, || {})
}
