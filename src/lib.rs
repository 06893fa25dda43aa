//! N-Queens Solution Counter Library
//!
//! Counts the solutions of the N-queens puzzle for boards up to 32x32. The
//! outer two-wide ring of the board is preplaced first, keeping only one
//! board per symmetry orbit; the remaining queens are then counted with a
//! bitmask search that runs in parallel over the preplaced boards.

pub mod board;
pub mod compact;
pub mod counter;
pub mod preplace;
pub mod reference;
pub mod runtime;
pub mod solver;
pub mod symmetry;

pub use board::{BitBoard, BoardSize, Placement};
pub use compact::CompactBoard;
pub use counter::count_completions;
pub use preplace::{preplace, Preplacements, Preplacer};
pub use solver::{solve, Tally};
pub use symmetry::SymmetryClass;
