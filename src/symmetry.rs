//! Symmetries of the square board.
//!
//! The square has 8 symmetries (the dihedral group of order 8): 4 rotations,
//! each optionally preceded by a mirror about the vertical center line. They
//! act both on board cells and on ring quadruples produced by the preplacement
//! generator, and the two actions must stay in sync.

use std::fmt;

/// Number of symmetries of the square.
pub const NUM_TRANSFORMS: usize = 8;

/// One element of the symmetry group of the square.
///
/// Applied as: mirror first (if `mirrored`), then `quarter_turns` clockwise
/// quarter turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transform {
    quarter_turns: u8,
    mirrored: bool,
}

impl Transform {
    pub const IDENTITY: Self = Self::new(0, false);
    pub const QUARTER_TURN: Self = Self::new(1, false);
    pub const HALF_TURN: Self = Self::new(2, false);

    /// All 8 symmetries, identity first.
    pub const ALL: [Self; NUM_TRANSFORMS] = [
        Self::new(0, false),
        Self::new(1, false),
        Self::new(2, false),
        Self::new(3, false),
        Self::new(0, true),
        Self::new(1, true),
        Self::new(2, true),
        Self::new(3, true),
    ];

    const fn new(quarter_turns: u8, mirrored: bool) -> Self {
        Self {
            quarter_turns,
            mirrored,
        }
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// True for the four reflections.
    pub fn is_mirrored(self) -> bool {
        self.mirrored
    }

    /// Maps the cell `(column, row)` of an `n`x`n` board to its image.
    ///
    /// Uses doubled centered coordinates so odd and even boards share one
    /// formula: the center sits at `n - 1`.
    pub fn apply_cell(self, (column, row): (u8, u8), n: u8) -> (u8, u8) {
        let span = i32::from(n) - 1;
        let mut cx = 2 * i32::from(column) - span;
        let mut cy = 2 * i32::from(row) - span;

        if self.mirrored {
            cx = -cx;
        }
        for _ in 0..self.quarter_turns {
            // (x, y) -> (y, n - 1 - x)
            (cx, cy) = (cy, -cx);
        }

        (((cx + span) / 2) as u8, ((cy + span) / 2) as u8)
    }

    /// Maps a ring quadruple `[west, north, east, south]` of pair-table
    /// indices to the quadruple of the transformed board.
    ///
    /// `total` is the pair-table length; mirroring a pair maps index `i` to
    /// `total - 1 - i`.
    pub fn apply_ring(self, ring: [usize; 4], total: usize) -> [usize; 4] {
        let rev = |i: usize| total - 1 - i;
        let [w, n, e, s] = ring;

        let mut image = if self.mirrored {
            // west and east swap sides and every pair is read backwards
            [rev(e), rev(n), rev(w), rev(s)]
        } else {
            ring
        };
        for _ in 0..self.quarter_turns {
            let [w, n, e, s] = image;
            image = [s, w, n, e];
        }
        image
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mirrored {
            write!(f, "mirror+")?;
        }
        write!(f, "rot{}", u16::from(self.quarter_turns) * 90)
    }
}

/// Symmetry class of a preplaced board.
///
/// Ring preplacements are never fixed by a reflection (a mirrored queen would
/// share a row, column or diagonal with its original), so the stabilizer is
/// always a subgroup of the rotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymmetryClass {
    /// Fixed by the quarter turn.
    RotationSymmetric,
    /// Fixed by the half turn only.
    PointSymmetric,
    /// Fixed by the identity only.
    Identity,
}

impl SymmetryClass {
    /// All classes in reporting order.
    pub const ALL: [Self; 3] = [Self::Identity, Self::PointSymmetric, Self::RotationSymmetric];

    /// Order of the subgroup of symmetries that fixes a board of this class.
    pub const fn stabilizer_order(self) -> u32 {
        match self {
            Self::RotationSymmetric => 4,
            Self::PointSymmetric => 2,
            Self::Identity => 1,
        }
    }

    /// Number of distinct boards in the orbit of a board of this class.
    pub const fn weight(self) -> u32 {
        NUM_TRANSFORMS as u32 / self.stabilizer_order()
    }

    /// Dense index for per-class storage.
    pub const fn index(self) -> usize {
        match self {
            Self::RotationSymmetric => 0,
            Self::PointSymmetric => 1,
            Self::Identity => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::RotationSymmetric => "ROTATE",
            Self::PointSymmetric => "POINT",
            Self::Identity => "NONE",
        }
    }
}

impl fmt::Display for SymmetryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
