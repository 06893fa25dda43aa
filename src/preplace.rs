//! Canonical ring preplacement generator.
//!
//! Fixes one queen in each of the outer two columns and rows on every edge
//! of the board. Each edge is described by an index into the table of valid
//! two-line pairs, read clockwise (see [`BitBoard::coronal_ring`]), so a ring
//! is a quadruple `[west, north, east, south]` of pair indices.
//!
//! Only the lexicographically smallest quadruple of every symmetry orbit is
//! emitted, tagged with the class of its stabilizer. Every N-queens solution
//! fills the ring in exactly one way, so counting the completions of each
//! emitted board and scaling by the orbit size counts every solution once.

use std::ops::Index;

use crate::board::{BitBoard, BoardSize, Cell};
use crate::compact::CompactBoard;
use crate::symmetry::{SymmetryClass, Transform};

/// Width of the preplaced ring.
pub const RING_WIDTH: u8 = 2;

/// Pair-table indices of a ring: `[west, north, east, south]`.
pub type Ring = [usize; 4];

/// All queen positions `(a, b)` for two adjacent lines that do not attack
/// each other, ordered by `a` then `b`.
#[derive(Clone, Debug)]
pub struct PairTable {
    n: u8,
    pairs: Vec<(u8, u8)>,
}

impl PairTable {
    pub fn new(n: u8) -> Self {
        let pairs: Vec<(u8, u8)> = (0..n)
            .flat_map(|a| (0..n).map(move |b| (a, b)))
            .filter(|&(a, b)| a.abs_diff(b) > 1)
            .collect();

        // 2 * (n - 2) pairs start on an edge row, (n - 2) * (n - 3) inside
        debug_assert_eq!(pairs.len(), usize::from(n - 2) * usize::from(n - 1));
        Self { n, pairs }
    }

    /// Number of pairs, `(n - 2) * (n - 1)`.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> (u8, u8) {
        self.pairs[index]
    }

    /// Index of `pair`, if it is valid.
    pub fn index_of(&self, pair: (u8, u8)) -> Option<usize> {
        self.pairs.binary_search(&pair).ok()
    }

    /// Index of the pair read from the opposite end of both lines.
    #[inline]
    pub fn mirror(&self, index: usize) -> usize {
        self.len() - 1 - index
    }

    /// Last west index worth searching: the west pair is the smallest index
    /// of its ring and of every mirrored index, so it lies in the first half.
    #[inline]
    pub fn west_bound(&self) -> usize {
        self.len() / 2
    }

    /// Reads a ring back from a board with all ring lines filled.
    pub fn ring_of(&self, board: &BitBoard) -> Option<Ring> {
        let edges = board.coronal_ring(RING_WIDTH);
        let mut ring = [0; 4];
        for (side, edge) in edges.chunks_exact(2).enumerate() {
            ring[side] = self.index_of((edge[0]?, edge[1]?))?;
        }
        Some(ring)
    }

    /// Cells of one edge's pair: west, north, east, south.
    fn cells(&self, side: usize, index: usize) -> [Cell; 2] {
        let (a, b) = self.pairs[index];
        let last = self.n - 1;
        match side {
            0 => [(0, a), (1, b)],
            1 => [(a, last), (b, last - 1)],
            2 => [(last, last - a), (last - 1, last - b)],
            _ => [(last - a, 0), (last - b, 1)],
        }
    }
}

/// Decides whether `ring` is the smallest quadruple of its orbit and, if so,
/// returns its symmetry class.
///
/// With every index in `[w, total - w)` only quadruples that touch a bound
/// (`w` itself or the mirror of `w`) can tie with or lose to an image, so the
/// others are accepted without comparison.
pub fn classify(ring: Ring, total: usize) -> Option<SymmetryClass> {
    let [w, n, e, s] = ring;
    let mirrored_west = total - 1 - w;
    if [n, e, s].iter().all(|&i| i != w && i != mirrored_west) {
        return Some(SymmetryClass::Identity);
    }

    let mut fixed_by_quarter_turn = false;
    let mut fixed_by_half_turn = false;
    for transform in &Transform::ALL[1..] {
        let image = transform.apply_ring(ring, total);
        if image < ring {
            return None;
        }
        if image == ring {
            debug_assert!(!transform.is_mirrored(), "ring {ring:?} is fixed by {transform}");
            fixed_by_quarter_turn |= *transform == Transform::QUARTER_TURN;
            fixed_by_half_turn |= *transform == Transform::HALF_TURN;
        }
    }

    Some(if fixed_by_quarter_turn {
        SymmetryClass::RotationSymmetric
    } else if fixed_by_half_turn {
        SymmetryClass::PointSymmetric
    } else {
        SymmetryClass::Identity
    })
}

/// Receives the generator's output.
pub trait PreplaceVisitor {
    /// Called before the rings with west index `index` are searched.
    fn west(&mut self, _index: usize, _bound: usize) {}

    /// Called once per canonical ring with all ring queens on `board`.
    fn accept(&mut self, ring: Ring, class: SymmetryClass, board: &BitBoard);
}

/// Enumerates the canonical ring preplacements of one board size.
#[derive(Clone, Debug)]
pub struct Preplacer {
    size: BoardSize,
    pairs: PairTable,
}

impl Preplacer {
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            pairs: PairTable::new(size.get()),
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn pairs(&self) -> &PairTable {
        &self.pairs
    }

    /// Collects all canonical rings as compact boards, by class.
    pub fn run(&self) -> Preplacements {
        let mut preplacements = Preplacements::default();
        self.visit(&mut preplacements);
        preplacements
    }

    /// Runs the ring search, reporting every canonical ring to `visitor`.
    ///
    /// One board is shared by the whole search; each edge pair is undone
    /// before the next index of its loop is tried.
    pub fn visit<V: PreplaceVisitor + ?Sized>(&self, visitor: &mut V) {
        let n = self.size.get();
        let total = self.pairs.len();
        let bound = self.pairs.west_bound();
        let mut board = BitBoard::new(n);

        for w in 0..=bound {
            visitor.west(w, bound);
            let west = board.place_pair(self.pairs.cells(0, w));
            debug_assert!(west.is_some(), "west pair {w} conflicts on an empty board");
            let Some(west) = west else {
                continue;
            };

            for north_index in w..total - w {
                let Some(north) = board.place_pair(self.pairs.cells(1, north_index)) else {
                    continue;
                };

                for east_index in w..total - w {
                    let Some(east) = board.place_pair(self.pairs.cells(2, east_index)) else {
                        continue;
                    };

                    for south_index in w..total - w {
                        let Some(south) = board.place_pair(self.pairs.cells(3, south_index)) else {
                            continue;
                        };

                        let ring = [w, north_index, east_index, south_index];
                        if let Some(class) = classify(ring, total) {
                            self.debug_check(&board, ring, class);
                            visitor.accept(ring, class, &board);
                        }

                        board.undo_pair(south);
                    }
                    board.undo_pair(east);
                }
                board.undo_pair(north);
            }
            board.undo_pair(west);
        }

        debug_assert_eq!(board, BitBoard::new(n), "ring search left queens behind");
    }

    #[inline]
    fn debug_check(&self, board: &BitBoard, ring: Ring, class: SymmetryClass) {
        if cfg!(debug_assertions) {
            assert_eq!(self.pairs.ring_of(board), Some(ring));
            assert!(CompactBoard::capture(board).covers_ring(self.size.get(), RING_WIDTH));
            assert_eq!(
                board.stabilizer_order(),
                class.stabilizer_order(),
                "ring {ring:?} misclassified as {class}"
            );
        }
    }
}

/// Canonical ring preplacements grouped by symmetry class, in generation
/// order.
#[derive(Clone, Debug, Default)]
pub struct Preplacements {
    classes: [Vec<CompactBoard>; 3],
}

impl Preplacements {
    pub fn push(&mut self, class: SymmetryClass, board: CompactBoard) {
        self.classes[class.index()].push(board);
    }

    /// Total number of boards across all classes.
    pub fn len(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the classes in reporting order with their boards.
    pub fn iter(&self) -> impl Iterator<Item = (SymmetryClass, &[CompactBoard])> + '_ {
        SymmetryClass::ALL
            .into_iter()
            .map(move |class| (class, self[class].as_slice()))
    }
}

impl Index<SymmetryClass> for Preplacements {
    type Output = Vec<CompactBoard>;

    fn index(&self, class: SymmetryClass) -> &Self::Output {
        &self.classes[class.index()]
    }
}

impl PreplaceVisitor for Preplacements {
    fn accept(&mut self, _ring: Ring, class: SymmetryClass, board: &BitBoard) {
        self.push(class, CompactBoard::capture(board));
    }
}

/// Generates the canonical preplacements for `size`.
pub fn preplace(size: BoardSize) -> Preplacements {
    Preplacer::new(size).run()
}
