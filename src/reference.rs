//! Known N-queens solution counts (OEIS A000170).

/// Solutions for `n = 1..=27`, indexed by `n - 1`.
const KNOWN_SOLUTIONS: [u64; 27] = [
    1,
    0,
    0,
    2,
    10,
    4,
    40,
    92,
    352,
    724,
    2_680,
    14_200,
    73_712,
    365_596,
    2_279_184,
    14_772_512,
    95_815_104,
    666_090_624,
    4_968_057_848,
    39_029_188_884,
    314_666_222_712,
    2_691_008_701_644,
    24_233_937_684_440,
    227_514_171_973_736,
    2_207_893_435_808_352,
    22_317_699_616_364_044,
    234_907_967_154_122_528,
];

/// Known number of solutions on an `n`x`n` board, if tabulated.
pub fn known_solutions(n: u8) -> Option<u64> {
    let index = usize::from(n).checked_sub(1)?;
    KNOWN_SOLUTIONS.get(index).copied()
}

/// Largest tabulated board size.
pub const MAX_KNOWN_N: u8 = KNOWN_SOLUTIONS.len() as u8;
