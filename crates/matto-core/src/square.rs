//! Chess board squares using Little-Endian Rank-File (LERF) encoding.

use std::fmt;

use crate::direction::Direction;
use crate::file::File;
use crate::rank::Rank;

/// A square on the chess board, encoded as a `u8` in LERF format.
///
/// Index = rank * 8 + file, so A1 = 0, B1 = 1, ..., H8 = 63. A square is a
/// pure coordinate; occupancy lives on the [`Board`](crate::board::Board).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from a rank and file.
    #[inline]
    pub const fn new(rank: Rank, file: File) -> Square {
        Square(rank.index() as u8 * 8 + file.index() as u8)
    }

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parse an algebraic notation string (e.g. "e4") into a square.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?)?;
        let rank = Rank::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::new(rank, file))
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(self.0 / 8) {
            Some(rank) => rank,
            None => unreachable!(),
        }
    }

    /// Return the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.0 % 8) {
            Some(file) => file,
            None => unreachable!(),
        }
    }

    /// Step by a (file, rank) delta, returning `None` when the step would
    /// cross a board edge.
    ///
    /// This is the only wrap protection in the crate: everything downstream
    /// treats `None` as "off board".
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file().offset(file_delta)?;
        let rank = self.rank().offset(rank_delta)?;
        Some(Square::new(rank, file))
    }

    /// Step one square in a ray direction, clipping at the board edge.
    #[inline]
    pub fn shift(self, dir: Direction) -> Option<Square> {
        let (df, dr) = dir.delta();
        self.offset(df, dr)
    }

    /// Iterate over all 64 squares in index order (A1, B1, ..., H8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    // Named square constants
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);
    pub const B2: Square = Square(9);
    pub const C2: Square = Square(10);
    pub const D2: Square = Square(11);
    pub const E2: Square = Square(12);
    pub const F2: Square = Square(13);
    pub const G2: Square = Square(14);
    pub const H2: Square = Square(15);
    pub const A3: Square = Square(16);
    pub const B3: Square = Square(17);
    pub const C3: Square = Square(18);
    pub const D3: Square = Square(19);
    pub const E3: Square = Square(20);
    pub const F3: Square = Square(21);
    pub const G3: Square = Square(22);
    pub const H3: Square = Square(23);
    pub const A4: Square = Square(24);
    pub const B4: Square = Square(25);
    pub const C4: Square = Square(26);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const F4: Square = Square(29);
    pub const G4: Square = Square(30);
    pub const H4: Square = Square(31);
    pub const A5: Square = Square(32);
    pub const B5: Square = Square(33);
    pub const C5: Square = Square(34);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const F5: Square = Square(37);
    pub const G5: Square = Square(38);
    pub const H5: Square = Square(39);
    pub const A6: Square = Square(40);
    pub const B6: Square = Square(41);
    pub const C6: Square = Square(42);
    pub const D6: Square = Square(43);
    pub const E6: Square = Square(44);
    pub const F6: Square = Square(45);
    pub const G6: Square = Square(46);
    pub const H6: Square = Square(47);
    pub const A7: Square = Square(48);
    pub const B7: Square = Square(49);
    pub const C7: Square = Square(50);
    pub const D7: Square = Square(51);
    pub const E7: Square = Square(52);
    pub const F7: Square = Square(53);
    pub const G7: Square = Square(54);
    pub const H7: Square = Square(55);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::Square;
    use crate::direction::{Direction, KNIGHT_JUMPS};
    use crate::file::File;
    use crate::rank::Rank;

    #[test]
    fn new_and_accessors() {
        let sq = Square::new(Rank::Rank1, File::FileA);
        assert_eq!(sq, Square::A1);
        assert_eq!(sq.rank(), Rank::Rank1);
        assert_eq!(sq.file(), File::FileA);
        assert_eq!(sq.index(), 0);
    }

    #[test]
    fn rank_file_roundtrip() {
        for sq in Square::all() {
            let reconstructed = Square::new(sq.rank(), sq.file());
            assert_eq!(sq, reconstructed);
        }
    }

    #[test]
    fn algebraic_notation() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::E4));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(format!("{}", Square::E4), "e4");
        assert_eq!(format!("{}", Square::A1), "a1");
    }

    #[test]
    fn algebraic_invalid() {
        assert!(Square::from_algebraic("i1").is_none());
        assert!(Square::from_algebraic("a9").is_none());
        assert!(Square::from_algebraic("").is_none());
        assert!(Square::from_algebraic("a").is_none());
        assert!(Square::from_algebraic("a1b").is_none());
    }

    #[test]
    fn shift_steps_one_square() {
        assert_eq!(Square::E4.shift(Direction::North), Some(Square::E5));
        assert_eq!(Square::E4.shift(Direction::SouthWest), Some(Square::D3));
    }

    #[test]
    fn shift_clips_at_file_edges() {
        assert_eq!(Square::A4.shift(Direction::West), None);
        assert_eq!(Square::A4.shift(Direction::NorthWest), None);
        assert_eq!(Square::A4.shift(Direction::SouthWest), None);
        assert_eq!(Square::H4.shift(Direction::East), None);
        assert_eq!(Square::H4.shift(Direction::NorthEast), None);
    }

    #[test]
    fn shift_clips_at_rank_edges() {
        assert_eq!(Square::E1.shift(Direction::South), None);
        assert_eq!(Square::E8.shift(Direction::North), None);
        assert_eq!(Square::A1.shift(Direction::SouthWest), None);
        assert_eq!(Square::H8.shift(Direction::NorthEast), None);
    }

    #[test]
    fn knight_offsets_never_wrap() {
        // A knight on b1 must not reach the h-file by wrapping around.
        let reachable: Vec<Square> = KNIGHT_JUMPS
            .iter()
            .filter_map(|&(df, dr)| Square::B1.offset(df, dr))
            .collect();
        assert_eq!(reachable.len(), 3);
        assert!(reachable.contains(&Square::A3));
        assert!(reachable.contains(&Square::C3));
        assert!(reachable.contains(&Square::D2));
    }

    #[test]
    fn corner_knight_offsets() {
        let reachable: Vec<Square> = KNIGHT_JUMPS
            .iter()
            .filter_map(|&(df, dr)| Square::A1.offset(df, dr))
            .collect();
        assert_eq!(reachable.len(), 2);
        assert!(reachable.contains(&Square::B3));
        assert!(reachable.contains(&Square::C2));
    }

    #[test]
    fn all_iterator_count() {
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn debug_shows_algebraic() {
        assert_eq!(format!("{:?}", Square::E4), "Square(e4)");
    }
}
