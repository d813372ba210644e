//! Piece generator - random tetrominoes with forced item pieces
//!
//! Regular pieces come from a seeded [`StdRng`] so a seed reproduces a game.
//! Two strategies are available:
//!
//! - [`Randomizer::Uniform`]: each draw is uniform over the seven kinds
//! - [`Randomizer::Bag`]: shuffled bags of all seven kinds
//!
//! A small lookahead queue backs the "next" preview. When item mode asks for a
//! bomb, the bomb is handed out ahead of the queue on the following draw, so
//! the preview of regular pieces stays accurate.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::types::{Piece, PieceKind, Randomizer, NEXT_PREVIEW_LEN};

/// Produces the sequence of pieces for one game.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
    seed: u64,
    randomizer: Randomizer,
    /// Remaining pieces of the current bag (bag randomizer only), drawn from the back.
    bag: ArrayVec<PieceKind, 7>,
    /// Upcoming regular pieces, front first.
    lookahead: ArrayVec<PieceKind, NEXT_PREVIEW_LEN>,
    /// The next draw returns a bomb instead of a regular piece.
    forced_item: bool,
}

impl PieceGenerator {
    pub fn new(seed: u64, randomizer: Randomizer) -> Self {
        let mut generator = Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            randomizer,
            bag: ArrayVec::new(),
            lookahead: ArrayVec::new(),
            forced_item: false,
        };
        generator.fill_lookahead();
        generator
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Draw the next piece.
    ///
    /// Returns [`Piece::BOMB`] when an item was forced since the last draw,
    /// otherwise the front of the regular sequence.
    pub fn next_piece(&mut self) -> Piece {
        if self.forced_item {
            self.forced_item = false;
            debug!("generator handing out forced bomb piece");
            return Piece::BOMB;
        }

        let kind = self.lookahead.remove(0);
        self.fill_lookahead();
        Piece::normal(kind)
    }

    /// Make the next draw a bomb piece.
    pub fn force_item(&mut self) {
        self.forced_item = true;
    }

    pub fn item_pending(&self) -> bool {
        self.forced_item
    }

    /// The pieces the next draws will return, in order.
    pub fn preview(&self) -> ArrayVec<Piece, NEXT_PREVIEW_LEN> {
        let mut out = ArrayVec::new();
        if self.forced_item {
            out.push(Piece::BOMB);
        }
        for &kind in &self.lookahead {
            if out.try_push(Piece::normal(kind)).is_err() {
                break;
            }
        }
        out
    }

    fn fill_lookahead(&mut self) {
        while !self.lookahead.is_full() {
            let kind = self.draw_regular();
            self.lookahead.push(kind);
        }
    }

    fn draw_regular(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())],
            Randomizer::Bag => {
                if self.bag.is_empty() {
                    self.bag.extend(PieceKind::ALL);
                    self.bag.shuffle(&mut self.rng);
                }
                // Refilled above when empty.
                self.bag.pop().unwrap_or(PieceKind::I)
            }
        }
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1, Randomizer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PieceGenerator::new(12345, Randomizer::Uniform);
        let mut b = PieceGenerator::new(12345, Randomizer::Uniform);
        for _ in 0..100 {
            assert_eq!(a.next_piece(), b.next_piece());
        }
    }

    #[test]
    fn preview_front_matches_next_draw() {
        let mut generator = PieceGenerator::new(7, Randomizer::Uniform);
        for _ in 0..20 {
            let expected = generator.preview()[0];
            assert_eq!(generator.next_piece(), expected);
        }
    }

    #[test]
    fn preview_is_full_length() {
        let generator = PieceGenerator::new(3, Randomizer::Bag);
        assert_eq!(generator.preview().len(), NEXT_PREVIEW_LEN);
    }

    #[test]
    fn forced_item_is_next_and_clears_flag() {
        let mut generator = PieceGenerator::new(99, Randomizer::Uniform);
        let regular_next = generator.preview()[0];

        generator.force_item();
        assert!(generator.item_pending());
        assert_eq!(generator.preview()[0], Piece::BOMB);
        assert_eq!(generator.preview()[1], regular_next);

        assert_eq!(generator.next_piece(), Piece::BOMB);
        assert!(!generator.item_pending());
        assert_eq!(generator.next_piece(), regular_next);
    }

    #[test]
    fn forcing_twice_yields_one_bomb() {
        let mut generator = PieceGenerator::new(5, Randomizer::Uniform);
        generator.force_item();
        generator.force_item();
        assert_eq!(generator.next_piece(), Piece::BOMB);
        assert!(!generator.next_piece().is_item());
    }

    #[test]
    fn bag_contains_each_kind_once() {
        let mut generator = PieceGenerator::new(1, Randomizer::Bag);
        let mut drawn: Vec<PieceKind> = (0..7).map(|_| generator.next_piece().kind).collect();
        drawn.sort_by_key(|kind| kind.index());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn regular_pieces_are_never_items() {
        let mut generator = PieceGenerator::new(42, Randomizer::Uniform);
        assert!((0..200).all(|_| !generator.next_piece().is_item()));
    }
}
