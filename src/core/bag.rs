//! 7-bag piece randomizer.
//!
//! Pieces are drawn from shuffled batches of seven, one of each shape per
//! batch, so any 7 consecutive draws starting at a batch boundary contain
//! every shape exactly once.
//!
//! Uses a small seeded LCG rather than an OS RNG so that sessions (and the
//! search tests built on them) are fully deterministic.

use crate::types::PieceKind;

/// Simple LCG with Numerical Recipes constants.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would be a fixed point.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece source.
#[derive(Debug, Clone)]
pub struct SevenBag {
    bag: [PieceKind; 7],
    index: usize,
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.index = 0;
    }

    /// Draw the next piece, reshuffling a fresh batch when exhausted.
    pub fn draw(&mut self) -> PieceKind {
        if self.index >= self.bag.len() {
            self.refill();
        }
        let piece = self.bag[self.index];
        self.index += 1;
        piece
    }

    /// Peek the next piece without consuming it.
    pub fn peek(&self) -> Option<PieceKind> {
        self.bag.get(self.index).copied()
    }

    /// Current RNG state, usable as a seed for a follow-up session.
    pub fn seed(&self) -> u32 {
        self.rng.state
    }

    #[cfg(test)]
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.index..]
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}
