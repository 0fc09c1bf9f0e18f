//! RNG module - bag random piece generation
//!
//! The queue is refilled with one of each catalog variant, shuffled, whenever
//! it runs empty. A variant can repeat at most once across a bag boundary.
//!
//! Also provides a simple LCG so a seed fully determines the piece sequence.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

const BAG_SIZE: usize = PieceKind::ALL.len();

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state is a fixed point for some LCG variants; keep it out.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform-ish value in `[0, max)`; uses the high bits, which cycle slower
    pub fn next_below(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Upcoming pieces, drawn front to back from shuffled bags
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Remaining pieces of the current bag; the next draw is the last element
    bag: ArrayVec<PieceKind, BAG_SIZE>,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        };
        queue.refill();
        queue
    }

    fn refill(&mut self) {
        let mut bag = PieceKind::ALL;
        self.rng.shuffle(&mut bag);
        self.bag = bag.into_iter().rev().collect();
    }

    /// Look at the next piece without consuming it
    pub fn peek(&self) -> PieceKind {
        match self.bag.last() {
            Some(&kind) => kind,
            None => {
                // Same RNG state as the refill `draw` will perform.
                let mut rng = self.rng.clone();
                let mut bag = PieceKind::ALL;
                rng.shuffle(&mut bag);
                bag[0]
            }
        }
    }

    /// Take the next piece, refilling the bag once it has been emptied
    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        match self.bag.pop() {
            Some(kind) => kind,
            None => unreachable!("refill always produces a full bag"),
        }
    }
}
