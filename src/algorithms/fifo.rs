// src/algorithms/fifo.rs
//
// Evict whichever frame has been occupied longest, without consulting
// the referenced bit at all: the hand sweeps the frame table exactly
// once per eviction and never goes back.

use super::ReplacementAlgorithm;
use crate::frame::FrameTable;
use crate::process::Process;

pub struct Fifo {
    hand: usize,
}

impl Fifo {
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl ReplacementAlgorithm for Fifo {
    fn select_victim(
        &mut self,
        frames: &mut FrameTable,
        _processes: &mut [Process],
        _inst_count: u64,
    ) -> usize {
        let victim = self.hand;
        self.hand = (self.hand + 1) % frames.len();
        victim
    }
}
