// src/algorithms/random.rs
//
// Draws from the same deterministic random source the random file
// loads at startup. Consults neither the referenced nor the modified
// bit — picking a victim is a pure draw from `RandomSource::next`.

use super::ReplacementAlgorithm;
use crate::frame::FrameTable;
use crate::process::Process;
use crate::rand_source::RandomSource;

pub struct Random {
    source: RandomSource,
}

impl Random {
    pub fn new(source: RandomSource) -> Self {
        Self { source }
    }
}

impl ReplacementAlgorithm for Random {
    fn select_victim(
        &mut self,
        frames: &mut FrameTable,
        _processes: &mut [Process],
        _inst_count: u64,
    ) -> usize {
        self.source.next(frames.len())
    }
}
