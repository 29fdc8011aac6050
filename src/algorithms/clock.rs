// src/algorithms/clock.rs
//
// Second-chance: walk the ring from `hand`, giving every referenced
// frame one more lap (clearing REFERENCED as it goes) before settling
// on the first frame found with REFERENCED already 0. Because every
// visited frame's bit gets cleared, the scan is guaranteed to
// terminate within one lap past wherever it started.

use super::{occupant_pte, ReplacementAlgorithm};
use crate::frame::FrameTable;
use crate::process::Process;

pub struct Clock {
    hand: usize,
}

impl Clock {
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl ReplacementAlgorithm for Clock {
    fn select_victim(
        &mut self,
        frames: &mut FrameTable,
        processes: &mut [Process],
        _inst_count: u64,
    ) -> usize {
        let num_frames = frames.len();
        loop {
            let candidate = self.hand;
            let pte = occupant_pte(processes, frames, candidate);
            if pte.referenced() {
                pte.set_referenced(false);
                self.hand = (self.hand + 1) % num_frames;
            } else {
                self.hand = (candidate + 1) % num_frames;
                return candidate;
            }
        }
    }
}
