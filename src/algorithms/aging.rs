// src/algorithms/aging.rs
//
// Approximates LRU with a 32-bit "age" shift register per frame: every
// selection pass ages every frame's register right by one bit, OR-ing
// in the top bit for frames that were referenced since the last pass.
// The frame with the smallest age — the one referenced longest ago,
// if ever — is evicted. No `hand`-skip on reference like Clock/NRU:
// every frame is visited, every pass.

use super::{occupant_pte, ReplacementAlgorithm};
use crate::frame::FrameTable;
use crate::process::Process;

const TOP_BIT: u32 = 0x8000_0000;

pub struct Aging {
    hand: usize,
}

impl Aging {
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl ReplacementAlgorithm for Aging {
    fn select_victim(
        &mut self,
        frames: &mut FrameTable,
        processes: &mut [Process],
        _inst_count: u64,
    ) -> usize {
        let num_frames = frames.len();
        let mut best: Option<(usize, u32)> = None;

        for step in 0..num_frames {
            let index = (self.hand + step) % num_frames;

            let referenced = {
                let pte = occupant_pte(processes, frames, index);
                let was_referenced = pte.referenced();
                pte.set_referenced(false);
                was_referenced
            };

            let frame = frames.get_mut(index);
            frame.age >>= 1;
            if referenced {
                frame.age |= TOP_BIT;
            }

            if best.map_or(true, |(_, best_age)| frame.age < best_age) {
                best = Some((index, frame.age));
            }
        }

        let (selected, _) = best.expect("every occupied frame produces an age");
        self.hand = (selected + 1) % num_frames;
        selected
    }

    fn on_map(&mut self, frames: &mut FrameTable, frame_index: usize, _inst_count: u64) {
        frames.get_mut(frame_index).age = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    fn setup(num_frames: usize) -> (FrameTable, Vec<Process>) {
        let mut frames = FrameTable::new(num_frames);
        let mut processes = vec![Process::new(0)];
        for i in 0..num_frames {
            frames.get_mut(i).set_occupant(0, i);
            processes[0].pte_mut(i).lazy_init(false, false);
            processes[0].pte_mut(i).set_present(true);
        }
        (frames, processes)
    }

    #[test]
    fn unreferenced_frames_decay_to_zero_and_get_evicted_first() {
        let (mut frames, mut processes) = setup(3);
        let mut aging = Aging::new();
        // No referenced bits set anywhere: every age stays 0, frame 0
        // (first in scan order) wins ties.
        assert_eq!(aging.select_victim(&mut frames, &mut processes, 0), 0);
    }

    #[test]
    fn recently_referenced_frame_outlives_a_stale_one() {
        let (mut frames, mut processes) = setup(2);
        processes[0].pte_mut(0).set_referenced(true);

        let mut aging = Aging::new();
        // Frame 0 ages to 0x8000_0000, frame 1 ages to 0. Frame 1 is smaller.
        assert_eq!(aging.select_victim(&mut frames, &mut processes, 0), 1);
        assert_eq!(frames.get(0).age, TOP_BIT);
        assert_eq!(frames.get(1).age, 0);
    }
}
