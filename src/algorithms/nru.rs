// src/algorithms/nru.rs
//
// Enhanced second-chance (NRU): one pass over every frame starting at
// `hand`, bucketing each by (REFERENCED, MODIFIED) into class 0..3 and
// remembering only the first frame seen in each class. The lowest
// populated class wins. Every 50 ticks the same pass also resets every
// visited frame's REFERENCED bit — which means a pending reset forces
// the scan to run to completion even after a class-0 frame is found,
// since an early return would leave the rest of the table un-aged.

use super::{occupant_pte, ReplacementAlgorithm};
use crate::frame::FrameTable;
use crate::process::Process;

const RESET_INTERVAL: u64 = 50;

pub struct Nru {
    hand: usize,
    last_reset: u64,
}

impl Nru {
    pub fn new() -> Self {
        Self {
            hand: 0,
            last_reset: 0,
        }
    }
}

impl ReplacementAlgorithm for Nru {
    fn select_victim(
        &mut self,
        frames: &mut FrameTable,
        processes: &mut [Process],
        inst_count: u64,
    ) -> usize {
        let num_frames = frames.len();
        let do_reset = inst_count.saturating_sub(self.last_reset) >= RESET_INTERVAL;

        let mut candidates: [Option<usize>; 4] = [None; 4];
        for step in 0..num_frames {
            let index = (self.hand + step) % num_frames;
            let pte = occupant_pte(processes, frames, index);
            let class = (pte.referenced() as usize) * 2 + pte.modified() as usize;
            if candidates[class].is_none() {
                candidates[class] = Some(index);
            }
            if do_reset {
                pte.set_referenced(false);
            } else if class == 0 {
                break;
            }
        }

        if do_reset {
            self.last_reset = inst_count;
        }

        let selected = candidates
            .into_iter()
            .flatten()
            .next()
            .expect("every occupied frame falls into some class");
        self.hand = (selected + 1) % num_frames;
        selected
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
    fn prefers_lowest_populated_class() {
        let (mut frames, mut processes) = setup(3);
        // frame 0: R=1 M=1 (class3), frame 1: R=1 M=0 (class2), frame 2: R=0 M=1 (class1)
        processes[0].pte_mut(0).set_referenced(true);
        processes[0].pte_mut(0).set_modified(true);
        processes[0].pte_mut(1).set_referenced(true);
        processes[0].pte_mut(2).set_modified(true);

        let mut nru = Nru::new();
        assert_eq!(nru.select_victim(&mut frames, &mut processes, 0), 2);
    }

    #[test]
    fn class_zero_short_circuits_without_pending_reset() {
        let (mut frames, mut processes) = setup(3);
        // frame 0 class3, frame 1 class0 (R=0,M=0) -> should stop scanning at frame 1
        processes[0].pte_mut(0).set_referenced(true);
        processes[0].pte_mut(0).set_modified(true);
        processes[0].pte_mut(2).set_referenced(true);

        let mut nru = Nru::new();
        assert_eq!(nru.select_victim(&mut frames, &mut processes, 10), 1);
        // Frame 2, never visited (scan broke at frame 1), keeps its REFERENCED bit.
        assert!(processes[0].pte(2).referenced());
    }

    #[test]
    fn pending_reset_clears_referenced_on_every_visited_frame() {
        let (mut frames, mut processes) = setup(3);
        for i in 0..3 {
            processes[0].pte_mut(i).set_referenced(true);
        }

        let mut nru = Nru::new();
        // inst_count - last_reset(0) >= 50 forces a full-table reset.
        nru.select_victim(&mut frames, &mut processes, 50);
        for i in 0..3 {
            assert!(!processes[0].pte(i).referenced());
        }
    }
}
