// src/algorithms/working_set.rs
//
// Approximates the working-set model: a frame referenced since the
// last scan is "hot" and only a fallback candidate (class 2); a frame
// untouched for more than TAU ticks is evicted immediately (class 0);
// anything in between (class 1) is ranked by how stale it is and the
// stalest wins if no class-0 frame turns up in this pass.

use super::{occupant_pte, ReplacementAlgorithm};
use crate::frame::FrameTable;
use crate::process::Process;

/// Working-set age threshold, in ticks.
const TAU: u64 = 49;

pub struct WorkingSet {
    hand: usize,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl ReplacementAlgorithm for WorkingSet {
    fn select_victim(
        &mut self,
        frames: &mut FrameTable,
        processes: &mut [Process],
        inst_count: u64,
    ) -> usize {
        let num_frames = frames.len();
        let now = inst_count.saturating_sub(1);

        let mut class1_best: Option<(usize, u64)> = None;
        let mut class2_first: Option<usize> = None;

        for step in 0..num_frames {
            let index = (self.hand + step) % num_frames;

            let referenced = {
                let pte = occupant_pte(processes, frames, index);
                let was_referenced = pte.referenced();
                if was_referenced {
                    pte.set_referenced(false);
                }
                was_referenced
            };

            if referenced {
                frames.get_mut(index).load_tick = now;
                class2_first.get_or_insert(index);
                continue;
            }

            let load_tick = frames.get(index).load_tick;
            if now.saturating_sub(load_tick) > TAU {
                self.hand = (index + 1) % num_frames;
                return index;
            }
            if class1_best.map_or(true, |(_, best)| load_tick < best) {
                class1_best = Some((index, load_tick));
            }
        }

        let selected = class1_best
            .map(|(index, _)| index)
            .or(class2_first)
            .expect("every occupied frame is class 0, 1 or 2");
        self.hand = (selected + 1) % num_frames;
        selected
    }

    fn on_map(&mut self, frames: &mut FrameTable, frame_index: usize, inst_count: u64) {
        frames.get_mut(frame_index).load_tick = inst_count;
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
    fn stale_frame_beyond_tau_is_evicted_immediately() {
        let (mut frames, mut processes) = setup(3);
        // Frame 0 hasn't been loaded/touched since tick 0; by tick 60
        // that's 59 ticks old, past TAU=49.
        let mut ws = WorkingSet::new();
        assert_eq!(ws.select_victim(&mut frames, &mut processes, 60), 0);
    }

    #[test]
    fn referenced_frames_are_only_a_fallback() {
        let (mut frames, mut processes) = setup(2);
        processes[0].pte_mut(0).set_referenced(true);
        frames.get_mut(1).load_tick = 5;

        let mut ws = WorkingSet::new();
        // Frame 0 is class 2 (referenced), frame 1 is class 1 (stale
        // but not past TAU at tick 10) and wins as the stalest class-1.
        assert_eq!(ws.select_victim(&mut frames, &mut processes, 10), 1);
    }

    #[test]
    fn falls_back_to_class_two_when_everything_is_referenced() {
        let (mut frames, mut processes) = setup(2);
        processes[0].pte_mut(0).set_referenced(true);
        processes[0].pte_mut(1).set_referenced(true);

        let mut ws = WorkingSet::new();
        assert_eq!(ws.select_victim(&mut frames, &mut processes, 10), 0);
    }
}
