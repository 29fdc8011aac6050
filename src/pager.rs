// src/pager.rs
//
// Owns the frame table, the free pool and the replacement algorithm
// for the whole run — the same "one owner for the whole object's
// lifetime" shape as the teacher's `AddressSpace` owning a page table,
// just reused across every process instead of one per process. Exposes
// the three primitives the dispatcher's fault protocol is built from:
// `get_frame`, `map`, `unmap`.

use crate::algorithms::ReplacementAlgorithm;
use crate::frame::{FrameTable, FreeFramePool};
use crate::process::Process;
use crate::stats::{CostAccumulator, ProcessOp};

pub struct Pager {
    frames: FrameTable,
    free_pool: FreeFramePool,
    algorithm: Box<dyn ReplacementAlgorithm>,
}

impl Pager {
    pub fn new(num_frames: usize, algorithm: Box<dyn ReplacementAlgorithm>) -> Self {
        Self {
            frames: FrameTable::new(num_frames),
            free_pool: FreeFramePool::new(num_frames),
            algorithm,
        }
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Free-pool head if any; otherwise a victim chosen by the active
    /// algorithm. A victim frame still carries its live occupant — the
    /// caller must `unmap` it before `map`-ing the faulter in. The
    /// returned flag is `true` when the algorithm actually ran (used to
    /// drive the `a` option's ASELECT diagnostic).
    pub fn get_frame(&mut self, processes: &mut [Process], inst_count: u64) -> (usize, bool) {
        match self.free_pool.pop() {
            Some(index) => (index, false),
            None => (
                self.algorithm.select_victim(&mut self.frames, processes, inst_count),
                true,
            ),
        }
    }

    /// Map `(pid, vpage)` into `frame_index`. Preconditions: the frame
    /// has no live occupant, and `PTE[vpage]` is `EXISTS=1, PRESENT=0`.
    pub fn map(
        &mut self,
        processes: &mut [Process],
        cost: &mut CostAccumulator,
        pid: usize,
        vpage: usize,
        frame_index: usize,
        inst_count: u64,
        trace: bool,
    ) {
        cost.charge_process(&mut processes[pid].stats, ProcessOp::Map);

        let pte = processes[pid].pte_mut(vpage);
        let was_filemapped = pte.filemapped();
        let was_pagedout = pte.pagedout();
        pte.set_frame_number(frame_index as u8);
        pte.set_present(true);
        pte.set_referenced(true);

        if was_filemapped {
            cost.charge_process(&mut processes[pid].stats, ProcessOp::Fin);
            if trace {
                println!(" FIN");
            }
        } else if was_pagedout {
            cost.charge_process(&mut processes[pid].stats, ProcessOp::In);
            if trace {
                println!(" IN");
            }
        } else {
            cost.charge_process(&mut processes[pid].stats, ProcessOp::Zero);
            if trace {
                println!(" ZERO");
            }
        }

        self.frames.get_mut(frame_index).set_occupant(pid, vpage);
        self.algorithm.on_map(&mut self.frames, frame_index, inst_count);

        if trace {
            println!(" MAP {frame_index}");
        }
    }

    /// Unmap whatever is currently mapped into `frame_index`.
    ///
    /// `on_exit = false` is the ordinary path (victim eviction during a
    /// fault): the frame is left occupied-but-stale for the caller's
    /// immediate `map`, and never touches the free pool. `on_exit =
    /// true` additionally returns the frame to the free pool, and a
    /// dirty anonymous page gets no `OUT` at all on this path — only a
    /// dirty filemapped page still gets `FOUT`. The process is dying,
    /// so its swap contents are simply dropped rather than written
    /// back; `PAGEDOUT` never gets set in the first place here.
    pub fn unmap(
        &mut self,
        processes: &mut [Process],
        cost: &mut CostAccumulator,
        frame_index: usize,
        on_exit: bool,
        trace: bool,
    ) {
        let occupant = self
            .frames
            .get(frame_index)
            .occupant()
            .expect("unmap requires a frame with a live occupant");

        cost.charge_process(&mut processes[occupant.pid].stats, ProcessOp::Unmap);
        if trace {
            println!(" UNMAP {}:{}", occupant.pid, occupant.vpage);
        }

        let pte = processes[occupant.pid].pte_mut(occupant.vpage);
        if pte.modified() {
            if pte.filemapped() {
                cost.charge_process(&mut processes[occupant.pid].stats, ProcessOp::Fout);
                if trace {
                    println!(" FOUT");
                }
            } else if !on_exit {
                // A dirty anonymous page evicted on exit is simply
                // dropped: the process is dying, so there is nothing
                // left to write the swap contents back for.
                cost.charge_process(&mut processes[occupant.pid].stats, ProcessOp::Out);
                processes[occupant.pid].pte_mut(occupant.vpage).set_pagedout(true);
                if trace {
                    println!(" OUT");
                }
            }
            processes[occupant.pid].pte_mut(occupant.vpage).set_modified(false);
        }

        let pte = processes[occupant.pid].pte_mut(occupant.vpage);
        if on_exit {
            pte.set_pagedout(false);
        }
        pte.set_present(false);

        self.frames.get_mut(frame_index).clear_occupant();
        if on_exit {
            self.free_pool.push(frame_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{build, AlgorithmKind};
    use crate::stats::CostAccumulator;

    fn pager(num_frames: usize) -> Pager {
        Pager::new(num_frames, build(AlgorithmKind::Fifo, vec![]))
    }

    #[test]
    fn get_frame_drains_free_pool_before_asking_the_algorithm() {
        let mut pager = pager(2);
        let mut processes = vec![Process::new(0)];
        assert_eq!(pager.get_frame(&mut processes, 0), (0, false));
        assert_eq!(pager.get_frame(&mut processes, 0), (1, false));
        // Pool exhausted: FIFO hands back frame 0 (its own hand starts at 0).
        assert_eq!(pager.get_frame(&mut processes, 0), (0, true));
    }

    #[test]
    fn map_charges_zero_on_first_touch_and_in_after_pageout() {
        let mut pager = pager(1);
        let mut processes = vec![Process::new(0)];
        let mut cost = CostAccumulator::default();
        processes[0].pte_mut(3).lazy_init(false, false);

        pager.map(&mut processes, &mut cost, 0, 3, 0, 1, false);
        assert_eq!(processes[0].stats.zeros, 1);
        assert_eq!(processes[0].stats.maps, 1);
        assert!(processes[0].pte(3).present());
        assert!(processes[0].pte(3).referenced());

        pager.unmap(&mut processes, &mut cost, 0, false, false);
        processes[0].pte_mut(3).set_pagedout(true); // simulate a prior OUT
        pager.map(&mut processes, &mut cost, 0, 3, 0, 2, false);
        assert_eq!(processes[0].stats.ins, 1);
    }

    #[test]
    fn unmap_writes_back_only_when_modified() {
        let mut pager = pager(1);
        let mut processes = vec![Process::new(0)];
        let mut cost = CostAccumulator::default();
        processes[0].pte_mut(0).lazy_init(false, false);
        pager.map(&mut processes, &mut cost, 0, 0, 0, 0, false);

        pager.unmap(&mut processes, &mut cost, 0, false, false);
        assert_eq!(processes[0].stats.outs, 0);
        assert!(!processes[0].pte(0).present());
    }

    #[test]
    fn modified_anonymous_unmap_sets_pagedout_and_charges_out() {
        let mut pager = pager(1);
        let mut processes = vec![Process::new(0)];
        let mut cost = CostAccumulator::default();
        processes[0].pte_mut(0).lazy_init(false, false);
        pager.map(&mut processes, &mut cost, 0, 0, 0, 0, false);
        processes[0].pte_mut(0).set_modified(true);

        pager.unmap(&mut processes, &mut cost, 0, false, false);
        assert_eq!(processes[0].stats.outs, 1);
        assert!(processes[0].pte(0).pagedout());
        assert!(!processes[0].pte(0).modified());
    }

    #[test]
    fn on_exit_unmap_drops_pagedout_and_frees_the_frame() {
        let mut pager = pager(1);
        let mut processes = vec![Process::new(0)];
        let mut cost = CostAccumulator::default();
        processes[0].pte_mut(0).lazy_init(false, false);
        pager.map(&mut processes, &mut cost, 0, 0, 0, 0, false);
        processes[0].pte_mut(0).set_modified(true);

        pager.unmap(&mut processes, &mut cost, 0, true, false);
        assert!(!processes[0].pte(0).pagedout());
        assert_eq!(pager.get_frame(&mut processes, 0), (0, false));
    }

    #[test]
    fn dirty_anonymous_page_evicted_on_exit_gets_no_out() {
        // Ground truth: des_mmu.cpp drops a dying process's dirty
        // anonymous pages outright — no OUT, no PAGEDOUT — since
        // there is nobody left to read the swapped-out copy back.
        let mut pager = pager(1);
        let mut processes = vec![Process::new(0)];
        let mut cost = CostAccumulator::default();
        processes[0].pte_mut(0).lazy_init(false, false);
        pager.map(&mut processes, &mut cost, 0, 0, 0, 0, false);
        processes[0].pte_mut(0).set_modified(true);

        pager.unmap(&mut processes, &mut cost, 0, true, false);
        assert_eq!(processes[0].stats.outs, 0);
        assert!(!processes[0].pte(0).pagedout());
        assert!(!processes[0].pte(0).modified());
    }

    #[test]
    fn dirty_filemapped_page_evicted_on_exit_still_gets_fout() {
        let mut pager = pager(1);
        let mut processes = vec![Process::new(0)];
        let mut cost = CostAccumulator::default();
        processes[0].pte_mut(0).lazy_init(false, true);
        pager.map(&mut processes, &mut cost, 0, 0, 0, 0, false);
        processes[0].pte_mut(0).set_modified(true);

        pager.unmap(&mut processes, &mut cost, 0, true, false);
        assert_eq!(processes[0].stats.fouts, 1);
        assert_eq!(processes[0].stats.outs, 0);
        assert!(!processes[0].pte(0).modified());
    }
}
