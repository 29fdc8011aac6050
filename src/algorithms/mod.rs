// src/algorithms/mod.rs
//
// Six replacement strategies behind one trait, the same shape as the
// teacher's `FrameAllocator` trait: several concrete allocators
// (`BootInfoFrameAllocator`, `BuddyFrameAllocator`) implementing one
// `allocate_frame` method, picked by whichever caller needs frames.
// Here the pager holds exactly one `Box<dyn ReplacementAlgorithm>`,
// chosen once at startup from the `-a` letter.

mod aging;
mod clock;
mod fifo;
mod nru;
mod random;
mod working_set;

use crate::error::{SimError, SimResult};
use crate::frame::FrameTable;
use crate::process::Process;
use crate::rand_source::RandomSource;

/// Which of the six algorithms a run was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    Fifo,
    Random,
    Clock,
    Nru,
    Aging,
    WorkingSet,
}

impl AlgorithmKind {
    pub fn from_letter(letter: char) -> SimResult<Self> {
        match letter.to_ascii_uppercase() {
            'F' => Ok(AlgorithmKind::Fifo),
            'R' => Ok(AlgorithmKind::Random),
            'C' => Ok(AlgorithmKind::Clock),
            'E' => Ok(AlgorithmKind::Nru),
            'A' => Ok(AlgorithmKind::Aging),
            'W' => Ok(AlgorithmKind::WorkingSet),
            _ => Err(SimError::UnknownAlgorithm(letter)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Fifo => "FIFO",
            AlgorithmKind::Random => "Random",
            AlgorithmKind::Clock => "Clock",
            AlgorithmKind::Nru => "ESC_NRU",
            AlgorithmKind::Aging => "Aging",
            AlgorithmKind::WorkingSet => "Working_Set",
        }
    }
}

/// Common interface every replacement strategy exposes to the pager.
/// `select_victim` is the only operation the pager calls when the
/// free pool is exhausted; `on_map` is a hook so Aging/Working-Set can
/// reset per-frame scratch state the moment a frame is (re)used.
pub trait ReplacementAlgorithm {
    /// Choose a frame to evict. Called only when the free pool is
    /// empty, so every frame in `frames` is occupied.
    fn select_victim(
        &mut self,
        frames: &mut FrameTable,
        processes: &mut [Process],
        inst_count: u64,
    ) -> usize;

    /// Notify the algorithm that `frame_index` was just mapped, so it
    /// can reset whatever per-frame scratch state it keeps (Aging's
    /// `age`, Working-Set's `load_tick`). No-op for algorithms that
    /// keep no such state.
    fn on_map(&mut self, _frames: &mut FrameTable, _frame_index: usize, _inst_count: u64) {}
}

/// Build the algorithm selected by `kind`. `rand_values` is only
/// consumed by `Random`; the other five ignore it.
pub fn build(kind: AlgorithmKind, rand_values: Vec<u32>) -> Box<dyn ReplacementAlgorithm> {
    match kind {
        AlgorithmKind::Fifo => Box::new(fifo::Fifo::new()),
        AlgorithmKind::Random => Box::new(random::Random::new(RandomSource::new(rand_values))),
        AlgorithmKind::Clock => Box::new(clock::Clock::new()),
        AlgorithmKind::Nru => Box::new(nru::Nru::new()),
        AlgorithmKind::Aging => Box::new(aging::Aging::new()),
        AlgorithmKind::WorkingSet => Box::new(working_set::WorkingSet::new()),
    }
}

/// Fetch the PTE belonging to a frame's current occupant. Only valid
/// to call on a frame that `select_victim` is considering, which is
/// always occupied (the pager only calls into the algorithm when the
/// free pool is empty).
pub(crate) fn occupant_pte<'a>(
    processes: &'a mut [Process],
    frames: &FrameTable,
    frame_index: usize,
) -> &'a mut crate::pte::Pte {
    let occupant = frames
        .get(frame_index)
        .occupant()
        .expect("select_victim only scans occupied frames");
    processes[occupant.pid].pte_mut(occupant.vpage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_parsing_is_case_insensitive_and_total() {
        for (letter, kind) in [
            ('f', AlgorithmKind::Fifo),
            ('R', AlgorithmKind::Random),
            ('c', AlgorithmKind::Clock),
            ('E', AlgorithmKind::Nru),
            ('a', AlgorithmKind::Aging),
            ('W', AlgorithmKind::WorkingSet),
        ] {
            assert_eq!(AlgorithmKind::from_letter(letter).unwrap(), kind);
        }
        assert!(AlgorithmKind::from_letter('q').is_err());
    }
}
