// src/process.rs
//
// A process groups its page table and its VMA list into one unit,
// the same way the teacher's `AddressSpace` grouped a page table and
// VMAs without depending on a PID-indexed global table. Statistics
// live here too: each process owns its own operation counters, and
// nothing outside the dispatcher/pager ever mutates another process's
// `Process`.

use crate::pte::Pte;
use crate::stats::ProcessStats;
use crate::vma::{Vma, VmaList};

/// Virtual address spaces are a fixed 64 entries.
pub const NUM_PTE: usize = 64;

pub struct Process {
    pub pid: usize,
    page_table: [Pte; NUM_PTE],
    vmas: VmaList,
    pub stats: ProcessStats,
}

impl Process {
    pub fn new(pid: usize) -> Self {
        Self {
            pid,
            page_table: [Pte::new(); NUM_PTE],
            vmas: VmaList::new(),
            stats: ProcessStats::default(),
        }
    }

    pub fn add_vma(&mut self, vma: Vma) -> Result<(), &'static str> {
        self.vmas.add(vma)
    }

    pub fn find_vma(&self, vpage: usize) -> Option<&Vma> {
        self.vmas.find(vpage)
    }

    #[inline]
    pub fn pte(&self, vpage: usize) -> &Pte {
        &self.page_table[vpage]
    }

    #[inline]
    pub fn pte_mut(&mut self, vpage: usize) -> &mut Pte {
        &mut self.page_table[vpage]
    }

    pub fn iter_ptes(&self) -> impl Iterator<Item = (usize, &Pte)> {
        self.page_table.iter().enumerate()
    }
}
