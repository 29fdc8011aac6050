// src/vma.rs
//
// Virtual Memory Areas — the legal virtual address ranges for one
// process. Used by the fault handler to decide, on first touch,
// whether an access is legitimate (and what protection/backing to
// copy into the PTE) or a SEGV.
//
// Adapted from a kernel-side VMA table that lived behind a global
// Mutex indexed by PID: here each `Process` owns its `VmaList`
// directly, since the whole simulator is single-threaded and one
// `Process` is never touched by more than one logical owner at a time.

/// Maximum VMAs a single process may register. The spec's 64-entry
/// address space leaves little room for more than a handful.
const MAX_VMAS_PER_PROCESS: usize = 16;

/// A single virtual memory area: a contiguous, inclusive range of
/// virtual pages with uniform protection and backing.
#[derive(Debug, Clone, Copy)]
pub struct Vma {
    pub start_vpage: usize,
    pub end_vpage: usize,
    pub write_protect: bool,
    pub file_mapped: bool,
}

impl Vma {
    #[inline]
    pub fn contains(&self, vpage: usize) -> bool {
        vpage >= self.start_vpage && vpage <= self.end_vpage
    }
}

/// Per-process, fixed-capacity, non-overlapping list of VMAs.
/// Immutable after load.
#[derive(Debug, Default)]
pub struct VmaList {
    entries: Vec<Vma>,
}

impl VmaList {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_VMAS_PER_PROCESS),
        }
    }

    /// Register a VMA loaded from the input file. Returns an error if
    /// the process already has the maximum number of VMAs.
    pub fn add(&mut self, vma: Vma) -> Result<(), &'static str> {
        if self.entries.len() >= MAX_VMAS_PER_PROCESS {
            return Err("VMA list full");
        }
        self.entries.push(vma);
        Ok(())
    }

    /// Find the VMA containing `vpage`, if any. A page is legal iff
    /// this returns `Some` (or its PTE already has `EXISTS` set).
    pub fn find(&self, vpage: usize) -> Option<&Vma> {
        self.entries.iter().find(|vma| vma.contains(vpage))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vma> {
        self.entries.iter()
    }
}
