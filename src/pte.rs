// src/pte.rs
//
// Page table entry. The original systems-C design bit-packs every
// field (including a 7-bit frame number) into a 32-bit word; we get
// the same reporting contract — `sizeof_pte` is always 4 — without
// committing to manual bit twiddling for every accessor. The boolean
// flags live in one bitflags word, the frame number next to it.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PteFlags: u8 {
        const PRESENT       = 0b0000_0001;
        const REFERENCED    = 0b0000_0010;
        const MODIFIED      = 0b0000_0100;
        const WRITE_PROTECT = 0b0000_1000;
        const PAGEDOUT      = 0b0001_0000;
        const FILEMAPPED    = 0b0010_0000;
        /// Lazy-init sentinel: distinguishes "never touched" from
        /// "touched and all other bits happen to be zero".
        const EXISTS        = 0b0100_0000;
    }
}

/// Reported size of a PTE regardless of the in-memory representation
/// actually used (see DESIGN.md).
pub const SIZEOF_PTE: u32 = 4;

/// A single virtual page's metadata. Conceptually zero-initialised:
/// `flags` starts empty and `EXISTS` is set on first fault, at which
/// point `write_protect`/`file_mapped` are copied from the covering
/// VMA and never change again.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pte {
    flags: PteFlags,
    frame_number: u8,
}

impl Pte {
    pub const fn new() -> Self {
        Self {
            flags: PteFlags::empty(),
            frame_number: 0,
        }
    }

    #[inline]
    pub fn exists(&self) -> bool {
        self.flags.contains(PteFlags::EXISTS)
    }

    #[inline]
    pub fn present(&self) -> bool {
        self.flags.contains(PteFlags::PRESENT)
    }

    #[inline]
    pub fn referenced(&self) -> bool {
        self.flags.contains(PteFlags::REFERENCED)
    }

    #[inline]
    pub fn modified(&self) -> bool {
        self.flags.contains(PteFlags::MODIFIED)
    }

    #[inline]
    pub fn write_protect(&self) -> bool {
        self.flags.contains(PteFlags::WRITE_PROTECT)
    }

    #[inline]
    pub fn pagedout(&self) -> bool {
        self.flags.contains(PteFlags::PAGEDOUT)
    }

    #[inline]
    pub fn filemapped(&self) -> bool {
        self.flags.contains(PteFlags::FILEMAPPED)
    }

    #[inline]
    pub fn frame_number(&self) -> u8 {
        self.frame_number
    }

    #[inline]
    pub fn set_referenced(&mut self, value: bool) {
        self.flags.set(PteFlags::REFERENCED, value);
    }

    #[inline]
    pub fn set_modified(&mut self, value: bool) {
        self.flags.set(PteFlags::MODIFIED, value);
    }

    #[inline]
    pub fn set_present(&mut self, value: bool) {
        self.flags.set(PteFlags::PRESENT, value);
    }

    #[inline]
    pub fn set_pagedout(&mut self, value: bool) {
        self.flags.set(PteFlags::PAGEDOUT, value);
    }

    #[inline]
    pub fn set_frame_number(&mut self, frame: u8) {
        self.frame_number = frame;
    }

    /// Lazily initialise this PTE from the VMA that covers it. No-op if
    /// already initialised; `write_protect`/`file_mapped` are fixed for
    /// the lifetime of the PTE from here on.
    pub fn lazy_init(&mut self, write_protect: bool, file_mapped: bool) {
        if self.exists() {
            return;
        }
        self.flags.insert(PteFlags::EXISTS);
        self.flags.set(PteFlags::WRITE_PROTECT, write_protect);
        self.flags.set(PteFlags::FILEMAPPED, file_mapped);
    }

    /// `vp:RMS` (with `-` for unset bits) if present, `#` if paged out
    /// but not present, `*` otherwise. Used by the page-table report.
    pub fn status_token(&self, vpage: usize) -> String {
        if self.present() {
            let r = if self.referenced() { 'R' } else { '-' };
            let m = if self.modified() { 'M' } else { '-' };
            let s = if self.pagedout() { 'S' } else { '-' };
            format!("{vpage}:{r}{m}{s}")
        } else if self.pagedout() {
            "#".to_string()
        } else {
            "*".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pte_does_not_exist() {
        let pte = Pte::new();
        assert!(!pte.exists());
        assert!(!pte.present());
    }

    #[test]
    fn lazy_init_is_idempotent() {
        let mut pte = Pte::new();
        pte.lazy_init(true, false);
        assert!(pte.write_protect());
        assert!(!pte.filemapped());

        // A second lazy_init (e.g. a later fault on the same vpage)
        // must not flip write_protect/file_mapped again.
        pte.lazy_init(false, true);
        assert!(pte.write_protect());
        assert!(!pte.filemapped());
    }

    #[test]
    fn status_token_present_vs_pagedout_vs_absent() {
        let mut pte = Pte::new();
        assert_eq!(pte.status_token(3), "*");

        pte.lazy_init(false, false);
        pte.set_pagedout(true);
        assert_eq!(pte.status_token(3), "#");

        pte.set_present(true);
        pte.set_referenced(true);
        assert_eq!(pte.status_token(3), "3:R-S");
    }
}
