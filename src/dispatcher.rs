// src/dispatcher.rs
//
// Drives the instruction trace to exhaustion. Grounded on the teacher's
// page_fault_handler (kernel/src/init/devices.rs): pre-filter the
// access, resolve the backing VMA, hand the fault to the pager, and
// only fall back to a hard failure (SEGV here, `kill_current_user_process`
// there) when no VMA covers the address. Unlike the teacher's handler,
// which only ever runs off a hardware trap, this one is driven
// synchronously by `run` — there is exactly one caller and no
// concurrent process to interleave with.

use tracing::{debug, trace};

use crate::cli::OutputOptions;
use crate::input::{Instruction, Op};
use crate::pager::Pager;
use crate::process::Process;
use crate::report;
use crate::stats::{CostAccumulator, GlobalOp, ProcessOp};

/// Final tallies the CLI front door needs once the trace is exhausted.
pub struct RunSummary {
    pub inst_count: u64,
    pub ctx_switches: u64,
    pub proc_exits: u64,
}

pub struct Dispatcher {
    processes: Vec<Process>,
    pager: Pager,
    cost: CostAccumulator,
    options: OutputOptions,
    current_process: Option<usize>,
    inst_count: u64,
    ctx_switches: u64,
    proc_exits: u64,
}

impl Dispatcher {
    pub fn new(processes: Vec<Process>, pager: Pager, options: OutputOptions) -> Self {
        Self {
            processes,
            pager,
            cost: CostAccumulator::default(),
            options,
            current_process: None,
            inst_count: 0,
            ctx_switches: 0,
            proc_exits: 0,
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn cost(&self) -> &CostAccumulator {
        &self.cost
    }

    /// Replay every instruction in order, rendering whichever per-run
    /// and per-instruction reports `options` selected.
    pub fn run(&mut self, instructions: &[Instruction]) -> RunSummary {
        for instruction in instructions {
            self.dispatch(instruction);
            self.maybe_report_after_instruction();
        }

        RunSummary {
            inst_count: self.inst_count,
            ctx_switches: self.ctx_switches,
            proc_exits: self.proc_exits,
        }
    }

    fn dispatch(&mut self, instruction: &Instruction) {
        self.inst_count += 1;
        if self.options.trace {
            report::print_instruction_line(self.inst_count, instruction.op, instruction.arg);
        }

        match instruction.op {
            Op::Ctx => self.handle_ctx(instruction.arg),
            Op::Exit => self.handle_exit(),
            Op::Read => self.handle_read(instruction.arg),
            Op::Write => self.handle_write(instruction.arg),
        }
    }

    fn handle_ctx(&mut self, pid: usize) {
        trace!(pid, "context switch");
        self.current_process = Some(pid);
        self.ctx_switches += 1;
        self.cost.charge_global(GlobalOp::ContextSwitch);
    }

    fn handle_exit(&mut self) {
        let pid = self.current_pid();
        debug!(pid, "process exit");

        for vpage in 0..crate::process::NUM_PTE {
            if self.processes[pid].pte(vpage).present() {
                let frame_index = self.processes[pid].pte(vpage).frame_number() as usize;
                self.pager
                    .unmap(&mut self.processes, &mut self.cost, frame_index, true, self.options.trace);
            }
        }
        for vpage in 0..crate::process::NUM_PTE {
            let pte = self.processes[pid].pte_mut(vpage);
            if pte.exists() {
                pte.set_pagedout(false);
                pte.set_present(false);
            }
        }

        self.proc_exits += 1;
        self.cost.charge_global(GlobalOp::ProcessExit);
    }

    fn handle_read(&mut self, vpage: usize) {
        self.cost.charge_global(GlobalOp::ReadWrite);
        let pid = self.current_pid();
        if self.access(pid, vpage) {
            self.processes[pid].pte_mut(vpage).set_referenced(true);
        }
    }

    fn handle_write(&mut self, vpage: usize) {
        self.cost.charge_global(GlobalOp::ReadWrite);
        let pid = self.current_pid();
        if !self.access(pid, vpage) {
            return;
        }
        if self.processes[pid].pte(vpage).write_protect() {
            self.cost
                .charge_process(&mut self.processes[pid].stats, ProcessOp::Segprot);
            if self.options.trace {
                println!(" SEGPROT");
            }
        } else {
            self.processes[pid].pte_mut(vpage).set_modified(true);
        }
        self.processes[pid].pte_mut(vpage).set_referenced(true);
    }

    /// The page-fault protocol of §4.1: resolve legality, borrow a
    /// frame, evict its current occupant if any, then map the faulter
    /// in. Returns whether the access may proceed (false only on SEGV).
    fn access(&mut self, pid: usize, vpage: usize) -> bool {
        if self.processes[pid].pte(vpage).present() {
            return true;
        }

        if !self.processes[pid].pte(vpage).exists() {
            match self.processes[pid].find_vma(vpage).copied() {
                Some(vma) => self
                    .processes[pid]
                    .pte_mut(vpage)
                    .lazy_init(vma.write_protect, vma.file_mapped),
                None => {
                    self.cost
                        .charge_process(&mut self.processes[pid].stats, ProcessOp::Segv);
                    if self.options.trace {
                        println!(" SEGV");
                    }
                    return false;
                }
            }
        }

        let (frame_index, algorithm_ran) = self.pager.get_frame(&mut self.processes, self.inst_count);
        if algorithm_ran && self.options.algorithm_diag {
            report::print_aselect(frame_index);
        }
        if self.pager.frames().get(frame_index).occupant().is_some() {
            self.pager
                .unmap(&mut self.processes, &mut self.cost, frame_index, false, self.options.trace);
        }
        self.pager.map(
            &mut self.processes,
            &mut self.cost,
            pid,
            vpage,
            frame_index,
            self.inst_count,
            self.options.trace,
        );
        true
    }

    fn current_pid(&self) -> usize {
        self.current_process
            .expect("dispatcher invariant: a well-formed trace always `c`s before r/w/e")
    }

    fn maybe_report_after_instruction(&self) {
        if self.options.page_table_current_each {
            if let Some(pid) = self.current_process {
                report::print_page_table(pid, &self.processes[pid]);
            }
        }
        if self.options.page_table_all_each {
            report::print_all_page_tables(&self.processes);
        }
        if self.options.frame_table_each {
            report::print_frame_table(self.pager.frames());
        }
    }
}
