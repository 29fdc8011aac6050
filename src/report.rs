// src/report.rs
//
// All stdout rendering lives here, kept deliberately dumb: every
// function takes already-computed state and writes one line in the
// exact wire format the output comparisons expect. Nothing here
// mutates simulation state or makes a decision about whether to run —
// that's the dispatcher's job, gated by `OutputOptions`.

use crate::frame::FrameTable;
use crate::input::Op;
use crate::process::Process;
use crate::pte::SIZEOF_PTE;
use crate::stats::ProcessStats;

pub fn print_instruction_line(n: u64, op: Op, arg: usize) {
    let letter = op_letter(op);
    if op == Op::Exit {
        println!("{n}: ==> {letter}");
    } else {
        println!("{n}: ==> {letter} {arg}");
    }
}

fn op_letter(op: Op) -> char {
    match op {
        Op::Ctx => 'c',
        Op::Read => 'r',
        Op::Write => 'w',
        Op::Exit => 'e',
    }
}

pub fn print_aselect(frame_index: usize) {
    println!("ASELECT {frame_index}");
}

pub fn print_page_table(pid: usize, process: &Process) {
    print!("PT[{pid}]:");
    for (vpage, pte) in process.iter_ptes() {
        print!(" {}", pte.status_token(vpage));
    }
    println!();
}

pub fn print_all_page_tables(processes: &[Process]) {
    for process in processes {
        print_page_table(process.pid, process);
    }
}

pub fn print_frame_table(frames: &FrameTable) {
    print!("FT:");
    for frame in frames.iter() {
        match frame.occupant() {
            Some(occupant) => print!(" {}:{}", occupant.pid, occupant.vpage),
            None => print!(" *"),
        }
    }
    println!();
}

pub fn print_process_stats(pid: usize, stats: &ProcessStats) {
    println!(
        "PROC[{pid}]: U={} M={} I={} O={} FI={} FO={} Z={} SV={} SP={}",
        stats.unmaps,
        stats.maps,
        stats.ins,
        stats.outs,
        stats.fins,
        stats.fouts,
        stats.zeros,
        stats.segv,
        stats.segprot,
    );
}

pub fn print_total_cost(inst_count: u64, ctx_switches: u64, proc_exits: u64, total_cost: u64) {
    println!("TOTALCOST {inst_count} {ctx_switches} {proc_exits} {total_cost} {SIZEOF_PTE}");
}
