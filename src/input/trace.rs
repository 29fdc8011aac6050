// src/input/trace.rs
//
// Parses the input file: process count, each process's VMAs, then the
// instruction stream. Grounded on the teacher's static process loader
// (`init::processes`, a table built once at startup and never
// revisited) — reused here as a single upfront parse so a malformed
// trace is a configuration error caught before the dispatcher runs a
// single instruction, never a mid-run panic.

use std::iter::Peekable;
use std::path::Path;

use crate::error::{SimError, SimResult};
use crate::process::{Process, NUM_PTE};
use crate::vma::Vma;

use super::{directive_lines, read_to_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Ctx,
    Read,
    Write,
    Exit,
}

#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub op: Op,
    pub arg: usize,
}

pub struct LoadedTrace {
    pub processes: Vec<Process>,
    pub instructions: Vec<Instruction>,
}

pub fn parse_trace_file(path: &Path) -> SimResult<LoadedTrace> {
    let contents = read_to_string(path)?;
    let mut lines = directive_lines(&contents).peekable();

    let (_, num_processes) = next_usize(path, &mut lines)?;

    let mut processes = Vec::with_capacity(num_processes);
    for pid in 0..num_processes {
        let mut process = Process::new(pid);
        let (_, num_vmas) = next_usize(path, &mut lines)?;
        for _ in 0..num_vmas {
            let (line_no, raw) = lines.next().ok_or_else(|| unexpected_eof(path))?;
            let mut fields = raw.split_whitespace();
            let start = next_field(path, line_no, &mut fields)?;
            let end = next_field(path, line_no, &mut fields)?;
            let wp = next_field(path, line_no, &mut fields)? != 0;
            let fm = next_field(path, line_no, &mut fields)? != 0;
            process
                .add_vma(Vma {
                    start_vpage: start,
                    end_vpage: end,
                    write_protect: wp,
                    file_mapped: fm,
                })
                .map_err(|reason| malformed(path, line_no, reason))?;
        }
        processes.push(process);
    }

    let mut instructions = Vec::new();
    for (line_no, raw) in lines {
        let mut fields = raw.split_whitespace();
        let op_token = fields
            .next()
            .ok_or_else(|| malformed(path, line_no, "missing opcode"))?;
        let op = match op_token {
            "c" => Op::Ctx,
            "r" => Op::Read,
            "w" => Op::Write,
            "e" => Op::Exit,
            other => return Err(malformed(path, line_no, &format!("unrecognised opcode '{other}'"))),
        };
        let arg = if op == Op::Exit {
            0
        } else {
            next_field(path, line_no, &mut fields)?
        };
        match op {
            Op::Ctx if arg >= num_processes => {
                return Err(malformed(
                    path,
                    line_no,
                    &format!("process index {arg} out of range (only {num_processes} declared)"),
                ));
            }
            Op::Read | Op::Write if arg >= NUM_PTE => {
                return Err(malformed(
                    path,
                    line_no,
                    &format!("vpage {arg} out of range (0..{NUM_PTE})"),
                ));
            }
            _ => {}
        }
        instructions.push(Instruction { op, arg });
    }

    Ok(LoadedTrace { processes, instructions })
}

fn next_usize<'a>(
    path: &Path,
    lines: &mut Peekable<impl Iterator<Item = (usize, &'a str)>>,
) -> SimResult<(usize, usize)> {
    let (line_no, raw) = lines.next().ok_or_else(|| unexpected_eof(path))?;
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| malformed(path, line_no, "expected an integer"))?;
    Ok((line_no, value))
}

fn next_field<'a>(
    path: &Path,
    line_no: usize,
    fields: &mut impl Iterator<Item = &'a str>,
) -> SimResult<usize> {
    fields
        .next()
        .ok_or_else(|| malformed(path, line_no, "missing field"))?
        .parse::<usize>()
        .map_err(|_| malformed(path, line_no, "expected an integer field"))
}

fn malformed(path: &Path, line: usize, reason: &str) -> SimError {
    SimError::MalformedFile {
        path: path.to_path_buf(),
        line,
        reason: reason.to_string(),
    }
}

fn unexpected_eof(path: &Path) -> SimError {
    malformed(path, 0, "unexpected end of file")
}
