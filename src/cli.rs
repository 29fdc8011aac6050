// src/cli.rs
//
// Argument vector -> typed `Config`. This is the only configuration
// surface the simulator has: no env vars, no config file.

use std::path::PathBuf;

use clap::Parser;

use crate::algorithms::AlgorithmKind;
use crate::error::{SimError, SimResult};

/// Virtual memory manager simulator — replays a trace of memory
/// references against a small physical frame table.
#[derive(Parser, Debug)]
#[command(name = "vmsim", version, about)]
struct RawArgs {
    /// Number of physical frames (1..=128).
    #[arg(short = 'f', value_name = "N")]
    frames: u32,

    /// Page replacement algorithm: F(ifo) R(andom) C(lock) E(sc-nru) A(ging) W(orking-set).
    #[arg(short = 'a', value_name = "ALGO")]
    algorithm: String,

    /// Output options, e.g. "OPFS" — any of O P F S x y a f.
    #[arg(short = 'o', value_name = "OPTS", default_value = "")]
    options: String,

    /// Trace file of `c`/`r`/`w`/`e` instructions.
    input_file: PathBuf,

    /// Random number file used by the Random replacement algorithm.
    rand_file: PathBuf,
}

/// Per-instruction and per-report output switches, one bit per `-o` letter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// `O` — trace line + fault events per instruction.
    pub trace: bool,
    /// `P` — page table per process, after the run.
    pub page_table: bool,
    /// `F` — frame table, after the run.
    pub frame_table: bool,
    /// `S` — per-process stats and TOTALCOST, after the run.
    pub stats: bool,
    /// `x` — current process's page table, after each instruction.
    pub page_table_current_each: bool,
    /// `y` — all processes' page tables, after each instruction.
    pub page_table_all_each: bool,
    /// `f` — frame table, after each instruction.
    pub frame_table_each: bool,
    /// `a` — algorithm-selection diagnostics (ASELECT line).
    pub algorithm_diag: bool,
}

impl OutputOptions {
    fn parse(raw: &str) -> SimResult<Self> {
        let mut opts = Self::default();
        for ch in raw.chars() {
            match ch {
                'O' => opts.trace = true,
                'P' => opts.page_table = true,
                'F' => opts.frame_table = true,
                'S' => opts.stats = true,
                'x' => opts.page_table_current_each = true,
                'y' => opts.page_table_all_each = true,
                'f' => opts.frame_table_each = true,
                'a' => opts.algorithm_diag = true,
                other => return Err(SimError::UnknownOption(other)),
            }
        }
        Ok(opts)
    }
}

/// Fully resolved, validated configuration for a single simulation run.
#[derive(Debug)]
pub struct Config {
    pub num_frames: usize,
    pub algorithm: AlgorithmKind,
    pub options: OutputOptions,
    pub input_path: PathBuf,
    pub rand_path: PathBuf,
}

impl Config {
    /// Parse and validate the process argument vector. Uses
    /// `try_parse` rather than `parse`: clap's auto-erroring entry
    /// point prints its own usage text and calls `std::process::exit`
    /// directly, bypassing `main`'s `SimError` -> exit-code mapping.
    pub fn from_args() -> SimResult<Self> {
        Self::from_raw(RawArgs::try_parse()?)
    }

    fn from_raw(raw: RawArgs) -> SimResult<Self> {
        if raw.frames == 0 || raw.frames > 128 {
            return Err(SimError::FrameCountOutOfRange(raw.frames));
        }
        let algo_letter = raw
            .algorithm
            .chars()
            .next()
            .ok_or(SimError::UnknownAlgorithm('\0'))?;
        let algorithm = AlgorithmKind::from_letter(algo_letter)?;
        let options = OutputOptions::parse(&raw.options)?;

        Ok(Config {
            num_frames: raw.frames as usize,
            algorithm,
            options,
            input_path: raw.input_file,
            rand_path: raw.rand_file,
        })
    }
}
