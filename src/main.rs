// src/main.rs
//
// Thin entry point, the same shape as the teacher's `kernel_main`:
// module wiring up top, `main` itself doing nothing but delegate to a
// `run` that can fail. The difference is the failure channel — no
// bootloader to hand a `BootInfo` to, so `run` returns a `SimResult`
// and `main` is the only place that turns an `Err` into an exit code.

mod algorithms;
mod cli;
mod dispatcher;
mod error;
mod frame;
mod input;
mod pager;
mod process;
mod rand_source;
mod report;
mod stats;
mod vma;

use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Config;
use dispatcher::Dispatcher;
use error::{SimError, SimResult};
use pager::Pager;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vmsim: {err}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// `tracing` diagnostics are separate from the spec-mandated stdout
/// trace: they go to stderr, are gated by `RUST_LOG` (defaulting to
/// `warn`), and never participate in output comparisons.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> SimResult<()> {
    let config = Config::from_args()?;
    info!(
        algorithm = config.algorithm.name(),
        num_frames = config.num_frames,
        "configured run"
    );

    let rand_values = input::parse_rand_file(&config.rand_path)?;
    let trace = input::parse_trace_file(&config.input_path)?;

    let algorithm = algorithms::build(config.algorithm, rand_values);
    let pager = Pager::new(config.num_frames, algorithm);
    let mut dispatcher = Dispatcher::new(trace.processes, pager, config.options);

    let summary = dispatcher.run(&trace.instructions);

    if config.options.page_table {
        report::print_all_page_tables(dispatcher.processes());
    }
    if config.options.frame_table {
        report::print_frame_table(dispatcher.pager().frames());
    }
    if config.options.stats {
        for process in dispatcher.processes() {
            report::print_process_stats(process.pid, &process.stats);
        }
        report::print_total_cost(
            summary.inst_count,
            summary.ctx_switches,
            summary.proc_exits,
            dispatcher.cost().total(),
        );
    }

    info!(total_cost = dispatcher.cost().total(), "run complete");
    Ok(())
}

/// Mirrors §6: 1 for an unrecognised argument, a distinct non-zero
/// code for a bad algorithm letter, non-zero for everything else.
fn exit_code_for(err: &SimError) -> u8 {
    match err {
        SimError::UnknownAlgorithm(_) => 2,
        SimError::FrameCountOutOfRange(_) | SimError::UnknownOption(_) | SimError::ArgParse(_) => 1,
        SimError::Io { .. } | SimError::MalformedFile { .. } => 1,
    }
}
