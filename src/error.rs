// src/error.rs
//
// Every fallible path that is NOT part of the simulated fault model
// (SEGV/SEGPROT are counted, not errors — see pager.rs) reports through
// this enum. `main` is the only place that turns a `SimError` into an
// exit code and a stderr line.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("frame count {0} out of range (must be 1..=128)")]
    FrameCountOutOfRange(u32),

    #[error("unrecognised algorithm '{0}' (expected one of F/R/C/E/A/W)")]
    UnknownAlgorithm(char),

    #[error("unrecognised option flag '{0}' in -o argument")]
    UnknownOption(char),

    #[error("{0}")]
    ArgParse(#[from] clap::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {reason}")]
    MalformedFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

pub type SimResult<T> = Result<T, SimError>;
