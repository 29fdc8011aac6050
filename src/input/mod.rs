// src/input/mod.rs
//
// File loading. Both the trace file and the random-number file share
// the same "strip comments, skip blank lines, track line numbers"
// shape, so the common bits live here and the two formats get their
// own submodule.

mod rand;
mod trace;

pub use rand::parse_rand_file;
pub use trace::{parse_trace_file, Instruction, LoadedTrace, Op};

use std::fs;
use std::path::Path;

use crate::error::{SimError, SimResult};

fn read_to_string(path: &Path) -> SimResult<String> {
    fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-blank, non-comment-only lines paired with their 1-based line
/// number. A comment runs from the first `#` to end of line; a line
/// that is all comment (or all whitespace) is skipped entirely.
fn directive_lines(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents.lines().enumerate().filter_map(|(i, line)| {
        let stripped = line.split('#').next().unwrap_or("").trim();
        (!stripped.is_empty()).then(|| (i + 1, stripped))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_lines_strips_comments_and_blanks() {
        let text = "# header\n3\n\n  # another comment\n1 2 0 0\n";
        let lines: Vec<_> = directive_lines(text).collect();
        assert_eq!(lines, vec![(2, "3"), (5, "1 2 0 0")]);
    }
}
