// src/input/rand.rs
//
// Parses the random-number file consumed by the Random algorithm: a
// length prefix, then that many whitespace-separated integers.

use std::path::Path;

use crate::error::{SimError, SimResult};

use super::read_to_string;

pub fn parse_rand_file(path: &Path) -> SimResult<Vec<u32>> {
    let contents = read_to_string(path)?;
    let mut tokens = contents.split_whitespace();

    let count: usize = tokens
        .next()
        .ok_or_else(|| malformed(path, "missing length prefix"))?
        .parse()
        .map_err(|_| malformed(path, "length prefix is not an integer"))?;

    let values: Vec<u32> = tokens
        .map(|tok| tok.parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed(path, "non-integer value in random array"))?;

    if values.len() != count {
        return Err(malformed(
            path,
            &format!("length prefix says {count}, found {} values", values.len()),
        ));
    }

    Ok(values)
}

fn malformed(path: &Path, reason: &str) -> SimError {
    SimError::MalformedFile {
        path: path.to_path_buf(),
        line: 1,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_length_prefixed_array() {
        let file = write_temp("3\n10 20 30\n");
        assert_eq!(parse_rand_file(file.path()).unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let file = write_temp("3\n10 20\n");
        assert!(parse_rand_file(file.path()).is_err());
    }

    #[test]
    fn rejects_non_integer_value() {
        let file = write_temp("2\n10 abc\n");
        assert!(parse_rand_file(file.path()).is_err());
    }
}
