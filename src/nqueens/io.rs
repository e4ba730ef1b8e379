//! Historical result files.
//!
//! Runs persist every solution board to `<dimension>output.txt`, one
//! board per line, cells separated by `#`. Later runs on a larger
//! dimension feed these rows to the history-biased location builders.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::deme::Location;
use crate::error::SearchError;

/// Conventional file name for a dimension's results.
pub fn history_file_name(dimensions: usize) -> String {
    format!("{dimensions}output.txt")
}

/// Loads historical solution rows.
///
/// A missing file is an empty history, not an error. A cell that does
/// not parse as an integer fails with
/// [`SearchError::MalformedHistory`].
pub fn load_history(path: &Path) -> Result<Vec<Vec<usize>>, SearchError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut rows = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split('#')
            .map(|cell| cell.trim().parse::<usize>())
            .collect::<Result<Vec<usize>, _>>()
            .map_err(|source| SearchError::MalformedHistory {
                line: index + 1,
                source,
            })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Writes solution boards in the historical result format.
pub fn write_solutions(path: &Path, solutions: &[Location]) -> Result<(), SearchError> {
    let mut file = fs::File::create(path)?;
    for board in solutions {
        let line = board
            .iter()
            .map(|cell| cell.to_string())
            .collect::<Vec<_>>()
            .join("#");
        writeln!(file, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let rows = load_history(&dir.path().join(history_file_name(99))).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_load_parses_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(history_file_name(5));
        fs::write(&path, "3#1#4#2#0\n2#0#3#1#4\n\n").unwrap();

        let rows = load_history(&path).unwrap();
        assert_eq!(rows, vec![vec![3, 1, 4, 2, 0], vec![2, 0, 3, 1, 4]]);
    }

    #[test]
    fn test_load_reports_malformed_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "3#1#4\n2#x#0\n").unwrap();

        let err = load_history(&path).unwrap_err();
        match err {
            SearchError::MalformedHistory { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(history_file_name(5));
        let boards = vec![vec![3, 1, 4, 2, 0], vec![0, 2, 4, 1, 3]];

        write_solutions(&path, &boards).unwrap();
        assert_eq!(load_history(&path).unwrap(), boards);
    }

    #[test]
    fn test_history_file_name() {
        assert_eq!(history_file_name(16), "16output.txt");
    }
}
