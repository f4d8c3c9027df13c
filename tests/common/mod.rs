#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use autodash::data::{Cell, Dataset, Row};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

pub fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn num(value: f64) -> Cell {
    Cell::Number(value)
}

/// The canonical three-row Region/Sales dataset used across suites.
pub fn sales_dataset() -> Dataset {
    Dataset::new(
        "sales.csv",
        vec!["Region".to_string(), "Sales".to_string()],
        vec![
            vec![text("East"), num(100.0)],
            vec![text("West"), num(50.0)],
            vec![text("East"), num(30.0)],
        ],
    )
}

pub fn dataset_of(headers: &[&str], rows: Vec<Row>) -> Dataset {
    Dataset::new(
        "test.csv",
        headers.iter().map(|h| h.to_string()).collect(),
        rows,
    )
}
