use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;

use crate::ports::outbound::OutputPresenter;
use crate::shared::Result;

/// FileSystemWriter adapter for writing rendered tables to files
///
/// Creates missing parent directories, so callers can hand it paths like
/// `<out_dir>/snapshots/<publisher>.csv` without pre-building the tree.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        fs::write(&self.output_path, content)
            .with_context(|| format!("Failed to write output file: {}", self.output_path.display()))
    }
}

/// StdoutPresenter adapter for writing output to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_writes_content() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("table.csv");

        let writer = FileSystemWriter::new(output_path.clone());
        writer.present("a,b\n1,2\n").unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "a,b\n1,2\n");
    }

    #[test]
    fn test_file_writer_creates_missing_parents() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("snapshots").join("docker.csv");

        let writer = FileSystemWriter::new(output_path.clone());
        writer.present("application\n").unwrap();

        assert!(output_path.exists());
    }

    #[test]
    fn test_stdout_presenter_does_not_error() {
        let presenter = StdoutPresenter::new();
        assert!(presenter.present("test output\n").is_ok());
    }
}
