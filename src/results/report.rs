//! Report file handling
//!
//! The report is a JSON array of test results, indented with four spaces.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::models::TestResult;

const INDENT: &[u8] = b"    ";

/// Writer for the report file of one run
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    /// Create a writer for the report at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Delete a report left by a previous run; a missing file is fine
    pub fn remove_existing(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed previous report {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Failed to remove report: {}", self.path.display()))),
        }
    }

    /// Serialize the results and write them, replacing any existing file
    pub fn write(&self, results: &[TestResult]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create report: {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        results
            .serialize(&mut serializer)
            .context("Failed to serialize report")?;
        writer
            .flush()
            .with_context(|| format!("Failed to write report: {}", self.path.display()))?;

        info!(
            "Saved report with {} test cases to {}",
            results.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read a report back
    #[cfg(test)]
    pub fn load(&self) -> Result<Vec<TestResult>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open report: {}", self.path.display()))?;
        serde_json::from_reader(std::io::BufReader::new(file)).context("Failed to parse report")
    }
}
