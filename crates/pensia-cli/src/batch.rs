use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use pensia_core::{Document, ValidationReport, Validator};

use crate::cli::OutputFormat;
use crate::output;

/// Settings shared by every file of one batch.
pub struct Batch {
    pub validator: Validator,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub check_schema: bool,
}

/// Outcome of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub checked: usize,
    pub failed: usize,
    pub problems: usize,
}

/// Expand inputs into the files to check.
///
/// Directories contribute their supported files, non-recursively and in name
/// order. An explicit file with an unsupported extension is an error.
pub fn collect_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries = Vec::new();
            for entry in fs::read_dir(input)
                .with_context(|| format!("Failed to read directory {}", input.display()))?
            {
                let path = entry?.path();
                if path.is_file() && Document::is_supported_file(&path) {
                    entries.push(path);
                }
            }
            entries.sort();
            files.extend(entries);
        } else if Document::is_supported_file(input) {
            files.push(input.clone());
        } else {
            bail!("{} is not a JSON or YAML file", input.display());
        }
    }
    Ok(files)
}

impl Batch {
    /// Check every file, logging and skipping the ones that fail.
    pub fn run(&self, files: &[PathBuf]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for file in files {
            match self.check_file(file) {
                Ok(report) => {
                    summary.checked += 1;
                    summary.problems += report.len();
                    tracing::info!(
                        file = %file.display(),
                        problems = report.len(),
                        "Checked"
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    let error = format!("{:#}", e);
                    tracing::error!(file = %file.display(), error = %error, "Failed to check file");
                }
            }
        }
        summary
    }

    /// Load, validate and write the report for one file.
    pub fn check_file(&self, file: &Path) -> anyhow::Result<ValidationReport> {
        let value = Document::read_value(file)?;
        let document = if self.check_schema {
            Document::from_value_checked(value)?
        } else {
            Document::from_value(value)?
        };

        let report = self.validator.run(&document)?;

        let out_path = self.out_path(file)?;
        match self.format {
            OutputFormat::Csv => output::write_csv(&out_path, &report)?,
            OutputFormat::Json => {
                output::write_json(&out_path, &file.display().to_string(), &report)?
            }
        }
        tracing::debug!(out = %out_path.display(), "Report written");

        Ok(report)
    }

    fn out_path(&self, file: &Path) -> anyhow::Result<PathBuf> {
        let Some(stem) = file.file_stem() else {
            bail!("{} has no file name", file.display());
        };
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(self.format.extension());
        Ok(self.out_dir.join(name))
    }
}
