use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use pensia_core::ValidationReport;
use serde::Serialize;

/// Column titles of the problem report.
pub const CSV_HEADER: [&str; 3] = ["path in file", "serial number", "problem"];

/// UTF-8 byte order mark, so spreadsheet tools pick the right encoding.
const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Serialize)]
struct JsonOut<'a> {
    file: &'a str,
    valid: bool,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

/// Write problems as CSV: BOM, CRLF line endings, one header row.
pub fn write_csv(path: &Path, report: &ValidationReport) -> anyhow::Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);

    writer.write_record(CSV_HEADER)?;
    for problem in &report.problems {
        let (anchor, index, message) = problem.as_row();
        writer.write_record([anchor, index.to_string().as_str(), message])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the full report as pretty-printed JSON.
pub fn write_json(path: &Path, source: &str, report: &ValidationReport) -> anyhow::Result<()> {
    let out = JsonOut {
        file: source,
        valid: report.is_valid(),
        report,
    };
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, &out)?;
    file.write_all(b"\n")?;
    Ok(())
}
