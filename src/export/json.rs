// Author: kelexine (https://github.com/kelexine)
// export/json.rs — JSON and JSONL export logic

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use super::Report;
use crate::models::FileLines;

pub fn export_json(report: &Report, path: &Path) -> Result<()> {
    let total_lines: usize = report.rows.iter().map(|f| f.lines).sum();
    let data = json!({
        "metadata": {
            "root": report.result.root.to_string_lossy(),
            "total_files": report.rows.len(),
            "total_lines": total_lines,
            "skipped": report.result.skipped,
            "min_lines": report.min_lines,
            "timestamp": Utc::now().to_rfc3339(),
            "generator": concat!("get-lines v", env!("CARGO_PKG_VERSION")),
        },
        "files": report.rows.iter().map(|f| file_to_value(f)).collect::<Vec<_>>(),
    });

    let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut writer, &data).with_context(|| "Failed to serialize JSON")?;
    writer.flush()?;

    debug!(path = %path.display(), "exported JSON");
    Ok(())
}

pub fn export_jsonl(report: &Report, path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(f);

    for fi in report.rows {
        let line = serde_json::to_string(&file_to_value(fi))
            .with_context(|| "Failed to serialize JSONL record")?;
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), "exported JSONL");
    Ok(())
}

pub fn file_to_value(fi: &FileLines) -> serde_json::Value {
    json!({
        "path": fi.path,
        "lines": fi.lines,
        "size": fi.size_class(),
    })
}
