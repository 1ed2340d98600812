// Author: kelexine (https://github.com/kelexine)
// export/csv.rs — CSV export logic

use super::Report;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

pub fn export_csv(report: &Report, path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(BufWriter::new(f));

    wtr.write_record(["Path", "Lines", "Size"])?;
    for fi in report.rows {
        wtr.write_record([
            fi.path.as_str(),
            &fi.lines.to_string(),
            fi.size_class().label(),
        ])?;
    }

    wtr.flush()?;
    debug!(path = %path.display(), "exported CSV");
    Ok(())
}
