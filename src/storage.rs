use crate::models::ArchiveDownload;
use crate::series::Series;
use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct Row<'a> {
    label: &'a str,
    value: f64,
}

/// Save a series as CSV with header.
pub fn save_csv<P: AsRef<Path>>(series: &Series, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("label", "value"))?;
    for (label, value) in series.iter() {
        wtr.serialize(Row { label, value })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a series as a pretty JSON array of `{label, value}` rows.
pub fn save_json<P: AsRef<Path>>(series: &Series, path: P) -> Result<()> {
    let rows: Vec<Row> = series
        .iter()
        .map(|(label, value)| Row { label, value })
        .collect();
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Write a downloaded database archive into `dir`, using the server-sent
/// filename (path components stripped). Returns the path written.
pub fn save_archive<P: AsRef<Path>>(archive: &ArchiveDownload, dir: P) -> Result<PathBuf> {
    let name = Path::new(&archive.filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export.zip".to_string());
    let path = dir.as_ref().join(name);
    let mut f = File::create(&path)?;
    f.write_all(&archive.bytes)?;
    Ok(path)
}
