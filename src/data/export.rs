use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Table, COLUMNS};

/// Write `view` as CSV with the input header and column order. Returns the
/// number of data rows written. A header is written even for an empty view.
pub fn write_csv(view: &Table, path: &Path) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(COLUMNS).context("writing CSV header")?;
    for (i, row) in view.rows().iter().enumerate() {
        writer
            .serialize(row)
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(view.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::fixtures::row;

    #[test]
    fn exported_file_loads_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_data.csv");
        let view = Table::new(vec![
            row("Toyota", "Camry", "automatic", "ca", 20_000.0),
            row("Honda", "Civic, EX", "manual", "tx", 18_000.5),
        ]);
        assert_eq!(write_csv(&view, &path).unwrap(), 2);
        assert_eq!(load_file(&path).unwrap(), view);
    }

    #[test]
    fn empty_view_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        assert_eq!(write_csv(&Table::default(), &path).unwrap(), 0);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        assert!(write_csv(&Table::default(), &path).is_err());
    }
}
