use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Row, Table};

/// Failure to produce the base table. Always fatal: the dashboard has nothing
/// to show without its data.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} contains no rows")]
    Empty { path: PathBuf },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the listings table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row followed by one listing per line (recommended)
/// * `.json` – `[{ "Make": "...", "Model": "...", ... }, ...]`
pub fn load_file(path: &Path) -> Result<Table, DataSourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => return Err(DataSourceError::UnsupportedFormat(other.to_string())),
    };

    if rows.is_empty() {
        return Err(DataSourceError::Empty {
            path: path.to_path_buf(),
        });
    }
    log::info!("Loaded {} listings from {}", rows.len(), path.display());
    Ok(Table::new(rows))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Columns are matched by header name, so extra columns are ignored and the
/// on-disk order does not matter.
fn load_csv(path: &Path) -> Result<Vec<Row>, DataSourceError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    reader
        .deserialize::<Row>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| DataSourceError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the layout `df.to_json(orient='records')` produces.
fn load_json(path: &Path) -> Result<Vec<Row>, DataSourceError> {
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DataSourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<File, DataSourceError> {
    File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Make,Model,Transmission,State,Color,Interior,Tight_condition,Mileage,Year,Price,Mmr";

    fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_csv_by_header_name() {
        let csv = format!(
            "{HEADER}\nKia,Sorento,automatic,ca,white,black,Good,16639,2015,21500,20500\n\
             BMW,3 Series,manual,fl,gray,beige,Excellent,9393.5,2014,30000,31900\n"
        );
        let (_dir, path) = write_temp("cars.csv", &csv);
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        let bmw = &table.rows()[1];
        assert_eq!(bmw.model, "3 Series");
        assert_eq!(bmw.condition, "Excellent");
        assert_eq!(bmw.mileage, 9393.5);
        assert_eq!(bmw.year, 2014);
    }

    #[test]
    fn loads_json_records() {
        let json = r#"[{"Make":"Kia","Model":"Soul","Transmission":"automatic","State":"tx",
            "Color":"red","Interior":"gray","Tight_condition":"Fair","Mileage":50000,
            "Year":2012,"Price":7000,"Mmr":7100}]"#;
        let (_dir, path) = write_temp("cars.json", json);
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].price, 7000.0);
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let (_dir, path) = write_temp("bad.csv", "Make,Model\nKia,Soul\n");
        assert!(matches!(load_file(&path), Err(DataSourceError::Csv { .. })));
    }

    #[test]
    fn header_only_file_is_empty() {
        let (_dir, path) = write_temp("empty.csv", &format!("{HEADER}\n"));
        assert!(matches!(load_file(&path), Err(DataSourceError::Empty { .. })));
    }

    #[test]
    fn missing_file_and_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(load_file(&missing), Err(DataSourceError::Io { .. })));
        assert!(matches!(
            load_file(Path::new("cars.xlsx")),
            Err(DataSourceError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }
}
