use herodex_core::{Error, HeroCatalog, RawRow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk layout of a hero table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Comma separated values with a header row
    Csv,
    /// A JSON array of objects
    Json,
}

impl SourceFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Rows read from a source, with the header when the format carries one.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names as written in the header; `None` for headerless formats.
    pub columns: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Build a catalog, checking the header first when there is one.
    pub fn into_catalog(self) -> Result<HeroCatalog> {
        match self.columns {
            Some(columns) => HeroCatalog::load_with_columns(columns, self.rows),
            None => HeroCatalog::load(self.rows),
        }
    }
}

/// Anything that can produce raw hero rows.
pub trait RowSource: Send + Sync {
    fn read_rows(&self) -> Result<RawTable>;

    /// Human readable origin, used in logs.
    fn describe(&self) -> String;
}

/// A hero table stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: SourceFormat,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P, format: SourceFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Open a file, taking the format from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path).ok_or_else(|| {
            Error::Source(format!(
                "Cannot infer data format from '{}' (expected .csv or .json)",
                path.display()
            ))
        })?;
        Ok(Self::new(path, format))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

impl RowSource for FileSource {
    fn read_rows(&self) -> Result<RawTable> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let table = match self.format {
            SourceFormat::Csv => read_csv(reader)?,
            SourceFormat::Json => read_json(reader)?,
        };
        debug!(path = %self.path.display(), rows = table.rows.len(), "rows read");
        Ok(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Rows already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<RawRow>,
}

impl MemorySource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for MemorySource {
    fn read_rows(&self) -> Result<RawTable> {
        Ok(RawTable {
            columns: None,
            rows: self.rows.clone(),
        })
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }
}

/// Read a CSV table with a header row. Every cell becomes a JSON string;
/// numeric parsing happens when the catalog is built.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| Error::Source(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| Error::Source(format!("Failed to read CSV row {idx}: {e}")))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(RawTable {
        columns: Some(headers.iter().map(str::to_string).collect()),
        rows,
    })
}

/// Read a JSON array of objects. Objects carry their own keys, so the table
/// has no header and columns are checked row by row.
pub fn read_json<R: Read>(reader: R) -> Result<RawTable> {
    let values: Vec<Value> = serde_json::from_reader(reader)
        .map_err(|e| Error::Source(format!("Failed to parse JSON rows: {e}")))?;

    let rows = values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| match value {
            Value::Object(map) => Ok(map),
            other => Err(Error::Source(format!(
                "JSON row {idx} is not an object: {other}"
            ))),
        })
        .collect::<Result<Vec<RawRow>>>()?;

    Ok(RawTable { columns: None, rows })
}

/// Read every row from `source` and build a catalog.
pub fn load_catalog(source: &dyn RowSource) -> Result<HeroCatalog> {
    source.read_rows()?.into_catalog()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herodex_core::SchemaError;
    use std::io::Write;

    const CSV: &str = "\
Hero_Name , Role,win_rate,pick_rate,offense_overall,defense_overall,skill_effect_overall,difficulty_overall
Martis ,Fighter,50.0,10.0,80,60,50,40
Layla,marksman,51.2,3.5,70,20,40,10
";

    #[test]
    fn test_read_csv() {
        let table = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.columns.as_ref().unwrap()[0], "Hero_Name ");
        assert_eq!(table.rows[0]["Hero_Name "], Value::String("Martis ".to_string()));

        let catalog = table.into_catalog().unwrap();
        let martis = catalog.lookup("martis").unwrap();
        assert_eq!(martis.role, "fighter");
        assert_eq!(martis.offense_overall, 80.0);
    }

    #[test]
    fn test_csv_missing_column() {
        let csv = "hero_name,role,win_rate\nmartis,fighter,50\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert!(matches!(
            table.into_catalog(),
            Err(Error::Schema(SchemaError::MissingColumn { .. }))
        ));
    }

    #[test]
    fn test_csv_header_only() {
        let table = read_csv("hero_name,role\n".as_bytes()).unwrap();
        assert!(table.rows.is_empty());
        assert!(matches!(
            table.into_catalog(),
            Err(Error::Schema(SchemaError::MissingColumn { row: 0, ref column })) if column == "win_rate"
        ));

        let header = CSV.lines().next().unwrap();
        let catalog = read_csv(header.as_bytes()).unwrap().into_catalog().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_file_source_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroes.csv");
        File::create(&path).unwrap().write_all(b"hero_name,role\n").unwrap();

        let source = FileSource::from_path(&path).unwrap();
        assert!(matches!(
            load_catalog(&source),
            Err(Error::Schema(SchemaError::MissingColumn { .. }))
        ));
    }

    #[test]
    fn test_csv_ragged_row() {
        let csv = "hero_name,role\nmartis,fighter,extra\n";
        assert!(matches!(read_csv(csv.as_bytes()), Err(Error::Source(_))));
    }

    #[test]
    fn test_read_json() {
        let json = r#"[{"hero_name": "Tigreal", "role": "Tank", "win_rate": 49.5,
            "pick_rate": 2.1, "offense_overall": 30, "defense_overall": 90,
            "skill_effect_overall": 70, "difficulty_overall": 20}]"#;
        let table = read_json(json.as_bytes()).unwrap();
        assert!(table.columns.is_none());
        let catalog = table.into_catalog().unwrap();
        assert_eq!(catalog.lookup("TIGREAL").unwrap().defense_overall, 90.0);
    }

    #[test]
    fn test_json_rejects_non_objects() {
        assert!(matches!(read_json("[1, 2]".as_bytes()), Err(Error::Source(_))));
        assert!(matches!(read_json("{".as_bytes()), Err(Error::Source(_))));
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroes.CSV");
        File::create(&path).unwrap().write_all(CSV.as_bytes()).unwrap();

        let source = FileSource::from_path(&path).unwrap();
        assert_eq!(source.format(), SourceFormat::Csv);
        assert_eq!(load_catalog(&source).unwrap().len(), 2);
    }

    #[test]
    fn test_file_source_errors() {
        assert!(matches!(
            FileSource::from_path("heroes.xlsx"),
            Err(Error::Source(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.csv"), SourceFormat::Csv);
        assert!(matches!(source.read_rows(), Err(Error::Io(_))));
    }
}
