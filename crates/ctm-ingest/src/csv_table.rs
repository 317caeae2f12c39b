use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A headed CSV file held as trimmed strings.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// One data row and the 1-based file line its record starts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    pub line: u64,
    pub cells: Vec<String>,
}

impl CsvRow {
    /// Cell at `index`, or `""` for short rows.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Resolve `required` columns to indices, failing with every missing
    /// column named at once.
    pub fn require_columns(&self, file: &str, required: &[&str]) -> Result<Vec<usize>> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns {
                file: file.to_string(),
                missing,
                found: self.headers.clone(),
            });
        }
        Ok(required
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect())
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        rows.push(CsvRow { line, cells });
    }
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> CsvTable {
        CsvTable {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn require_columns_reports_all_missing() {
        let table = table(&["Id", "GENDER"]);
        let error = table
            .require_columns("patients.csv", &["Id", "BIRTHDATE", "GENDER", "CITY"])
            .unwrap_err();
        match error {
            IngestError::MissingColumns {
                file,
                missing,
                found,
            } => {
                assert_eq!(file, "patients.csv");
                assert_eq!(missing, vec!["BIRTHDATE", "CITY"]);
                assert_eq!(found, vec!["Id", "GENDER"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rows_keep_their_file_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.csv");
        std::fs::write(
            &path,
            "Id,NOTE\np1,short\n,\np2,\"spans\ntwo lines\"\np3,last\n",
        )
        .unwrap();

        let table = read_csv_table(&path).unwrap();

        let lines: Vec<u64> = table.rows.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 4, 6]);
        assert_eq!(table.rows[1].cell(1), "spans\ntwo lines");
        assert_eq!(table.rows[2].cell(5), "");
    }

    #[test]
    fn require_columns_returns_indices_in_request_order() {
        let table = table(&["A", "B", "C"]);
        let indices = table.require_columns("x.csv", &["C", "A"]).unwrap();
        assert_eq!(indices, vec![2, 0]);
    }
}
