//! School table CSV I/O: input loading and the two checkpoint writers.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

use crate::models::grades::coerce_grade;
use crate::models::{GeoPoint, SchoolRecord, SchoolTable};

const COL_ADDRESS: &str = "PSS_ADDRESS";
const COL_CITY: &str = "PSS_CITY";
const COL_STATE: &str = "PSS_STABB";
const COL_LO_GRADE: &str = "LOGRADE";
const COL_HI_GRADE: &str = "HIGRADE";

/// Read the school table from a CSV file.
///
/// Header names are matched case-insensitively (normalized to upper-case on
/// load). Rows keep their full original field vector so the checkpoint CSVs
/// can echo every input column.
pub fn read_schools(path: &Path) -> Result<SchoolTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open schools CSV: {}", path.display()))?;

    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_uppercase())
        .collect();

    let address_idx = column(&headers, COL_ADDRESS)?;
    let city_idx = column(&headers, COL_CITY)?;
    let state_idx = column(&headers, COL_STATE)?;
    let lo_idx = column(&headers, COL_LO_GRADE)?;
    let hi_idx = column(&headers, COL_HI_GRADE)?;

    let mut rows = Vec::new();

    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();

        rows.push(SchoolRecord {
            row,
            address: fields[address_idx].clone(),
            city: fields[city_idx].clone(),
            state: fields[state_idx].clone(),
            lo_grade: coerce_grade(&fields[lo_idx]),
            hi_grade: coerce_grade(&fields[hi_idx]),
            fields,
        });
    }

    info!("Loaded {} school records", rows.len());

    Ok(SchoolTable { headers, rows })
}

fn column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("Column '{}' not found", name))
}

/// Write checkpoint #1: every input column plus a `COORDINATE` column.
///
/// Coordinates are serialized as WKT points; misses leave the cell empty.
pub fn write_coords_csv(
    path: &Path,
    table: &SchoolTable,
    coords: &[Option<GeoPoint>],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output CSV: {}", path.display()))?;

    let mut header = table.headers.clone();
    header.push("COORDINATE".to_string());
    writer.write_record(&header)?;

    for (school, coord) in table.rows.iter().zip(coords) {
        let mut record = school.fields.clone();
        record.push(coord.map(|p| p.to_wkt()).unwrap_or_default());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write checkpoint #2: checkpoint #1 columns plus a `DISTRICTS` column.
///
/// The per-row name list is serialized as a JSON array; rows with no entry
/// in the match map get an empty cell.
pub fn write_districts_csv(
    path: &Path,
    table: &SchoolTable,
    coords: &[Option<GeoPoint>],
    matches: &BTreeMap<usize, Vec<String>>,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output CSV: {}", path.display()))?;

    let mut header = table.headers.clone();
    header.push("COORDINATE".to_string());
    header.push("DISTRICTS".to_string());
    writer.write_record(&header)?;

    for (school, coord) in table.rows.iter().zip(coords) {
        let mut record = school.fields.clone();
        record.push(coord.map(|p| p.to_wkt()).unwrap_or_default());

        let districts = match matches.get(&school.row) {
            Some(names) => serde_json::to_string(names)?,
            None => String::new(),
        };
        record.push(districts);

        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_input(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_schools_normalizes_headers_and_coerces_grades() {
        let file = write_input(
            "pss_address,pss_city,pss_stabb,lograde,higrade,extra\n\
             100 N Main St,Phoenix,AZ,K,8,foo\n\
             200 S Elm St,Tucson,AZ,9,12,bar\n",
        );

        let table = read_schools(file.path()).unwrap();

        assert_eq!(
            table.headers,
            vec!["PSS_ADDRESS", "PSS_CITY", "PSS_STABB", "LOGRADE", "HIGRADE", "EXTRA"]
        );
        assert_eq!(table.rows.len(), 2);

        let first = &table.rows[0];
        assert_eq!(first.row, 0);
        assert_eq!(first.full_address(), "100 N Main St,Phoenix,AZ");
        assert_eq!(first.lo_grade, 0);
        assert_eq!(first.hi_grade, 8);
        assert_eq!(first.fields.len(), 6);

        let second = &table.rows[1];
        assert_eq!(second.row, 1);
        assert_eq!(second.lo_grade, 9);
        assert_eq!(second.hi_grade, 12);
    }

    #[test]
    fn test_read_schools_missing_column_is_an_error() {
        let file = write_input("pss_address,pss_city,lograde,higrade\na,b,1,2\n");

        let err = read_schools(file.path()).unwrap_err();
        assert!(err.to_string().contains("PSS_STABB"));
    }

    fn sample_table() -> SchoolTable {
        let headers = vec![
            "PSS_ADDRESS".to_string(),
            "PSS_CITY".to_string(),
            "PSS_STABB".to_string(),
            "LOGRADE".to_string(),
            "HIGRADE".to_string(),
        ];
        let rows = vec![
            SchoolRecord {
                row: 0,
                address: "100 N Main St".to_string(),
                city: "Phoenix".to_string(),
                state: "AZ".to_string(),
                lo_grade: 0,
                hi_grade: 8,
                fields: vec![
                    "100 N Main St".to_string(),
                    "Phoenix".to_string(),
                    "AZ".to_string(),
                    "K".to_string(),
                    "8".to_string(),
                ],
            },
            SchoolRecord {
                row: 1,
                address: "200 S Elm St".to_string(),
                city: "Tucson".to_string(),
                state: "AZ".to_string(),
                lo_grade: 9,
                hi_grade: 12,
                fields: vec![
                    "200 S Elm St".to_string(),
                    "Tucson".to_string(),
                    "AZ".to_string(),
                    "9".to_string(),
                    "12".to_string(),
                ],
            },
        ];
        SchoolTable { headers, rows }
    }

    #[test]
    fn test_coords_checkpoint_writes_wkt_and_blank_for_miss() {
        let table = sample_table();
        let coords = vec![
            Some(GeoPoint {
                lon: -112.0,
                lat: 33.5,
            }),
            None,
        ];

        let out = tempfile::NamedTempFile::new().unwrap();
        write_coords_csv(out.path(), &table, &coords).unwrap();

        let written = std::fs::read_to_string(out.path()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("HIGRADE,COORDINATE"));
        assert!(lines[1].contains("POINT (-112 33.5)"));
        assert!(lines[2].ends_with("12,"));
    }

    #[test]
    fn test_districts_checkpoint_serializes_name_list() {
        let table = sample_table();
        let coords = vec![
            Some(GeoPoint {
                lon: -112.0,
                lat: 33.5,
            }),
            None,
        ];
        let mut matches = BTreeMap::new();
        matches.insert(0, vec!["Mesa Unified".to_string(), "Gilbert Unified".to_string()]);

        let out = tempfile::NamedTempFile::new().unwrap();
        write_districts_csv(out.path(), &table, &coords, &matches).unwrap();

        let written = std::fs::read_to_string(out.path()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert!(lines[0].ends_with("COORDINATE,DISTRICTS"));
        assert!(lines[1].contains(r#"[""Mesa Unified"",""Gilbert Unified""]"#));
        assert!(lines[2].ends_with("12,,"));
    }
}
