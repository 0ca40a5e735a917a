//! Shapefile reader for school-district polygons.

use std::path::Path;

use anyhow::{Context, Result};
use geo::MultiPolygon;
use shapefile::dbase::{FieldValue, Record};
use tracing::{debug, info};

use crate::models::grades::coerce_grade;
use crate::models::District;

/// Load district polygons for one state from a national boundary shapefile.
///
/// Only records whose `STATEFP` attribute equals `state_fips` are kept, and
/// only the name, geometry, and grade bounds are retained. Records without
/// a name are skipped.
pub fn load_districts(path: &Path, state_fips: &str) -> Result<Vec<District>> {
    info!("Reading district shapefile from {}", path.display());

    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut districts = Vec::new();
    let mut skipped = 0usize;

    for result in reader.iter_shapes_and_records_as::<shapefile::Polygon, Record>() {
        let (polygon, record) = result.context("Error reading shape and record")?;

        match district_from_record(polygon, &record, state_fips) {
            Kept::District(district) => districts.push(district),
            Kept::OtherState => {}
            Kept::Unusable => {
                skipped += 1;
                debug!("Skipping district record without a usable name");
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} unusable records", skipped);
    }
    info!(
        "Loaded {} districts for state FIPS {}",
        districts.len(),
        state_fips
    );

    Ok(districts)
}

/// Outcome of converting one shapefile record.
enum Kept {
    District(District),
    OtherState,
    Unusable,
}

/// Convert a single polygon + attribute record into a `District`.
///
/// Grade fields arrive as dbase character or numeric values depending on the
/// source vintage; both are coerced, with unparsable values becoming 0.
fn district_from_record(
    polygon: shapefile::Polygon,
    record: &Record,
    state_fips: &str,
) -> Kept {
    if string_field(record, "STATEFP").as_deref() != Some(state_fips) {
        return Kept::OtherState;
    }

    let Some(name) = string_field(record, "NAME") else {
        return Kept::Unusable;
    };

    let geometry: MultiPolygon<f64> = polygon.into();

    Kept::District(District {
        name,
        geometry,
        lo_grade: grade_field(record, "LOGRADE"),
        hi_grade: grade_field(record, "HIGRADE"),
    })
}

fn string_field(record: &Record, field: &str) -> Option<String> {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

fn grade_field(record: &Record, field: &str) -> i32 {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => coerce_grade(s),
        Some(FieldValue::Numeric(Some(n))) => *n as i32,
        Some(FieldValue::Float(Some(n))) => *n as i32,
        Some(FieldValue::Integer(n)) => *n,
        _ => 0,
    }
}
