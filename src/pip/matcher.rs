//! Grade-filtered district matching for resolved school coordinates.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::grades::grade_compatible;
use crate::models::{GeoPoint, SchoolRecord};

use super::DistrictIndex;

/// Match every resolved school against the district index.
///
/// `coords` must be aligned with `schools` (one entry per row, as produced
/// by the coordinate resolver). The result is keyed by each school's row
/// identifier; rows with no coordinate or no qualifying district are absent.
/// Name order within a row follows the index's candidate order, which is
/// stable within a run but not sorted.
pub fn match_districts(
    schools: &[SchoolRecord],
    coords: &[Option<GeoPoint>],
    index: &DistrictIndex,
) -> BTreeMap<usize, Vec<String>> {
    let mut matches = BTreeMap::new();

    for (school, coord) in schools.iter().zip(coords) {
        let Some(point) = coord else {
            continue;
        };

        let names: Vec<String> = index
            .lookup(point.lon, point.lat)
            .into_iter()
            .filter(|district| {
                grade_compatible(
                    school.lo_grade,
                    school.hi_grade,
                    district.lo_grade,
                    district.hi_grade,
                )
            })
            .map(|district| district.name.clone())
            .collect();

        debug!(
            "Row {}: {} containing district(s) after grade filter",
            school.row,
            names.len()
        );

        if !names.is_empty() {
            matches.insert(school.row, names);
        }
    }

    matches
}
