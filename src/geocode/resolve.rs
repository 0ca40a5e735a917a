//! Sequential coordinate resolution for the school table.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::models::{GeoPoint, SchoolTable};

use super::GeocodeClient;

/// Resolve a coordinate for every school row, in input order.
///
/// Issues one request per row with no batching, so the returned vector is
/// aligned with `table.rows`: one `Option<GeoPoint>` per input row. A miss
/// is data, not an error; only transport-level failures abort the run.
pub async fn resolve_coordinates(
    client: &GeocodeClient,
    table: &SchoolTable,
) -> Result<Vec<Option<GeoPoint>>> {
    let pb = ProgressBar::new(table.rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let mut coords = Vec::with_capacity(table.rows.len());
    let mut resolved = 0usize;

    for school in &table.rows {
        let address = school.full_address();
        let point = client.geocode(&address).await?;

        match point {
            Some(_) => resolved += 1,
            None => debug!("Row {} did not geocode: {}", school.row, address),
        }

        coords.push(point);
        pb.inc(1);
    }

    pb.finish_with_message("Geocoding complete");
    info!(
        "Resolved {} of {} addresses ({} misses)",
        resolved,
        table.rows.len(),
        table.rows.len() - resolved
    );

    Ok(coords)
}
