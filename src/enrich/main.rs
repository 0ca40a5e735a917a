//! School-district enrichment pipeline.
//!
//! Geocodes school addresses, joins the resulting points against district
//! polygons, and writes the two checkpoint CSVs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use school_districts::districts::load_districts;
use school_districts::geocode::{resolve_coordinates, GeocodeClient};
use school_districts::pip::{match_districts, DistrictIndex};
use school_districts::schools::{read_schools, write_coords_csv, write_districts_csv};

#[derive(Parser, Debug)]
#[command(name = "enrich")]
#[command(about = "Geocode schools and match them to district polygons")]
struct Args {
    /// School records CSV
    #[arg(long, default_value = "data/school_data.csv")]
    schools: PathBuf,

    /// District boundary shapefile
    #[arg(
        long,
        default_value = "data/us_school_districts/EDGE_SCHOOLDISTRICT_TL_23_SY2223.shp"
    )]
    shapefile: PathBuf,

    /// State FIPS code used to filter the national district dataset
    #[arg(long, default_value = "04")]
    state_fips: String,

    /// Output CSV for schools with coordinates
    #[arg(long, default_value = "data/schools_with_coords.csv")]
    coords_out: PathBuf,

    /// Output CSV for schools with district matches
    #[arg(long, default_value = "data/schools_with_districts.csv")]
    districts_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let api_key =
        std::env::var("GOOGLE_MAPS_API_KEY").context("GOOGLE_MAPS_API_KEY is not set")?;
    let client = GeocodeClient::new(api_key)?;

    info!("Reading schools from {}", args.schools.display());
    let table = read_schools(&args.schools)?;

    let districts = load_districts(&args.shapefile, &args.state_fips)?;
    let index = DistrictIndex::build(districts);

    info!("Getting coordinates");
    let coords = resolve_coordinates(&client, &table).await?;
    write_coords_csv(&args.coords_out, &table, &coords)?;
    info!("Wrote {}", args.coords_out.display());

    info!("Getting districts for each coordinate");
    let matches = match_districts(&table.rows, &coords, &index);
    info!("{} schools matched at least one district", matches.len());
    write_districts_csv(&args.districts_out, &table, &coords, &matches)?;
    info!("Wrote {}", args.districts_out.display());

    Ok(())
}
