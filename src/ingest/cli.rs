use clap::Parser;
use std::path::PathBuf;

/// Load a mangrove farm shapefile into the spatial database.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Ingest {
    /// Path to the source .shp, with .dbf and .prj sidecars alongside
    #[arg(required = true)]
    pub shapefile: PathBuf,
    /// EPSG code of the source reference system, sniffed from .prj when omitted
    #[arg(long)]
    pub srid: Option<i32>,
}
