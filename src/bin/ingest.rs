//! Shapefile Importer Binary
//!
//! One-time offline load of a farm parcel shapefile into PostGIS.
//! Provisions the database, schema, and table, then replaces the contents.

use clap::Parser;
use mangroves::*;

#[tokio::main]
async fn main() {
    log();
    ingest::Loader::run(ingest::Ingest::parse())
        .await
        .expect("ingest");
}
