//! Feed Server Binary
//!
//! Serves the stored mangrove farm parcels as a GeoJSON feed,
//! plus liveness and database connectivity checks.

use mangroves::*;

#[tokio::main]
async fn main() {
    log();
    feed::Server::run().await.unwrap();
}
