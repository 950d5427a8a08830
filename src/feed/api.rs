use super::feature::collect;
use super::feature::ParcelRow;
use crate::config::Config;
use crate::store;
use crate::store::Farms;
use crate::store::Probe;
use geojson::FeatureCollection;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Error as E;

/// Read-only query surface behind the HTTP handlers. Holds the one shared
/// client for the life of the process.
pub struct API(Arc<Client>, Config);

impl API {
    pub async fn new(config: Config) -> Self {
        let client = store::connect(&config, &config.database)
            .await
            .expect("db connection");
        Self(Arc::new(client), config)
    }

    /// Connectivity check behind GET /test.
    pub async fn ping(&self) -> Result<i32, E> {
        self.0.ping().await
    }

    /// The feed itself: every stored parcel as one GeoJSON Feature.
    pub async fn collection(&self) -> Result<FeatureCollection, E> {
        let sql = Farms::selects(&self.1.schema, &self.1.table);
        Ok(collect(
            self.0
                .query(&sql, &[])
                .await?
                .into_iter()
                .map(ParcelRow::from)
                .collect(),
        ))
    }
}
