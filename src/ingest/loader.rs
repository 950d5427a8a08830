use super::cli::Ingest;
use super::reader;
use super::reader::Parcel;
use super::srid;
use crate::config::Config;
use crate::store;
use crate::store::Farms;
use crate::store::Probe;
use anyhow::Context;
use anyhow::Result;
use tokio_postgres::Client;
use wkt::ToWkt;

pub struct Loader;

impl Loader {
    pub async fn run(args: Ingest) -> Result<()> {
        let config = Config::from_env()?;
        let (parcels, skipped) = reader::read(&args.shapefile)?;
        let srid = args
            .srid
            .or_else(|| srid::sniff(&args.shapefile))
            .unwrap_or(crate::WGS84);
        log::info!(
            "read {} parcels ({} skipped), source EPSG:{}",
            parcels.len(),
            skipped,
            srid
        );
        let client = Self::provision(&config).await?;
        Self::load(&client, &config, parcels, srid).await?;
        let rows = client.rows(&config.qualified()).await;
        log::info!("table {} now holds {} rows", config.qualified(), rows);
        Ok(())
    }

    /// Create the database, spatial extension, schema, and table if absent.
    /// Safe to re-run, and independent of the data load below.
    async fn provision(config: &Config) -> Result<Client> {
        let admin = store::connect(config, "postgres")
            .await
            .context("connecting to maintenance database")?;
        let absent = admin
            .query_opt(Farms::database_exists(), &[&config.database])
            .await?
            .is_none();
        if absent {
            admin
                .execute(&Farms::database_creates(&config.database), &[])
                .await
                .context("creating database")?;
            log::info!("database {} created", config.database);
        } else {
            log::info!("database {} already exists", config.database);
        }
        let client = store::connect(config, &config.database)
            .await
            .context("connecting to target database")?;
        client
            .batch_execute(&Farms::creates(&config.schema, &config.table))
            .await
            .context("creating extension, schema, and table")?;
        Ok(client)
    }

    /// Replace the table contents with the given parcels.
    async fn load(client: &Client, config: &Config, parcels: Vec<Parcel>, srid: i32) -> Result<()> {
        client
            .execute(&Farms::truncates(&config.schema, &config.table), &[])
            .await
            .context("truncating table")?;
        let statement = client
            .prepare(&Farms::inserts(&config.schema, &config.table))
            .await
            .context("preparing insert")?;
        for parcel in parcels {
            let boundary = parcel.boundary.wkt_string();
            client
                .execute(
                    &statement,
                    &[
                        &parcel.name,
                        &parcel.age,
                        &parcel.community,
                        &parcel.shape_length,
                        &parcel.shape_area,
                        &parcel.contact,
                        &parcel.sex,
                        &parcel.species,
                        &boundary,
                        &srid,
                    ],
                )
                .await
                .with_context(|| format!("inserting parcel {}", parcel.name))?;
        }
        Ok(())
    }
}
